//! Engine tunables.
//!
//! Every constant that shapes geometry or interaction lives here so hosts
//! can load overrides from JSON, mirroring the style sheet.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Parameters of the bisection search used to find edge/border crossings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderSearchConfig {
    /// Hard cap on bisection iterations; the search is bounded by
    /// construction and never loops.
    pub max_iterations: u32,
    /// Absolute distance threshold for accepting a point on a curved edge.
    pub curved_threshold: f32,
    /// Absolute distance threshold for accepting a point on a loop edge.
    pub loop_threshold: f32,
    /// Parameter span searched on the loop circle, the arc nearest the
    /// owning node.
    pub loop_span: (f32, f32),
    /// Which side of the loop circle the end-border search walks; the
    /// start-border search walks the opposite side.
    pub loop_search_forward: bool,
}

impl Default for BorderSearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            curved_threshold: 0.2,
            loop_threshold: 0.05,
            loop_span: (0.6, 1.0),
            loop_search_forward: true,
        }
    }
}

/// Parameters of curved and loop edge geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Perpendicular control-point offset per unit of curve magnitude.
    pub bend_step: f32,
    /// Loop circle radius growth per unit of loop magnitude.
    pub loop_radius_step: f32,
    /// Traversal direction of loop circles, used for tangents and the
    /// border search.
    pub loop_clockwise: bool,
    /// Sample count for point-to-curve distance queries.
    pub distance_samples: u32,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            bend_step: 24.0,
            loop_radius_step: 15.0,
            loop_clockwise: true,
            distance_samples: 10,
        }
    }
}

/// Defaults for viewport fit-zoom computations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Fractional padding around the bounding box, e.g. 0.1 for 10%.
    pub margin: f32,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 10.0,
            margin: 0.1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub border: BorderSearchConfig,
    pub curve: CurveConfig,
    pub fit: FitConfig,
}

/// Loads an engine config from a JSON file; `None` yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, EngineError> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let contents = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| EngineError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
