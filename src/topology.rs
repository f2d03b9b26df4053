//! Graph topology orchestration.
//!
//! Owns the node and edge shape collections, rebuilds them incrementally
//! from graph snapshots, runs the selection/hover state machine, and
//! answers spatial queries. Everything here is synchronous and runs to
//! completion inside one call frame; the hosting render loop is the single
//! owner of this state.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use log::{debug, warn};

use crate::config::EngineConfig;
use crate::geometry::Rect;
use crate::graph::{Edge, Graph};
use crate::painter::{
    DrawSummary, EdgePaint, ImageResolver, NoImages, NodePaint, ShapePainter,
};
use crate::shape::{
    BorderEnd, EdgePath, EdgeShape, NodeShape, ShapeState, assign_offsets, build_edge_shape,
    build_node_shape, resolve_border,
};
use crate::style::StyleSheet;

pub struct Topology {
    config: EngineConfig,
    images: Box<dyn ImageResolver>,
    nodes: BTreeMap<u64, NodeShape>,
    edges: BTreeMap<u64, EdgeShape>,
    /// Node ids in draw order (first drawn lowest); spatial queries walk
    /// this in reverse so the topmost shape wins.
    node_order: Vec<u64>,
    /// Edge ids in input order; drawn before nodes.
    edge_order: Vec<u64>,
}

impl Topology {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_images(config, Box::new(NoImages))
    }

    pub fn with_images(config: EngineConfig, images: Box<dyn ImageResolver>) -> Self {
        Self {
            config,
            images,
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            node_order: Vec::new(),
            edge_order: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn node(&self, id: u64) -> Option<&NodeShape> {
        self.nodes.get(&id)
    }

    pub fn edge(&self, id: u64) -> Option<&EdgeShape> {
        self.edges.get(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_shapes(&self) -> impl Iterator<Item = &NodeShape> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn edge_shapes(&self) -> impl Iterator<Item = &EdgeShape> {
        self.edge_order.iter().filter_map(|id| self.edges.get(id))
    }

    /// Rebuilds the shape collections from a graph snapshot.
    ///
    /// Shapes whose id survives are mutated in place so interaction state
    /// and simulated positions carry across rebuilds; vanished ids are
    /// dropped, new ids built through the factories. Offsets are
    /// recomputed for the whole edge set, since any membership change can
    /// renumber an entire offset group.
    pub fn set_graph(&mut self, graph: &Graph, styles: &StyleSheet) {
        let mut node_ids: Vec<u64> = graph.nodes.iter().map(|n| n.id).collect();
        node_ids.sort_unstable();
        self.nodes.retain(|id, _| node_ids.binary_search(id).is_ok());
        self.node_order.retain(|id| self.nodes.contains_key(id));

        for node in &graph.nodes {
            let style = styles.node_style(node.id).clone();
            match self.nodes.entry(node.id) {
                Entry::Occupied(entry) => entry.into_mut().apply(node, style),
                Entry::Vacant(entry) => {
                    entry.insert(build_node_shape(node, style));
                    self.node_order.push(node.id);
                }
            }
        }

        // Edges referencing a missing endpoint are not drawable in any
        // frame; drop them here rather than checking per query.
        let mut kept: Vec<Edge> = Vec::with_capacity(graph.edges.len());
        for edge in &graph.edges {
            if !self.nodes.contains_key(&edge.start) || !self.nodes.contains_key(&edge.end) {
                warn!(
                    "edge {} references a missing node ({} -> {}), skipping",
                    edge.id, edge.start, edge.end
                );
                continue;
            }
            kept.push(*edge);
        }

        let mut kept_ids: Vec<u64> = kept.iter().map(|e| e.id).collect();
        kept_ids.sort_unstable();
        self.edges.retain(|id, _| kept_ids.binary_search(id).is_ok());
        self.edge_order.retain(|id| self.edges.contains_key(id));

        for edge in &kept {
            let style = styles.edge_style(edge.id).clone();
            match self.edges.entry(edge.id) {
                Entry::Occupied(entry) => entry.into_mut().apply(edge, style),
                Entry::Vacant(entry) => {
                    entry.insert(build_edge_shape(edge, style));
                    self.edge_order.push(edge.id);
                }
            }
        }

        for (id, offset) in assign_offsets(&kept) {
            if let Some(shape) = self.edges.get_mut(&id) {
                shape.offset = offset;
            }
        }

        self.rebuild_incidence();
        debug!(
            "topology rebuilt: {} nodes, {} edges",
            self.nodes.len(),
            self.edges.len()
        );
    }

    fn rebuild_incidence(&mut self) {
        for node in self.nodes.values_mut() {
            node.in_edges.clear();
            node.out_edges.clear();
        }
        for id in &self.edge_order {
            let (start, end) = {
                let edge = &self.edges[id];
                (edge.start, edge.end)
            };
            if let Some(node) = self.nodes.get_mut(&start) {
                node.out_edges.push(*id);
            }
            if let Some(node) = self.nodes.get_mut(&end) {
                node.in_edges.push(*id);
            }
        }
    }

    /// Moves a node shape (simulation tick); keeps state and style.
    pub fn set_node_position(&mut self, id: u64, x: f32, y: f32) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.position = Some((x, y));
                true
            }
            None => false,
        }
    }

    // ── Selection / hover state machine ─────────────────────────────────

    /// Clears all selection, then selects the node and cascades to its
    /// incident edges and their opposite endpoints. Select is an override:
    /// it replaces hover state wherever the cascade reaches.
    pub fn select_node(&mut self, id: u64) -> bool {
        if !self.nodes.contains_key(&id) {
            return false;
        }
        self.unselect_all();
        self.cascade_node(id, ShapeState::Selected, true);
        true
    }

    /// Clears all hover, then hovers the node and cascades. Hover only
    /// writes onto state-free shapes, so it never clobbers a selection.
    pub fn hover_node(&mut self, id: u64) -> bool {
        if !self.nodes.contains_key(&id) {
            return false;
        }
        self.unhover_all();
        self.cascade_node(id, ShapeState::Hovered, false);
        true
    }

    /// Clears all selection, then selects the edge and both endpoints.
    pub fn select_edge(&mut self, id: u64) -> bool {
        if !self.edges.contains_key(&id) {
            return false;
        }
        self.unselect_all();
        self.cascade_edge(id, ShapeState::Selected, true);
        true
    }

    /// Clears all hover, then hovers the edge and both endpoints, without
    /// touching selected shapes.
    pub fn hover_edge(&mut self, id: u64) -> bool {
        if !self.edges.contains_key(&id) {
            return false;
        }
        self.unhover_all();
        self.cascade_edge(id, ShapeState::Hovered, false);
        true
    }

    /// Clears every selected shape; returns how many changed so callers
    /// can decide whether a redraw is needed.
    pub fn unselect_all(&mut self) -> usize {
        self.clear_state(ShapeState::Selected)
    }

    /// Clears every hovered shape; returns how many changed.
    pub fn unhover_all(&mut self) -> usize {
        self.clear_state(ShapeState::Hovered)
    }

    fn clear_state(&mut self, state: ShapeState) -> usize {
        let mut changed = 0;
        for node in self.nodes.values_mut() {
            if node.state == state {
                node.state = ShapeState::Idle;
                changed += 1;
            }
        }
        for edge in self.edges.values_mut() {
            if edge.state == state {
                edge.state = ShapeState::Idle;
                changed += 1;
            }
        }
        changed
    }

    /// A cascade may write a shape's state when the operation overrides
    /// (explicit select) or the shape carries no state yet; this keeps a
    /// hover cascade from clobbering an explicit selection.
    fn changeable(current: ShapeState, is_override: bool) -> bool {
        is_override || current.is_idle()
    }

    fn cascade_node(&mut self, id: u64, state: ShapeState, is_override: bool) {
        let incident: Vec<u64> = match self.nodes.get_mut(&id) {
            Some(node) => {
                if Self::changeable(node.state, is_override) {
                    node.state = state;
                }
                node.in_edges.iter().chain(node.out_edges.iter()).copied().collect()
            }
            None => return,
        };
        let mut opposite = Vec::with_capacity(incident.len());
        for edge_id in incident {
            if let Some(edge) = self.edges.get_mut(&edge_id) {
                if Self::changeable(edge.state, is_override) {
                    edge.state = state;
                }
                opposite.push(edge.other_end(id));
            }
        }
        for node_id in opposite {
            if node_id == id {
                continue;
            }
            if let Some(node) = self.nodes.get_mut(&node_id)
                && Self::changeable(node.state, is_override)
            {
                node.state = state;
            }
        }
    }

    fn cascade_edge(&mut self, id: u64, state: ShapeState, is_override: bool) {
        let endpoints = match self.edges.get_mut(&id) {
            Some(edge) => {
                if Self::changeable(edge.state, is_override) {
                    edge.state = state;
                }
                [edge.start, edge.end]
            }
            None => return,
        };
        for node_id in endpoints {
            if let Some(node) = self.nodes.get_mut(&node_id)
                && Self::changeable(node.state, is_override)
            {
                node.state = state;
            }
        }
    }

    // ── Spatial queries ─────────────────────────────────────────────────

    /// Bounding rectangle over all positioned nodes, inflated by each
    /// node's bordered radius. `None` while no node has a position.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;
        let mut any = false;
        for node in self.nodes.values() {
            let Some((x, y)) = node.position else {
                continue;
            };
            let r = node.bordered_radius();
            min_x = min_x.min(x - r);
            min_y = min_y.min(y - r);
            max_x = max_x.max(x + r);
            max_y = max_y.max(y + r);
            any = true;
        }
        any.then(|| Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Topmost node shape containing `point`: draw order is walked in
    /// reverse so later-drawn shapes win.
    pub fn nearest_node_shape(&self, point: (f32, f32)) -> Option<u64> {
        self.node_order
            .iter()
            .rev()
            .find(|id| {
                self.nodes
                    .get(id)
                    .is_some_and(|node| node.includes_point(point))
            })
            .copied()
    }

    /// Closest edge shape within `max_distance` of `point`; ties resolve
    /// to the earlier edge in input order.
    pub fn nearest_edge_shape(&self, point: (f32, f32), max_distance: f32) -> Option<u64> {
        let samples = self.config.curve.distance_samples;
        let mut best = f32::MAX;
        let mut best_id = None;
        for id in &self.edge_order {
            let Some(edge) = self.edges.get(id) else {
                continue;
            };
            let Some(path) = self.edge_path(edge) else {
                continue;
            };
            let dist = path.distance_to(point, samples);
            if dist <= max_distance && dist < best {
                best = dist;
                best_id = Some(*id);
            }
        }
        best_id
    }

    /// Resolves an edge shape's path from its endpoint node shapes.
    /// `None` while either endpoint is unpositioned (skip condition).
    pub fn edge_path(&self, edge: &EdgeShape) -> Option<EdgePath> {
        let start = self.nodes.get(&edge.start)?;
        let end = self.nodes.get(&edge.end)?;
        let from = start.center()?;
        let to = end.center()?;
        Some(edge.path(from, to, start.bordered_radius(), &self.config.curve))
    }

    // ── Draw pass ───────────────────────────────────────────────────────

    /// Emits resolved geometry for every drawable shape: edges first (so
    /// nodes paint over them), then nodes in draw order. Shapes hit by a
    /// skip condition are counted, not reported as errors.
    pub fn draw(&self, painter: &mut dyn ShapePainter) -> DrawSummary {
        let mut summary = DrawSummary::default();

        for id in &self.edge_order {
            let Some(edge) = self.edges.get(id) else {
                continue;
            };
            if edge.style.width <= 0.0 {
                summary.edges_skipped += 1;
                continue;
            }
            let Some(paint) = self.edge_paint(edge) else {
                summary.edges_skipped += 1;
                continue;
            };
            painter.paint_edge(&paint);
            summary.edges_drawn += 1;
        }

        for id in &self.node_order {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            let Some(center) = node.center() else {
                summary.nodes_skipped += 1;
                continue;
            };
            let image = node
                .image_url()
                .and_then(|url| self.images.resolve(url));
            painter.paint_node(&NodePaint {
                id: *id,
                center,
                radius: node.radius(),
                marker: node.marker,
                state: node.state,
                style: node.style.clone(),
                image,
                label_enabled: node.style.label,
            });
            summary.nodes_drawn += 1;
        }

        summary
    }

    fn edge_paint(&self, edge: &EdgeShape) -> Option<EdgePaint> {
        let path = self.edge_path(edge)?;
        let start = self.nodes.get(&edge.start)?;
        let end = self.nodes.get(&edge.end)?;
        let from_hit = resolve_border(
            &path,
            start.center()?,
            &|angle| start.border_distance(angle),
            BorderEnd::Start,
            &self.config.border,
        )?;
        let to_hit = resolve_border(
            &path,
            end.center()?,
            &|angle| end.border_distance(angle),
            BorderEnd::End,
            &self.config.border,
        )?;
        let arrow = (edge.style.arrow_scale > 0.0).then(|| edge.arrow(&path, &to_hit));
        Some(EdgePaint {
            id: edge.id,
            path,
            from_point: from_hit.point,
            to_point: to_hit.point,
            arrow,
            state: edge.state,
            style: edge.style.clone(),
            label_enabled: edge.style.label,
        })
    }
}
