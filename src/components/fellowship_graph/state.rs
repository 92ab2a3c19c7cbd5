use std::collections::HashSet;

use super::layout::GraphLayout;
use super::model::GraphModel;

/// Which detail panel is open. Views are rebuilt from the model each time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
	Contract(usize),
	NodeProvenance(usize),
	EdgeProvenance(usize),
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub neighbors: HashSet<usize>,
	pub highlight_t: f64,
	pub prev_node: Option<usize>,
	pub prev_neighbors: HashSet<usize>,
	delay_t: f64,
}

/// Everything one rendered graph needs between frames.
///
/// Owned by a single graph session; a new planner result builds a fresh
/// state, so selection never carries over.
pub struct GraphSessionState {
	pub model: GraphModel,
	pub layout: GraphLayout,
	pub hover: HoverState,
	pub flow_time: f64,
}

impl GraphSessionState {
	pub fn new(model: GraphModel) -> Self {
		let layout = GraphLayout::compute(&model);
		Self {
			model,
			layout,
			hover: HoverState::default(),
			flow_time: 0.0,
		}
	}

	pub fn node_at_position(&self, x: f64, y: f64) -> Option<usize> {
		self.layout.node_at(x, y)
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Keep the previous selection around so it can fade out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			self.hover.neighbors.extend(self.model.neighbors(idx));
		}
	}

	pub fn is_highlighted(&self, idx: usize) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: usize) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 6.0)
		} else {
			(0.0, 0.0, 4.0)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * (speed * dt).min(1.0);
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * (speed * dt).min(1.0);
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::super::model::fixtures::{edge, node};
	use super::super::types::WorkflowGraph;
	use super::*;

	fn session() -> GraphSessionState {
		GraphSessionState::new(GraphModel::new(WorkflowGraph {
			nodes: vec![node("a", "diagnosis"), node("b", "logistics"), node("c", "repair")],
			edges: vec![edge("a", "b", "ship"), edge("b", "c", "fix")],
		}))
	}

	#[test]
	fn fresh_session_has_no_selection() {
		let s = session();
		assert_eq!(s.hover.node, None);
		assert!(!s.has_active_highlight());
		assert_eq!(s.layout.nodes.len(), 3);
	}

	#[test]
	fn hover_highlights_neighbors() {
		let mut s = session();
		s.set_hover(Some(0));
		assert!(s.is_hovered(0));
		assert!(s.is_highlighted(1));
		assert!(!s.is_highlighted(2));
	}

	#[test]
	fn leaving_fades_out_then_clears() {
		let mut s = session();
		s.set_hover(Some(1));
		for _ in 0..60 {
			s.tick(0.016);
		}
		assert!(s.hover.highlight_t > 0.5);

		s.set_hover(None);
		assert_eq!(s.hover.prev_node, Some(1));
		assert!(s.has_active_highlight());
		for _ in 0..200 {
			s.tick(0.016);
		}
		assert_eq!(s.hover.highlight_t, 0.0);
		assert!(!s.has_active_highlight());
	}

	#[test]
	fn hit_test_maps_to_node_centres() {
		let s = session();
		let c = s.layout.nodes[2];
		assert_eq!(s.node_at_position(c.x, c.y), Some(2));
		assert_eq!(s.node_at_position(0.0, 0.0), None);
	}
}
