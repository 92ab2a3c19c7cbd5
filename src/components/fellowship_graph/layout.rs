//! Linear hand-off layout.
//!
//! Workflows are chains, so nodes sit left to right in input order on one
//! horizontal line. Branching or cyclic graphs are still placed this way;
//! their extra edges are simply drawn across the chain.

use super::model::GraphModel;

/// Canvas width for small graphs.
pub const MIN_WIDTH: f64 = 700.0;
/// Horizontal room given to each node once the graph outgrows [`MIN_WIDTH`].
pub const PER_NODE_WIDTH: f64 = 300.0;
/// Fixed canvas height; every node sits at half of it.
pub const CANVAS_HEIGHT: f64 = 450.0;
/// Node disc radius, used for drawing and hit-testing alike.
pub const NODE_RADIUS: f64 = 36.0;

/// Canvas coordinates in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
	/// Distance from the left edge.
	pub x: f64,
	/// Distance from the top edge.
	pub y: f64,
}

/// Straight segment between the centres of two nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeGeometry {
	/// Centre of the source node.
	pub from: Point,
	/// Centre of the target node.
	pub to: Point,
	/// Where the hand-off label is anchored.
	pub midpoint: Point,
}

/// Geometry for one graph. A pure function of node count and edge endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLayout {
	/// See [`canvas_width`].
	pub width: f64,
	/// Always [`CANVAS_HEIGHT`].
	pub height: f64,
	/// Node centres, indexed like [`GraphModel::nodes`].
	pub nodes: Vec<Point>,
	/// Edge segments, indexed like [`GraphModel::edges`].
	pub edges: Vec<EdgeGeometry>,
}

impl GraphLayout {
	/// Place every node of `model` and every edge it kept.
	pub fn compute(model: &GraphModel) -> Self {
		let nodes = node_positions(model.nodes().len());
		let edges = model
			.edges()
			.iter()
			.map(|e| {
				let (from, to) = (nodes[e.from], nodes[e.to]);
				EdgeGeometry {
					from,
					to,
					midpoint: Point {
						x: (from.x + to.x) / 2.0,
						y: (from.y + to.y) / 2.0,
					},
				}
			})
			.collect();

		Self {
			width: canvas_width(model.nodes().len()),
			height: CANVAS_HEIGHT,
			nodes,
			edges,
		}
	}

	/// Index of the node whose disc contains `(x, y)`.
	pub fn node_at(&self, x: f64, y: f64) -> Option<usize> {
		self.nodes.iter().position(|p| {
			let (dx, dy) = (p.x - x, p.y - y);
			(dx * dx + dy * dy).sqrt() <= NODE_RADIUS
		})
	}
}

/// `max(MIN_WIDTH, PER_NODE_WIDTH * node_count)`.
pub fn canvas_width(node_count: usize) -> f64 {
	MIN_WIDTH.max(PER_NODE_WIDTH * node_count as f64)
}

/// Centres for `node_count` nodes; node `i` (1-indexed) at `width / (n + 1) * i`.
pub fn node_positions(node_count: usize) -> Vec<Point> {
	let spacing = canvas_width(node_count) / (node_count as f64 + 1.0);
	let y = CANVAS_HEIGHT / 2.0;
	(1..=node_count)
		.map(|i| Point {
			x: spacing * i as f64,
			y,
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::super::model::fixtures::{edge, node};
	use super::super::types::WorkflowGraph;
	use super::*;

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	#[test]
	fn width_grows_past_minimum() {
		assert_eq!(canvas_width(1), 700.0);
		assert_eq!(canvas_width(2), 700.0);
		assert_eq!(canvas_width(3), 900.0);
		assert_eq!(canvas_width(10), 3000.0);
	}

	#[test]
	fn positions_follow_spacing_formula() {
		for n in 1..=12 {
			let width = canvas_width(n);
			let points = node_positions(n);
			assert_eq!(points.len(), n);
			for (i, p) in points.iter().enumerate() {
				assert!(close(p.x, width / (n as f64 + 1.0) * (i + 1) as f64));
				assert_eq!(p.y, CANVAS_HEIGHT / 2.0);
			}
			assert!(points.windows(2).all(|w| w[0].x < w[1].x));
		}
	}

	#[test]
	fn two_node_escalation_chain() {
		let model = GraphModel::new(WorkflowGraph {
			nodes: vec![node("A", "diagnosis"), node("B", "repair")],
			edges: vec![edge("A", "B", "escalation")],
		});
		let layout = GraphLayout::compute(&model);

		assert_eq!(layout.width, 700.0);
		assert!(close(layout.nodes[0].x, 700.0 / 3.0));
		assert!(close(layout.nodes[1].x, 1400.0 / 3.0));
		assert_eq!(layout.edges.len(), 1);
		assert!(close(layout.edges[0].midpoint.x, 350.0));
		assert_eq!(model.edges()[0].edge.handoff, "escalation");
	}

	#[test]
	fn identical_input_identical_geometry() {
		let graph = WorkflowGraph {
			nodes: vec![node("a", "diagnosis"), node("b", "logistics"), node("c", "repair")],
			edges: vec![edge("a", "b", "ship"), edge("b", "c", "fix")],
		};
		let first = GraphLayout::compute(&GraphModel::new(graph.clone()));
		let second = GraphLayout::compute(&GraphModel::new(graph));
		assert_eq!(first, second);
	}

	#[test]
	fn empty_graph_has_no_geometry() {
		let layout = GraphLayout::compute(&GraphModel::default());
		assert!(layout.nodes.is_empty());
		assert!(layout.edges.is_empty());
		assert_eq!(layout.width, MIN_WIDTH);
	}

	#[test]
	fn hit_test_uses_node_radius() {
		let layout = GraphLayout::compute(&GraphModel::new(WorkflowGraph {
			nodes: vec![node("a", "diagnosis"), node("b", "repair")],
			edges: vec![],
		}));
		let b = layout.nodes[1];
		assert_eq!(layout.node_at(b.x + 10.0, b.y - 10.0), Some(1));
		assert_eq!(layout.node_at(b.x, b.y + NODE_RADIUS + 1.0), None);
		assert_eq!(layout.node_at(350.0, 20.0), None);
	}
}
