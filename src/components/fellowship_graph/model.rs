use std::collections::HashMap;

use log::{debug, warn};

use super::types::{WorkflowEdge, WorkflowGraph, WorkflowNode, ticket_id_of};

/// An edge whose endpoints both resolved, as indices into [`GraphModel::nodes`].
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedEdge {
	/// Index of the source node.
	pub from: usize,
	/// Index of the target node.
	pub to: usize,
	/// The edge as decoded.
	pub edge: WorkflowEdge,
}

/// Validated, read-only view of one fellowship graph.
///
/// Built once per planner result and never mutated; a new result replaces
/// the whole model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphModel {
	nodes: Vec<WorkflowNode>,
	edges: Vec<ResolvedEdge>,
	skipped_edges: usize,
}

impl GraphModel {
	/// Index nodes, drop duplicate ids (first wins) and keep only edges whose
	/// endpoints exist. Input order is preserved for both lists.
	pub fn new(graph: WorkflowGraph) -> Self {
		let mut id_to_idx = HashMap::new();
		let mut nodes = Vec::with_capacity(graph.nodes.len());

		for node in graph.nodes {
			if id_to_idx.contains_key(&node.id) {
				warn!("duplicate node id {:?} ignored", node.id);
				continue;
			}
			id_to_idx.insert(node.id.clone(), nodes.len());
			nodes.push(node);
		}

		let mut edges = Vec::with_capacity(graph.edges.len());
		let mut skipped_edges = 0;
		for edge in graph.edges {
			match (id_to_idx.get(&edge.from), id_to_idx.get(&edge.to)) {
				(Some(&from), Some(&to)) => edges.push(ResolvedEdge { from, to, edge }),
				_ => {
					debug!("skipping edge {} -> {}: unknown endpoint", edge.from, edge.to);
					skipped_edges += 1;
				}
			}
		}

		Self {
			nodes,
			edges,
			skipped_edges,
		}
	}

	/// Model for an optional graph; `None` yields the empty state.
	pub fn from_optional(graph: Option<WorkflowGraph>) -> Self {
		graph.map(Self::new).unwrap_or_default()
	}

	/// `true` when there is no graph to display.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Unique nodes in input order.
	pub fn nodes(&self) -> &[WorkflowNode] {
		&self.nodes
	}

	/// Drawable edges in input order.
	pub fn edges(&self) -> &[ResolvedEdge] {
		&self.edges
	}

	/// Node at layout slot `idx`.
	pub fn node(&self, idx: usize) -> Option<&WorkflowNode> {
		self.nodes.get(idx)
	}

	/// Drawable edge number `idx`.
	pub fn edge(&self, idx: usize) -> Option<&ResolvedEdge> {
		self.edges.get(idx)
	}

	/// Number of input edges left out because an endpoint was unknown.
	pub fn skipped_edges(&self) -> usize {
		self.skipped_edges
	}

	/// Ticket id derived from the first node's step id.
	pub fn ticket_id(&self) -> Option<&str> {
		self.nodes.first().map(|n| ticket_id_of(&n.step_id))
	}

	/// Indices of nodes sharing a drawn edge with `idx`.
	pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
		self.edges.iter().filter_map(move |e| {
			if e.from == idx {
				Some(e.to)
			} else if e.to == idx {
				Some(e.from)
			} else {
				None
			}
		})
	}
}
