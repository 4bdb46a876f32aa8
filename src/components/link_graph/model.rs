use rand::Rng;

use super::config::GraphConfig;
use super::types::{Edge, Node, Point, SiteLink};

/// Nodes and the edges between them. Topology is fixed after construction;
/// only node positions and velocities change.
#[derive(Clone, Debug, Default)]
pub struct GraphModel {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
}

impl GraphModel {
	/// Scatter one node per link inside the inset seeding rectangle, then
	/// wire each node to its nearest neighbours.
	pub fn build<R: Rng>(links: &[SiteLink], config: &GraphConfig, rng: &mut R) -> Self {
		let span_x = (config.seed_width - 2.0 * config.seed_inset_x).max(0.0);
		let span_y = (config.seed_height - 2.0 * config.seed_inset_y).max(0.0);
		let positions = links
			.iter()
			.map(|_| {
				Point::new(
					config.seed_inset_x + rng.r#gen::<f64>() * span_x,
					config.seed_inset_y + rng.r#gen::<f64>() * span_y,
				)
			})
			.collect();
		Self::from_positions(links, positions, config.neighbors)
	}

	/// Build the graph from known starting positions.
	pub fn from_positions(links: &[SiteLink], positions: Vec<Point>, neighbors: usize) -> Self {
		debug_assert_eq!(links.len(), positions.len());
		let edges = nearest_neighbor_edges(&positions, neighbors);
		let nodes = links
			.iter()
			.zip(positions)
			.enumerate()
			.map(|(id, (link, p))| Node {
				id,
				x: p.x,
				y: p.y,
				vx: 0.0,
				vy: 0.0,
				label: link.label.clone(),
				route: link.route.clone(),
			})
			.collect();
		Self { nodes, edges }
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn nodes_mut(&mut self) -> &mut [Node] {
		&mut self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node(&self, idx: usize) -> Option<&Node> {
		self.nodes.get(idx)
	}

	pub fn edge_midpoint(&self, idx: usize) -> Option<Point> {
		self.edges.get(idx).map(|e| e.midpoint(&self.nodes))
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

fn nearest_neighbor_edges(positions: &[Point], k: usize) -> Vec<Edge> {
	let mut edges: Vec<Edge> = Vec::new();
	for (i, &p) in positions.iter().enumerate() {
		let mut near: Vec<(usize, f64)> = positions
			.iter()
			.enumerate()
			.filter(|&(j, _)| j != i)
			.map(|(j, &q)| (j, p.distance_sq(q)))
			.collect();
		near.sort_by(|a, b| a.1.total_cmp(&b.1));

		for &(j, _) in near.iter().take(k) {
			if !edges.iter().any(|e| e.connects(i, j)) {
				edges.push(Edge { a: i, b: j });
			}
		}
	}
	edges
}
