use super::config::GraphConfig;
use super::model::GraphModel;
use super::types::{Hit, Point};

/// Classifies a pointer position as an edge handle, a node, or nothing.
///
/// Both passes pick the nearest candidate and then compare against a radius;
/// edge handles are checked first and win any overlap.
#[derive(Clone, Copy, Debug)]
pub struct HitTester {
	handle_radius_sq: f64,
	node_radius_sq: f64,
}

impl HitTester {
	pub fn new(config: &GraphConfig) -> Self {
		Self {
			handle_radius_sq: config.handle_radius * config.handle_radius,
			node_radius_sq: config.node_radius * config.node_radius,
		}
	}

	pub fn classify(&self, model: &GraphModel, p: Point) -> Option<Hit> {
		let nodes = model.nodes();
		let handles = model.edges().iter().map(|e| e.midpoint(nodes));
		if let Some((idx, d)) = nearest(handles, p) {
			if d < self.handle_radius_sq {
				return Some(Hit::EdgeHandle(idx));
			}
		}

		match nearest(nodes.iter().map(|n| n.pos()), p) {
			Some((idx, d)) if d < self.node_radius_sq => Some(Hit::Node(idx)),
			_ => None,
		}
	}
}

fn nearest(candidates: impl Iterator<Item = Point>, p: Point) -> Option<(usize, f64)> {
	candidates
		.map(|c| c.distance_sq(p))
		.enumerate()
		.min_by(|a, b| a.1.total_cmp(&b.1))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::link_graph::types::SiteLink;

	fn graph(points: &[(f64, f64)]) -> GraphModel {
		let links: Vec<SiteLink> = (0..points.len())
			.map(|i| SiteLink::new(format!("N{i}"), format!("/{i}")))
			.collect();
		let positions = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
		GraphModel::from_positions(&links, positions, 1)
	}

	#[test]
	fn handle_beats_overlapping_node() {
		// Short edge: its midpoint sits 5px from both endpoints.
		let model = graph(&[(100.0, 100.0), (110.0, 100.0), (400.0, 400.0)]);
		let tester = HitTester::new(&GraphConfig::default());
		let mid = model.edge_midpoint(0).unwrap_or_default();
		assert_eq!(mid, Point::new(105.0, 100.0));
		assert_eq!(tester.classify(&model, mid), Some(Hit::EdgeHandle(0)));
	}

	#[test]
	fn node_hit_outside_every_handle() {
		let model = graph(&[(100.0, 100.0), (300.0, 100.0)]);
		let tester = HitTester::new(&GraphConfig::default());
		assert_eq!(
			tester.classify(&model, Point::new(108.0, 104.0)),
			Some(Hit::Node(0))
		);
		assert_eq!(
			tester.classify(&model, Point::new(295.0, 98.0)),
			Some(Hit::Node(1))
		);
		assert_eq!(
			tester.classify(&model, Point::new(201.0, 103.0)),
			Some(Hit::EdgeHandle(0))
		);
	}

	#[test]
	fn radius_is_exclusive() {
		let model = graph(&[(100.0, 100.0), (300.0, 100.0)]);
		let tester = HitTester::new(&GraphConfig::default());
		assert_eq!(tester.classify(&model, Point::new(116.0, 100.0)), None);
		assert_eq!(
			tester.classify(&model, Point::new(115.9, 100.0)),
			Some(Hit::Node(0))
		);
	}

	#[test]
	fn nothing_nearby_or_nothing_at_all() {
		let model = graph(&[(100.0, 100.0), (300.0, 100.0)]);
		let tester = HitTester::new(&GraphConfig::default());
		assert_eq!(tester.classify(&model, Point::new(200.0, 300.0)), None);
		assert_eq!(tester.classify(&GraphModel::default(), Point::default()), None);
	}
}
