use super::config::GraphConfig;
use super::model::GraphModel;
use super::types::Point;

/// Explicit Euler integrator: every node is pulled toward a shared center,
/// each edge pulls its two endpoints toward a rest length, and velocity is
/// damped after every step.
#[derive(Clone, Debug)]
pub struct LayoutSimulator {
	spring: f64,
	time_scale: f64,
	friction: f64,
	max_frame_ms: f64,
	edge_spring: f64,
	edge_length: f64,
}

impl LayoutSimulator {
	pub fn new(config: &GraphConfig) -> Self {
		Self {
			spring: config.spring,
			time_scale: config.time_scale,
			friction: config.friction,
			max_frame_ms: config.max_frame_ms,
			edge_spring: config.edge_spring,
			edge_length: config.edge_length,
		}
	}

	/// Clamp a raw frame interval so a resumed tab doesn't launch nodes.
	pub fn clamp_dt(&self, dt_ms: f64) -> f64 {
		if dt_ms.is_nan() {
			return 0.0;
		}
		dt_ms.clamp(0.0, self.max_frame_ms)
	}

	/// Advance one frame. A `pinned` node is held where it is: it is neither
	/// moved nor damped, though its edges still pull on its neighbours.
	pub fn step(&self, model: &mut GraphModel, center: Point, dt_ms: f64, pinned: Option<usize>) {
		let dt = self.clamp_dt(dt_ms);
		let gain = self.time_scale * dt;
		let mut accel = vec![Point::default(); model.nodes().len()];

		for (acc, node) in accel.iter_mut().zip(model.nodes()) {
			*acc += (center - node.pos()) * (self.spring * gain);
		}

		if self.edge_spring > 0.0 {
			let nodes = model.nodes();
			for edge in model.edges() {
				let delta = nodes[edge.b].pos() - nodes[edge.a].pos();
				let len = delta.length();
				if len < 1e-6 {
					continue;
				}
				let pull = delta * ((len - self.edge_length) / len * self.edge_spring * gain);
				accel[edge.a] += pull;
				accel[edge.b] += pull * -1.0;
			}
		}

		for (idx, (node, acc)) in model.nodes_mut().iter_mut().zip(accel).enumerate() {
			if pinned == Some(idx) {
				continue;
			}
			node.vx += acc.x;
			node.vy += acc.y;
			node.x += node.vx;
			node.y += node.vy;
			node.vx *= self.friction;
			node.vy *= self.friction;
		}
	}
}
