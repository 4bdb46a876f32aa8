use rand::Rng;

use super::config::GraphConfig;
use super::interaction::{DragState, InteractionController};
use super::model::GraphModel;
use super::simulate::LayoutSimulator;
use super::types::{Edge, Hit, Point, SiteLink};

/// Read-only copy of one node for declarative UI and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeView {
	pub label: String,
	pub route: String,
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphSnapshot {
	pub nodes: Vec<NodeView>,
	pub edges: Vec<Edge>,
	pub hover: Option<Hit>,
}

/// Everything one mounted graph owns: topology and positions, the pointer
/// state machine, the surface's logical size and the current draw style.
pub struct LinkGraphState {
	pub model: GraphModel,
	pub interaction: InteractionController,
	pub width: f64,
	pub height: f64,
	pub glow: bool,
	simulator: LayoutSimulator,
	last_frame: Option<f64>,
}

impl LinkGraphState {
	pub fn new<R: Rng>(links: &[SiteLink], config: &GraphConfig, rng: &mut R) -> Self {
		let model = GraphModel::build(links, config, rng);
		Self::with_model(model, config, config.seed_width, config.seed_height)
	}

	pub fn from_positions(
		links: &[SiteLink],
		positions: Vec<Point>,
		config: &GraphConfig,
		width: f64,
		height: f64,
	) -> Self {
		let model = GraphModel::from_positions(links, positions, config.neighbors);
		Self::with_model(model, config, width, height)
	}

	fn with_model(model: GraphModel, config: &GraphConfig, width: f64, height: f64) -> Self {
		Self {
			model,
			interaction: InteractionController::new(config),
			width,
			height,
			glow: true,
			simulator: LayoutSimulator::new(config),
			last_frame: None,
		}
	}

	pub fn center(&self) -> Point {
		Point::new(self.width * 0.5, self.height * 0.5)
	}

	pub fn is_drawable(&self) -> bool {
		self.width > 0.0 && self.height > 0.0
	}

	/// Advance the layout to the animation timestamp `now_ms`. The first
	/// frame only records the clock.
	pub fn frame(&mut self, now_ms: f64) {
		let dt = self.last_frame.map_or(0.0, |last| now_ms - last);
		self.last_frame = Some(now_ms);
		self.tick(dt);
	}

	/// Step the layout by `dt_ms`. A node being dragged stays under the pointer.
	pub fn tick(&mut self, dt_ms: f64) {
		let center = self.center();
		let pinned = match self.interaction.drag() {
			DragState::Node { index, .. } => Some(index),
			DragState::Idle | DragState::Edge { .. } => None,
		};
		self.simulator.step(&mut self.model, center, dt_ms, pinned);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn set_glow(&mut self, glow: bool) {
		self.glow = glow;
	}

	pub fn pointer_down(&mut self, p: Point) {
		self.interaction.pointer_down(&self.model, p);
	}

	pub fn pointer_move(&mut self, p: Point) {
		self.interaction.pointer_move(&mut self.model, p);
	}

	pub fn pointer_up(&mut self, p: Option<Point>) -> Option<String> {
		self.interaction.pointer_up(&self.model, p)
	}

	pub fn pointer_cancel(&mut self) {
		self.interaction.pointer_cancel();
	}

	pub fn pointer_leave(&mut self) {
		self.interaction.pointer_leave();
	}

	pub fn snapshot(&self) -> GraphSnapshot {
		GraphSnapshot {
			nodes: self
				.model
				.nodes()
				.iter()
				.map(|n| NodeView {
					label: n.label.clone(),
					route: n.route.clone(),
					x: n.x,
					y: n.y,
				})
				.collect(),
			edges: self.model.edges().to_vec(),
			hover: self.interaction.hover(),
		}
	}
}
