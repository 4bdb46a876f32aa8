use super::config::GraphConfig;
use super::hit::HitTester;
use super::model::GraphModel;
use super::types::{Hit, Point};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
	#[default]
	Idle,
	/// `origin` is where the pointer went down, for click detection.
	Node { index: usize, origin: Point },
	Edge { index: usize },
}

/// Pointer state machine: hover tracking, node and edge dragging, and
/// click-through detection.
#[derive(Clone, Debug)]
pub struct InteractionController {
	hit: HitTester,
	click_slop: f64,
	edge_drag_share: f64,
	drag: DragState,
	hover: Option<Hit>,
	last_pointer: Option<Point>,
}

impl InteractionController {
	pub fn new(config: &GraphConfig) -> Self {
		Self {
			hit: HitTester::new(config),
			click_slop: config.click_slop,
			edge_drag_share: config.edge_drag_share,
			drag: DragState::Idle,
			hover: None,
			last_pointer: None,
		}
	}

	pub fn hover(&self) -> Option<Hit> {
		self.hover
	}

	pub fn drag(&self) -> DragState {
		self.drag
	}

	pub fn is_dragging(&self) -> bool {
		self.drag != DragState::Idle
	}

	pub fn pointer_down(&mut self, model: &GraphModel, p: Point) {
		self.last_pointer = Some(p);
		self.hover = self.hit.classify(model, p);
		self.drag = match self.hover {
			Some(Hit::EdgeHandle(index)) => DragState::Edge { index },
			Some(Hit::Node(index)) => DragState::Node { index, origin: p },
			None => DragState::Idle,
		};
	}

	pub fn pointer_move(&mut self, model: &mut GraphModel, p: Point) {
		self.last_pointer = Some(p);
		self.hover = self.hit.classify(model, p);

		match self.drag {
			DragState::Idle => {}
			DragState::Node { index, .. } => {
				if let Some(node) = model.nodes_mut().get_mut(index) {
					node.set_pos(p);
				}
			}
			DragState::Edge { index } => {
				let Some(edge) = model.edges().get(index).copied() else {
					return;
				};
				let nodes = model.nodes_mut();
				let offset = (p - edge.midpoint(nodes)) * self.edge_drag_share;
				for end in [edge.a, edge.b] {
					let moved = nodes[end].pos() + offset;
					nodes[end].set_pos(moved);
				}
			}
		}
	}

	/// End the active drag. Returns the route to open when the gesture was a
	/// node click rather than a drag. `p` falls back to the last seen pointer
	/// position when the release event carries none.
	pub fn pointer_up(&mut self, model: &GraphModel, p: Option<Point>) -> Option<String> {
		let drag = std::mem::take(&mut self.drag);
		let DragState::Node { index, origin } = drag else {
			return None;
		};
		let end = p.or(self.last_pointer)?;
		let moved = end - origin;
		if moved.x.abs() < self.click_slop && moved.y.abs() < self.click_slop {
			model.node(index).map(|n| n.route.clone())
		} else {
			None
		}
	}

	/// Abandon the active drag without click-through.
	pub fn pointer_cancel(&mut self) {
		self.drag = DragState::Idle;
	}

	pub fn pointer_leave(&mut self) {
		self.hover = None;
	}
}
