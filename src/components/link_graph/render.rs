use std::f64::consts::PI;

use log::warn;
use web_sys::CanvasRenderingContext2d;

use super::state::LinkGraphState;
use super::types::{Hit, Point};

const BACKGROUND: &str = "#000";
const EDGE_COLOR: &str = "rgba(255, 255, 255, 0.75)";
const EDGE_WIDTH: f64 = 1.2;
const GLOW_COLOR: &str = "rgba(255, 255, 255, 0.6)";
const GLOW_BLUR: f64 = 8.0;
const HANDLE_HALF: f64 = 4.0;
const HANDLE_COLOR: &str = "#fff";
const HANDLE_HOVER_COLOR: &str = "#0ff";
const NODE_DOT_RADIUS: f64 = 4.0;
const NODE_COLOR: &str = "#fff";
const LABEL_FONT: &str = "12px sans-serif";
const LABEL_OFFSET: f64 = 8.0;
const LABEL_PAD: f64 = 6.0;
const LABEL_HEIGHT: f64 = 18.0;
const LABEL_BORDER: f64 = 2.0;
const LABEL_BG: &str = "#fff";
const LABEL_INK: &str = "#000";

/// The drawing operations a frame needs. Implemented for the browser's 2D
/// context; tests record calls instead.
pub trait Painter {
	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);
	fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str, line_width: f64);
	fn stroke_line(&mut self, from: Point, to: Point, color: &str, line_width: f64);
	fn fill_circle(&mut self, center: Point, radius: f64, color: &str);
	/// A square of side `2 * half` rotated 45 degrees about `center`.
	fn fill_diamond(&mut self, center: Point, half: f64, color: &str);
	fn begin_glow(&mut self, color: &str, blur: f64);
	fn end_glow(&mut self);
	fn set_font(&mut self, font: &str);
	fn text_width(&self, text: &str) -> f64;
	fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str);
}

/// Paint one frame: background, edges, handles, nodes, then the hover chip.
pub fn render<P: Painter>(state: &LinkGraphState, painter: &mut P) {
	if !state.is_drawable() {
		return;
	}
	painter.fill_rect(0.0, 0.0, state.width, state.height, BACKGROUND);

	let model = &state.model;
	let nodes = model.nodes();
	let hover = state.interaction.hover();

	let glow = state.glow && !model.edges().is_empty();
	if glow {
		painter.begin_glow(GLOW_COLOR, GLOW_BLUR);
	}
	for edge in model.edges() {
		painter.stroke_line(nodes[edge.a].pos(), nodes[edge.b].pos(), EDGE_COLOR, EDGE_WIDTH);
	}
	if glow {
		painter.end_glow();
	}

	for (idx, edge) in model.edges().iter().enumerate() {
		let color = if hover == Some(Hit::EdgeHandle(idx)) {
			HANDLE_HOVER_COLOR
		} else {
			HANDLE_COLOR
		};
		painter.fill_diamond(edge.midpoint(nodes), HANDLE_HALF, color);
	}

	for node in nodes {
		painter.fill_circle(node.pos(), NODE_DOT_RADIUS, NODE_COLOR);
	}

	if let Some(Hit::Node(idx)) = hover {
		if let Some(node) = nodes.get(idx) {
			draw_label_chip(painter, node.pos(), &node.label);
		}
	}
}

fn draw_label_chip<P: Painter>(painter: &mut P, anchor: Point, label: &str) {
	painter.set_font(LABEL_FONT);
	let w = painter.text_width(label) + LABEL_PAD * 2.0;
	let (x, y) = (anchor.x + LABEL_OFFSET, anchor.y - LABEL_HEIGHT / 2.0);
	painter.fill_rect(x, y, w, LABEL_HEIGHT, LABEL_BG);
	painter.stroke_rect(x, y, w, LABEL_HEIGHT, LABEL_INK, LABEL_BORDER);
	painter.fill_text(label, x + LABEL_PAD, anchor.y + 4.0, LABEL_INK);
}

impl Painter for CanvasRenderingContext2d {
	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
		self.set_fill_style_str(color);
		CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
	}

	fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str, line_width: f64) {
		self.set_stroke_style_str(color);
		self.set_line_width(line_width);
		CanvasRenderingContext2d::stroke_rect(self, x, y, w, h);
	}

	fn stroke_line(&mut self, from: Point, to: Point, color: &str, line_width: f64) {
		self.set_stroke_style_str(color);
		self.set_line_width(line_width);
		self.begin_path();
		self.move_to(from.x, from.y);
		self.line_to(to.x, to.y);
		self.stroke();
	}

	fn fill_circle(&mut self, center: Point, radius: f64, color: &str) {
		self.begin_path();
		let _ = self.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
		self.set_fill_style_str(color);
		self.fill();
	}

	fn fill_diamond(&mut self, center: Point, half: f64, color: &str) {
		self.save();
		let _ = self.translate(center.x, center.y);
		let _ = self.rotate(PI / 4.0);
		self.set_fill_style_str(color);
		CanvasRenderingContext2d::fill_rect(self, -half, -half, half * 2.0, half * 2.0);
		self.restore();
	}

	fn begin_glow(&mut self, color: &str, blur: f64) {
		self.save();
		self.set_shadow_color(color);
		self.set_shadow_blur(blur);
	}

	fn end_glow(&mut self) {
		self.restore();
	}

	fn set_font(&mut self, font: &str) {
		CanvasRenderingContext2d::set_font(self, font);
	}

	fn text_width(&self, text: &str) -> f64 {
		match self.measure_text(text) {
			Ok(metrics) => metrics.width(),
			Err(err) => {
				warn!("measure_text failed: {err:?}");
				0.0
			}
		}
	}

	fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str) {
		self.set_fill_style_str(color);
		let _ = CanvasRenderingContext2d::fill_text(self, text, x, y);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::link_graph::config::GraphConfig;
	use crate::components::link_graph::types::SiteLink;

	#[derive(Debug, Clone, PartialEq)]
	enum Op {
		Rect(String),
		Border,
		Line,
		Circle(Point),
		Diamond(Point, String),
		GlowOn,
		GlowOff,
		Font,
		Text(String, f64, f64),
	}

	#[derive(Default)]
	struct Recorder(Vec<Op>);

	impl Painter for Recorder {
		fn fill_rect(&mut self, _: f64, _: f64, _: f64, _: f64, color: &str) {
			self.0.push(Op::Rect(color.into()));
		}
		fn stroke_rect(&mut self, _: f64, _: f64, _: f64, _: f64, _: &str, _: f64) {
			self.0.push(Op::Border);
		}
		fn stroke_line(&mut self, _: Point, _: Point, _: &str, _: f64) {
			self.0.push(Op::Line);
		}
		fn fill_circle(&mut self, center: Point, _: f64, _: &str) {
			self.0.push(Op::Circle(center));
		}
		fn fill_diamond(&mut self, center: Point, _: f64, color: &str) {
			self.0.push(Op::Diamond(center, color.into()));
		}
		fn begin_glow(&mut self, _: &str, _: f64) {
			self.0.push(Op::GlowOn);
		}
		fn end_glow(&mut self) {
			self.0.push(Op::GlowOff);
		}
		fn set_font(&mut self, _: &str) {
			self.0.push(Op::Font);
		}
		fn text_width(&self, text: &str) -> f64 {
			7.0 * text.chars().count() as f64
		}
		fn fill_text(&mut self, text: &str, x: f64, y: f64, _: &str) {
			self.0.push(Op::Text(text.into(), x, y));
		}
	}

	fn state() -> LinkGraphState {
		let links = vec![
			SiteLink::new("Journal", "/journal"),
			SiteLink::new("Library", "/library"),
			SiteLink::new("DVDs", "/dvds"),
		];
		let positions = vec![
			Point::new(100.0, 100.0),
			Point::new(300.0, 100.0),
			Point::new(200.0, 300.0),
		];
		LinkGraphState::from_positions(&links, positions, &GraphConfig::default(), 640.0, 480.0)
	}

	fn frame(state: &LinkGraphState) -> Vec<Op> {
		let mut recorder = Recorder::default();
		render(state, &mut recorder);
		recorder.0
	}

	#[test]
	fn paints_layers_in_order() {
		let mut s = state();
		s.set_glow(false);
		let ops = frame(&s);

		assert_eq!(ops[0], Op::Rect(BACKGROUND.into()));
		assert_eq!(&ops[1..4], &[Op::Line, Op::Line, Op::Line]);
		assert!(matches!(ops[4], Op::Diamond(_, _)));
		assert!(matches!(ops[6], Op::Diamond(_, _)));
		assert_eq!(ops[7], Op::Circle(Point::new(100.0, 100.0)));
		assert_eq!(ops.len(), 10);
	}

	#[test]
	fn glow_wraps_only_the_edges() {
		let mut s = state();
		s.set_glow(true);
		let ops = frame(&s);
		assert_eq!(ops[1], Op::GlowOn);
		assert_eq!(ops[5], Op::GlowOff);
		assert_eq!(ops.iter().filter(|op| **op == Op::GlowOn).count(), 1);
	}

	#[test]
	fn hovered_node_gets_a_label_chip() {
		let mut s = state();
		s.set_glow(false);
		s.pointer_move(Point::new(301.0, 99.0));
		let ops = frame(&s);

		let tail = &ops[ops.len() - 4..];
		assert_eq!(
			tail,
			&[
				Op::Font,
				Op::Rect(LABEL_BG.into()),
				Op::Border,
				Op::Text("Library".into(), 300.0 + LABEL_OFFSET + LABEL_PAD, 104.0),
			]
		);
		let texts = ops.iter().filter(|op| matches!(op, Op::Text(..))).count();
		assert_eq!(texts, 1);
	}

	#[test]
	fn hovered_handle_is_highlighted_without_label() {
		let mut s = state();
		s.set_glow(false);
		s.pointer_move(Point::new(200.0, 100.0));
		let ops = frame(&s);
		assert!(ops.contains(&Op::Diamond(
			Point::new(200.0, 100.0),
			HANDLE_HOVER_COLOR.into()
		)));
		assert!(!ops.iter().any(|op| matches!(op, Op::Text(..))));
	}

	#[test]
	fn zero_area_surface_paints_nothing() {
		let mut s = state();
		s.resize(0.0, 300.0);
		assert!(frame(&s).is_empty());
	}

	#[test]
	fn empty_graph_paints_background_only() {
		let config = GraphConfig::default();
		let mut s = LinkGraphState::from_positions(&[], Vec::new(), &config, 640.0, 480.0);
		assert!(s.glow);
		assert_eq!(frame(&s), vec![Op::Rect(BACKGROUND.into())]);
		s.set_glow(false);
		assert_eq!(frame(&s), vec![Op::Rect(BACKGROUND.into())]);
	}

	#[test]
	fn lone_node_skips_the_glow_pass() {
		let links = [SiteLink::new("About", "/about")];
		let positions = vec![Point::new(320.0, 240.0)];
		let config = GraphConfig::default();
		let s = LinkGraphState::from_positions(&links, positions, &config, 640.0, 480.0);
		assert_eq!(
			frame(&s),
			vec![
				Op::Rect(BACKGROUND.into()),
				Op::Circle(Point::new(320.0, 240.0))
			]
		);
	}
}
