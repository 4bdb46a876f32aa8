/// Tuning values for layout, physics and pointer handling.
///
/// None of these are load-bearing beyond "looks reasonable"; the defaults
/// are what the landing page ships with.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
	/// Logical size of the area nodes are first scattered in.
	pub seed_width: f64,
	pub seed_height: f64,
	/// Distance kept clear of each seeding edge.
	pub seed_inset_x: f64,
	pub seed_inset_y: f64,
	/// How many nearest neighbours each node is wired to.
	pub neighbors: usize,
	/// Pull toward the surface center.
	pub spring: f64,
	pub time_scale: f64,
	/// Velocity multiplier applied after every step.
	pub friction: f64,
	/// Upper bound on a single frame's `dt`, in milliseconds.
	pub max_frame_ms: f64,
	/// Hookean pull along each edge toward `edge_length`. Zero disables it.
	pub edge_spring: f64,
	pub edge_length: f64,
	pub handle_radius: f64,
	pub node_radius: f64,
	/// Largest per-axis pointer travel that still counts as a click.
	pub click_slop: f64,
	/// Fraction of the pointer-to-midpoint offset applied to each endpoint
	/// while an edge is dragged.
	pub edge_drag_share: f64,
	pub max_pixel_ratio: f64,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			seed_width: 800.0,
			seed_height: 480.0,
			seed_inset_x: 120.0,
			seed_inset_y: 100.0,
			neighbors: 2,
			spring: 0.015,
			time_scale: 0.0006,
			friction: 0.9,
			max_frame_ms: 32.0,
			edge_spring: 0.15,
			edge_length: 90.0,
			handle_radius: 18.0,
			node_radius: 16.0,
			click_slop: 4.0,
			edge_drag_share: 0.5,
			max_pixel_ratio: 2.0,
		}
	}
}
