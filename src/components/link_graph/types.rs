use std::ops::{Add, AddAssign, Mul, Sub};

/// A position or offset in surface-local logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance_sq(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		dx * dx + dy * dy
	}

	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y).sqrt()
	}

	pub fn midpoint(self, other: Point) -> Point {
		Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl AddAssign for Point {
	fn add_assign(&mut self, rhs: Point) {
		self.x += rhs.x;
		self.y += rhs.y;
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Point {
	type Output = Point;

	fn mul(self, k: f64) -> Point {
		Point::new(self.x * k, self.y * k)
	}
}

/// One entry of the site map: what to show and where it goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteLink {
	pub label: String,
	pub route: String,
}

impl SiteLink {
	pub fn new(label: impl Into<String>, route: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			route: route.into(),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: usize,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub label: String,
	pub route: String,
}

impl Node {
	pub fn pos(&self) -> Point {
		Point::new(self.x, self.y)
	}

	pub fn set_pos(&mut self, p: Point) {
		self.x = p.x;
		self.y = p.y;
	}
}

/// Undirected connection between two nodes, by index into the node list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	pub a: usize,
	pub b: usize,
}

impl Edge {
	pub fn connects(&self, i: usize, j: usize) -> bool {
		(self.a == i && self.b == j) || (self.a == j && self.b == i)
	}

	pub fn midpoint(&self, nodes: &[Node]) -> Point {
		nodes[self.a].pos().midpoint(nodes[self.b].pos())
	}
}

/// What sits under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
	/// The midpoint handle of the edge at this index.
	EdgeHandle(usize),
	/// The node at this index.
	Node(usize),
}
