mod component;
mod config;
mod hit;
mod interaction;
mod model;
mod render;
mod simulate;
mod state;
mod surface;
mod types;

pub use component::{LinkGraphCanvas, navigate_full_page};
pub use config::GraphConfig;
pub use hit::HitTester;
pub use interaction::{DragState, InteractionController};
pub use model::GraphModel;
pub use simulate::LayoutSimulator;
pub use state::{GraphSnapshot, LinkGraphState, NodeView};
pub use types::{Edge, Hit, Node, Point, SiteLink};
