//! Render descriptors
//!
//! Turns game state into draw requests and packed instances. Pixels are the
//! embedding application's job.

pub mod draw;
pub mod instance;

pub use draw::{DrawKind, DrawRequest, draw_list};
pub use instance::{DrawInstance, instance_bytes};
