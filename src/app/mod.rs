pub mod bootstrap;
pub mod controller;

pub use bootstrap::{run, RunOptions};
pub use controller::{GridController, RenderPass};
