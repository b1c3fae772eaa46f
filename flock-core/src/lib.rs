pub mod animation;
pub mod color;
pub mod gesture;
pub mod mapper;

pub use animation::LoopState;
pub use gesture::{BirdBurst, Command, GestureController, InteractionMode};
pub use mapper::{CssBox, SurfaceGeometry};
