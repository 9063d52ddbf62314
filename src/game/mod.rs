//! Gameplay simulation.
//!
//! A bird steered by flaps or by a continuous position signal flies through
//! a stream of scrolling pipe pairs. Passing a pair scores a point; touching a
//! pipe or the ground ends the run.

pub mod bird;
pub mod geometry;
pub mod ground;
pub mod pipes;
pub mod session;

pub use bird::{playable_bottom, target_from_value, Bird};
pub use geometry::Rect;
pub use ground::Ground;
pub use pipes::{gap_bounds, GapBounds, PipeManager, PipePair};
pub use session::{RenderFrame, Scene, Session, TickEvent, TickResult};
