//! Scene types.
//!
//! Responsibilities:
//! - define the [`Drawable`] capability (update + render)
//! - keep drawables in paint order (insertion order, later on top)
//! - keep shape-specific geometry isolated per file under `scene::shapes`

mod drawable;
mod list;

pub mod shapes;

pub use drawable::Drawable;
pub use list::Scene;
pub use shapes::{Polygon, Triangle};
