//! Board topology: step indices to grid cells, and safe squares.
//!
//! Pure functions over compile-time tables. Nothing here reads game state,
//! so any number of readers can call into it concurrently.

pub mod coord;
pub mod layout;
pub mod path;
pub mod safe;

pub use coord::{Coord, GRID_SIZE};
pub use layout::{anchor_of, base_slot, house_origin, HOUSE_SIZE};
pub use path::{coordinate_of, path_of, CANONICAL_PATH, GLOBE_STEP, PATHS};
pub use safe::{is_safe, SAFE_SQUARES};
