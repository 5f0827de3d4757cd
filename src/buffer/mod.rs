//! Buffer module: The display grid and its cells.
//!
//! This module contains:
//! - [`Cell`]: The atomic unit of display, tagged by [`CellKind`]
//! - [`Grid`]: The fixed `WIDTH` x `HEIGHT` surface of cells
//! - [`Glyphs`]: The character mapping used for serialization

mod cell;
mod glyphs;
mod grid;

pub use cell::{Cell, CellKind};
pub use glyphs::Glyphs;
pub use grid::{Grid, HEIGHT, SERIALIZED_LEN, WIDTH};
