//! # Console Display
//!
//! A fixed-size character/pixel grid that serializes to plain text.
//!
//! The grid is a 512x512 surface of cells. Each cell is either empty, an
//! on/off pixel, or a literal character, and the whole grid can be turned
//! into 512 lines of 512 characters for printing.
//!
//! ## Core Concepts
//!
//! - **Total operations**: out-of-range writes are ignored, out-of-range
//!   reads return an empty cell; nothing in the grid API fails
//! - **Caller-chosen glyphs**: pixels serialize through a [`Glyphs`] mapping,
//!   text cells always serialize verbatim
//! - **C ABI**: the [`ffi`] module exposes the grid to other languages
//!
//! ## Example
//!
//! ```rust
//! use console_display::{Glyphs, Grid};
//!
//! let mut grid = Grid::new();
//! grid.set_pixel(0, 0, true);
//! grid.set_text_string(2, 0, "hi");
//!
//! let text = grid.to_string_with(Glyphs::new('#', '.'));
//! assert!(text.starts_with("#.hi."));
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod ffi;

// Re-exports for convenience
pub use buffer::{Cell, CellKind, Glyphs, Grid, HEIGHT, SERIALIZED_LEN, WIDTH};
