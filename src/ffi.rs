//! C Foreign Function Interface (FFI) for the display grid.
//!
//! This module provides a C-compatible API for using the grid from
//! other programming languages. All functions are `extern "C"` with
//! stable ABI.
//!
//! # Safety
//!
//! Handle pointers must either be null or come from
//! [`console_display_new`] and not yet be destroyed. Null handles are
//! tolerated: mutators do nothing, queries return zero or an error code.
//!
//! # Encoding
//!
//! The C side sees one byte per cell. Every byte passed in, single
//! characters and strings alike, is read as Latin-1, so no input is ever
//! rejected. Serialized output is one byte per character: exactly
//! [`SERIALIZED_LEN`] bytes plus a NUL terminator. Characters above
//! U+00FF, which only the Rust API can store, serialize as `'?'`.
//!
//! # Example (C)
//!
//! ```c
//! #include "console_display.h"
//!
//! int main() {
//!     ConsoleDisplay* display = console_display_new();
//!     if (!display) return 1;
//!
//!     console_display_set_text_string(display, 0, 0, "Hello from C!");
//!     console_display_set_pixel(display, 0, 1, true);
//!     console_display_render_stdout(display);
//!
//!     console_display_destroy(display);
//!     return 0;
//! }
//! ```

// FFI modules intentionally use unsafe and no_mangle
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::missing_safety_doc)]
#![allow(clippy::not_unsafe_ptr_arg_deref)]

use crate::buffer::{CellKind, Glyphs, Grid, HEIGHT, SERIALIZED_LEN, WIDTH};
use log::warn;
use std::ffi::CStr;
use std::io::Write;
use std::os::raw::{c_char, c_int};
use std::ptr;

// =============================================================================
// Opaque Handle Types
// =============================================================================

/// Opaque handle to a display grid.
pub struct ConsoleDisplay(Grid);

// =============================================================================
// Result and Data Types
// =============================================================================

/// Result codes for FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayResult {
    /// Operation succeeded.
    Ok = 0,
    /// Null pointer passed.
    NullPointer = 1,
    /// I/O error while writing to the output sink.
    IoError = 2,
    /// Caller-supplied buffer cannot hold the result.
    BufferTooSmall = 3,
}

/// Cell kind as seen from C.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCellKind {
    /// Nothing drawn.
    Empty = 0,
    /// On/off pixel.
    Pixel = 1,
    /// Literal character.
    Text = 2,
}

impl From<CellKind> for DisplayCellKind {
    fn from(kind: CellKind) -> Self {
        match kind {
            CellKind::Empty => Self::Empty,
            CellKind::Pixel => Self::Pixel,
            CellKind::Text => Self::Text,
        }
    }
}

/// Copy of a grid cell.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayCell {
    /// Interpretation tag.
    pub kind: DisplayCellKind,
    /// Pixel state (meaningful for `Pixel` cells).
    pub pixel_on: bool,
    /// Unicode scalar value of the stored character.
    pub ch: u32,
}

/// Byte written for characters outside Latin-1.
const UNMAPPABLE: u8 = b'?';

/// Read a C character as Latin-1.
#[inline]
const fn latin1_char(c: c_char) -> char {
    c as u8 as char
}

/// Serialize the grid with one byte per character.
fn latin1_bytes(grid: &Grid, glyphs: Glyphs) -> Vec<u8> {
    let mut out = Vec::with_capacity(SERIALIZED_LEN);
    for row in grid.rows() {
        out.extend(row.iter().map(|cell| {
            u8::try_from(u32::from(cell.glyph(glyphs.pixel, glyphs.empty))).unwrap_or(UNMAPPABLE)
        }));
        out.push(b'\n');
    }
    out
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Create a new display grid with every cell empty.
#[unsafe(no_mangle)]
pub extern "C" fn console_display_new() -> *mut ConsoleDisplay {
    Box::into_raw(Box::new(ConsoleDisplay(Grid::new())))
}

/// Destroy a display grid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn console_display_destroy(display: *mut ConsoleDisplay) {
    if !display.is_null() {
        drop(Box::from_raw(display));
    }
}

/// Get the grid width.
#[unsafe(no_mangle)]
pub extern "C" fn console_display_width() -> c_int {
    c_int::try_from(WIDTH).unwrap_or(c_int::MAX)
}

/// Get the grid height.
#[unsafe(no_mangle)]
pub extern "C" fn console_display_height() -> c_int {
    c_int::try_from(HEIGHT).unwrap_or(c_int::MAX)
}

// =============================================================================
// Mutation
// =============================================================================

/// Reset every cell to empty.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn console_display_clear(display: *mut ConsoleDisplay) {
    if !display.is_null() {
        (*display).0.clear();
    }
}

/// Set the cell at (x, y) to a pixel. Out-of-bounds is ignored.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn console_display_set_pixel(
    display: *mut ConsoleDisplay,
    x: c_int,
    y: c_int,
    on: bool,
) {
    if !display.is_null() {
        (*display).0.set_pixel(x, y, on);
    }
}

/// Set the cell at (x, y) to a character. Out-of-bounds is ignored.
///
/// The byte is interpreted as Latin-1.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn console_display_set_text(
    display: *mut ConsoleDisplay,
    x: c_int,
    y: c_int,
    c: c_char,
) {
    if !display.is_null() {
        (*display).0.set_text(x, y, latin1_char(c));
    }
}

/// Write a NUL-terminated string horizontally starting at (x, y).
///
/// Each byte is one Latin-1 character. Clipping follows
/// [`Grid::set_text_string`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn console_display_set_text_string(
    display: *mut ConsoleDisplay,
    x: c_int,
    y: c_int,
    text: *const c_char,
) -> DisplayResult {
    if display.is_null() || text.is_null() {
        warn!("console_display_set_text_string: null pointer");
        return DisplayResult::NullPointer;
    }

    let text: String = CStr::from_ptr(text)
        .to_bytes()
        .iter()
        .map(|&b| char::from(b))
        .collect();

    (*display).0.set_text_string(x, y, &text);
    DisplayResult::Ok
}

/// Make every cell a pixel in the given state.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn console_display_fill_pixels(display: *mut ConsoleDisplay, on: bool) {
    if !display.is_null() {
        (*display).0.fill_pixels(on);
    }
}

// =============================================================================
// Query and Serialization
// =============================================================================

/// Copy the cell at (x, y) into `cell_out`.
///
/// Out-of-bounds coordinates yield the empty cell.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn console_display_get_cell(
    display: *const ConsoleDisplay,
    x: c_int,
    y: c_int,
    cell_out: *mut DisplayCell,
) -> DisplayResult {
    if display.is_null() || cell_out.is_null() {
        warn!("console_display_get_cell: null pointer");
        return DisplayResult::NullPointer;
    }

    let cell = (*display).0.get_cell(x, y);
    *cell_out = DisplayCell {
        kind: cell.kind().into(),
        pixel_on: cell.pixel_on(),
        ch: u32::from(cell.ch()),
    };
    DisplayResult::Ok
}

/// Serialize the grid into a caller-supplied buffer as a NUL-terminated
/// Latin-1 string.
///
/// The required size in bytes, always `SERIALIZED_LEN + 1`, is stored in
/// `required_out` when it is non-null. Pass a null `buf` to query the size.
/// Nothing is written when `capacity` is too small.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn console_display_to_string(
    display: *const ConsoleDisplay,
    pixel_char: c_char,
    empty_char: c_char,
    buf: *mut c_char,
    capacity: usize,
    required_out: *mut usize,
) -> DisplayResult {
    if display.is_null() {
        warn!("console_display_to_string: null display");
        return DisplayResult::NullPointer;
    }

    let glyphs = Glyphs::new(latin1_char(pixel_char), latin1_char(empty_char));
    let text = latin1_bytes(&(*display).0, glyphs);
    let required = text.len() + 1;

    if !required_out.is_null() {
        *required_out = required;
    }
    if buf.is_null() || capacity < required {
        return DisplayResult::BufferTooSmall;
    }

    ptr::copy_nonoverlapping(text.as_ptr(), buf.cast::<u8>(), text.len());
    *buf.add(text.len()) = 0;
    DisplayResult::Ok
}

/// Write the default serialization to standard output, one byte per
/// character.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn console_display_render_stdout(
    display: *const ConsoleDisplay,
) -> DisplayResult {
    if display.is_null() {
        warn!("console_display_render_stdout: null display");
        return DisplayResult::NullPointer;
    }

    let text = latin1_bytes(&(*display).0, Glyphs::DEFAULT);
    let mut stdout = std::io::stdout().lock();
    match stdout.write_all(&text).and_then(|()| stdout.flush()) {
        Ok(()) => DisplayResult::Ok,
        Err(err) => {
            warn!("console_display_render_stdout: {err}");
            DisplayResult::IoError
        }
    }
}

// =============================================================================
// Version Information
// =============================================================================

/// Get the library version string.
#[unsafe(no_mangle)]
pub extern "C" fn console_display_version() -> *const c_char {
    static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr().cast::<c_char>()
}
