//! Cell: The atomic unit of the display grid.
//!
//! # Memory Layout
//!
//! A cell is a small `Copy` value so that the grid can hold all of its
//! 262,144 cells in one contiguous allocation:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Cell Layout (8 bytes)                      │
//! ├───────────┬──────────┬──────────┬───────────┤
//! │    ch     │   kind   │ pixel_on │  padding  │
//! │   char    │    u8    │   bool   │  [u8; 2]  │
//! │  4 bytes  │  1 byte  │  1 byte  │  2 bytes  │
//! └───────────┴──────────┴──────────┴───────────┘
//! ```
//!
//! Every field is always present; [`CellKind`] decides which of them are
//! meaningful. A Pixel cell is rendered from `pixel_on`, a Text cell from
//! `ch`, and an Empty cell from neither.

/// How a cell is interpreted when the grid is serialized.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellKind {
    /// Nothing drawn; rendered with the empty glyph.
    #[default]
    Empty = 0,
    /// An on/off pixel; rendered with the pixel or empty glyph.
    Pixel = 1,
    /// A literal character; rendered verbatim.
    Text = 2,
}

/// A single grid cell.
///
/// Cells are plain values: the grid hands out copies, never references
/// into its storage.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Display character. Written for Pixel cells as a convenience,
    /// authoritative only for Text cells.
    ch: char,
    /// Interpretation tag.
    kind: CellKind,
    /// Lit state. Authoritative only for Pixel cells.
    pixel_on: bool,
    /// Padding to reach 8 bytes.
    _padding: [u8; 2],
}

// Compile-time assertion: Cell must stay 8 bytes
const _: () = assert!(
    std::mem::size_of::<Cell>() == 8,
    "Cell must be exactly 8 bytes"
);

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// The empty cell: kind `Empty`, pixel off, a space character.
    pub const EMPTY: Self = Self {
        ch: ' ',
        kind: CellKind::Empty,
        pixel_on: false,
        _padding: [0, 0],
    };

    /// Character cached on a lit pixel cell.
    pub const PIXEL_ON_CHAR: char = '#';

    /// Character cached on an unlit pixel cell.
    pub const PIXEL_OFF_CHAR: char = ' ';

    /// Create a pixel cell.
    #[inline]
    pub const fn pixel(on: bool) -> Self {
        Self {
            ch: if on { Self::PIXEL_ON_CHAR } else { Self::PIXEL_OFF_CHAR },
            kind: CellKind::Pixel,
            pixel_on: on,
            _padding: [0, 0],
        }
    }

    /// Create a text cell.
    ///
    /// `pixel_on` is set for any non-space character so that callers
    /// inspecting it generically see a "lit" cell.
    #[inline]
    pub const fn text(ch: char) -> Self {
        Self {
            ch,
            kind: CellKind::Text,
            pixel_on: ch != ' ',
            _padding: [0, 0],
        }
    }

    /// Get the interpretation tag.
    #[inline]
    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    /// Get the stored character.
    #[inline]
    pub const fn ch(&self) -> char {
        self.ch
    }

    /// Get the stored pixel state.
    #[inline]
    pub const fn pixel_on(&self) -> bool {
        self.pixel_on
    }

    /// Check if this is an empty cell.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self.kind, CellKind::Empty)
    }

    /// Check if this is a pixel cell.
    #[inline]
    pub const fn is_pixel(&self) -> bool {
        matches!(self.kind, CellKind::Pixel)
    }

    /// Check if this is a text cell.
    #[inline]
    pub const fn is_text(&self) -> bool {
        matches!(self.kind, CellKind::Text)
    }

    /// The character this cell serializes to under the given glyph mapping.
    ///
    /// Pixel cells ignore their cached character; Text cells ignore the
    /// mapping.
    #[inline]
    pub const fn glyph(&self, pixel_char: char, empty_char: char) -> char {
        match self.kind {
            CellKind::Pixel => {
                if self.pixel_on {
                    pixel_char
                } else {
                    empty_char
                }
            }
            CellKind::Text => self.ch,
            CellKind::Empty => empty_char,
        }
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("kind", &self.kind)
            .field("pixel_on", &self.pixel_on)
            .field("ch", &self.ch)
            .finish_non_exhaustive()
    }
}
