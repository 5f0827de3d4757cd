//! Glyphs: The character mapping used when serializing pixel cells.

/// Characters used for lit pixels and for blank cells.
///
/// Text cells are never affected by this mapping; they always serialize
/// as their stored character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyphs {
    /// Character for a lit pixel.
    pub pixel: char,
    /// Character for an unlit pixel or an empty cell.
    pub empty: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Glyphs {
    /// `'#'` for lit pixels, `' '` for everything blank.
    pub const DEFAULT: Self = Self::new('#', ' ');

    /// Create a new mapping.
    #[inline]
    pub const fn new(pixel: char, empty: char) -> Self {
        Self { pixel, empty }
    }
}
