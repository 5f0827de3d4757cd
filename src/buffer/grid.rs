//! Grid: The fixed-size surface of cells.
//!
//! The grid uses one contiguous allocation, stored in row-major order.
//! Every operation is total: writes outside the grid are ignored and reads
//! outside the grid return [`Cell::EMPTY`].

use super::cell::Cell;
use super::glyphs::Glyphs;
use log::{debug, trace};
use std::io::Write;

/// Grid width in columns.
pub const WIDTH: usize = 512;

/// Grid height in rows.
pub const HEIGHT: usize = 512;

/// Number of characters in a serialized grid, line terminators included.
pub const SERIALIZED_LEN: usize = (WIDTH + 1) * HEIGHT;

/// A `WIDTH` x `HEIGHT` grid of pixel and text cells.
///
/// Cells live in a single `Vec` addressed as `index = y * WIDTH + x`.
/// The length is fixed at construction and never changes.
///
/// Coordinates are signed so that callers can pass any integer; anything
/// outside `[0, WIDTH) x [0, HEIGHT)` is handled by the out-of-range policy
/// of each operation rather than by an error.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create a new grid with every cell empty.
    pub fn new() -> Self {
        let grid = Self {
            cells: vec![Cell::EMPTY; WIDTH * HEIGHT],
        };
        debug!(
            "allocated {}x{} grid ({} bytes)",
            WIDTH,
            HEIGHT,
            grid.memory_usage()
        );
        grid
    }

    /// Get the grid width.
    #[inline]
    pub const fn width(&self) -> usize {
        WIDTH
    }

    /// Get the grid height.
    #[inline]
    pub const fn height(&self) -> usize {
        HEIGHT
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Column for `x`, if it lies on the grid.
    #[inline]
    fn column(x: i32) -> Option<usize> {
        usize::try_from(x).ok().filter(|&col| col < WIDTH)
    }

    /// Row for `y`, if it lies on the grid.
    #[inline]
    fn row(y: i32) -> Option<usize> {
        usize::try_from(y).ok().filter(|&row| row < HEIGHT)
    }

    /// Convert (x, y) coordinates to a linear index.
    #[inline]
    fn index_of(x: i32, y: i32) -> Option<usize> {
        Some(Self::row(y)? * WIDTH + Self::column(x)?)
    }

    /// Check whether (x, y) lies on the grid.
    #[inline]
    pub fn in_bounds(x: i32, y: i32) -> bool {
        Self::index_of(x, y).is_some()
    }

    /// Reset every cell to [`Cell::EMPTY`].
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
        trace!("grid cleared");
    }

    /// Make the cell at (x, y) a pixel in the given state.
    ///
    /// Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some(idx) = Self::index_of(x, y) {
            self.cells[idx] = Cell::pixel(on);
        }
    }

    /// Light the pixel at (x, y). Shorthand for `set_pixel(x, y, true)`.
    #[inline]
    pub fn plot(&mut self, x: i32, y: i32) {
        self.set_pixel(x, y, true);
    }

    /// Make the cell at (x, y) show `ch`.
    ///
    /// Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn set_text(&mut self, x: i32, y: i32, ch: char) {
        if let Some(idx) = Self::index_of(x, y) {
            self.cells[idx] = Cell::text(ch);
        }
    }

    /// Write `s` horizontally, one character per column, starting at (x, y).
    ///
    /// The row check is all-or-nothing: if `y` is off the grid nothing is
    /// written. Columns are clipped per character: characters left of
    /// column 0 are dropped, characters right of the last column are
    /// truncated, and the visible part is still written.
    pub fn set_text_string(&mut self, x: i32, y: i32, s: &str) {
        let Some(row) = Self::row(y) else {
            trace!("set_text_string: row {y} off grid, {} bytes dropped", s.len());
            return;
        };

        // Characters that would land left of column 0.
        let (start, skip) = match usize::try_from(x) {
            Ok(col) => (col, 0),
            Err(_) => (
                0,
                usize::try_from(x.unsigned_abs()).unwrap_or(usize::MAX),
            ),
        };
        let room = WIDTH.saturating_sub(start);
        let base = row * WIDTH;

        let mut written = 0;
        for (col, ch) in (start..).zip(s.chars().skip(skip).take(room)) {
            self.cells[base + col] = Cell::text(ch);
            written += 1;
        }

        if log::log_enabled!(log::Level::Trace) {
            let total = s.chars().count();
            if written < total {
                trace!(
                    "set_text_string: clipped {} of {} chars at ({x}, {y})",
                    total - written,
                    total
                );
            }
        }
    }

    /// Make every cell a pixel in the given state.
    pub fn fill_pixels(&mut self, on: bool) {
        self.cells.fill(Cell::pixel(on));
        trace!("grid filled with pixels (on = {on})");
    }

    /// Get a copy of the cell at (x, y).
    ///
    /// Out-of-bounds coordinates yield [`Cell::EMPTY`].
    #[inline]
    pub fn get_cell(&self, x: i32, y: i32) -> Cell {
        Self::index_of(x, y).map_or(Cell::EMPTY, |idx| self.cells[idx])
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(WIDTH)
    }

    /// Serialize the grid using the given glyph mapping.
    ///
    /// The result is `HEIGHT` lines of exactly `WIDTH` characters, each
    /// terminated by `'\n'`, for [`SERIALIZED_LEN`] characters in total.
    pub fn to_string_with(&self, glyphs: Glyphs) -> String {
        let mut out = String::with_capacity(SERIALIZED_LEN);
        for row in self.rows() {
            out.extend(row.iter().map(|cell| cell.glyph(glyphs.pixel, glyphs.empty)));
            out.push('\n');
        }
        out
    }

    /// Write the default serialization to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn render<W: Write>(&self, sink: &mut W) -> std::io::Result<()> {
        self.render_with(sink, Glyphs::DEFAULT)
    }

    /// Write the serialization under `glyphs` to `sink` in a single write.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn render_with<W: Write>(&self, sink: &mut W, glyphs: Glyphs) -> std::io::Result<()> {
        let text = self.to_string_with(glyphs);
        sink.write_all(text.as_bytes())?;
        sink.flush()?;
        debug!("rendered grid ({} bytes)", text.len());
        Ok(())
    }

    /// Get memory usage in bytes (approximate).
    pub fn memory_usage(&self) -> usize {
        self.cells.len() * std::mem::size_of::<Cell>() + std::mem::size_of::<Self>()
    }
}

impl std::fmt::Display for Grid {
    /// Serialize with the default glyphs (`'#'` lit, `' '` blank).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_string_with(Glyphs::DEFAULT))
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pixels = self.cells.iter().filter(|c| c.is_pixel()).count();
        let text = self.cells.iter().filter(|c| c.is_text()).count();
        f.debug_struct("Grid")
            .field("width", &WIDTH)
            .field("height", &HEIGHT)
            .field("pixel_cells", &pixels)
            .field("text_cells", &text)
            .field("memory_bytes", &self.memory_usage())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::CellKind;

    const W: i32 = WIDTH as i32;
    const H: i32 = HEIGHT as i32;

    fn blank_line(ch: char) -> String {
        std::iter::repeat(ch).take(WIDTH).collect()
    }

    #[test]
    fn test_grid_new() {
        let grid = Grid::new();
        assert_eq!(grid.width(), 512);
        assert_eq!(grid.height(), 512);
        assert_eq!(grid.cells().len(), 262_144);
        assert!(grid.cells().iter().all(|c| *c == Cell::EMPTY));
    }

    #[test]
    fn test_grid_set_pixel() {
        let mut grid = Grid::new();
        grid.set_pixel(3, 7, true);
        let cell = grid.get_cell(3, 7);
        assert_eq!(cell.kind(), CellKind::Pixel);
        assert!(cell.pixel_on());

        grid.set_pixel(3, 7, false);
        let cell = grid.get_cell(3, 7);
        assert_eq!(cell.kind(), CellKind::Pixel);
        assert!(!cell.pixel_on());
    }

    #[test]
    fn test_grid_set_pixel_corners() {
        let mut grid = Grid::new();
        for (x, y) in [(0, 0), (W - 1, 0), (0, H - 1), (W - 1, H - 1)] {
            grid.set_pixel(x, y, true);
            assert!(grid.get_cell(x, y).pixel_on(), "corner ({x}, {y})");
        }
    }

    #[test]
    fn test_grid_plot() {
        let mut grid = Grid::new();
        grid.plot(10, 20);
        assert_eq!(grid.get_cell(10, 20), Cell::pixel(true));
    }

    #[test]
    fn test_grid_out_of_bounds_writes_ignored() {
        let mut grid = Grid::new();
        for (x, y) in [(-1, 0), (0, -1), (W, 0), (0, H), (i32::MIN, i32::MAX)] {
            grid.set_pixel(x, y, true);
            grid.set_text(x, y, 'X');
            assert_eq!(grid.get_cell(x, y), Cell::EMPTY);
        }
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn test_grid_out_of_bounds_read_is_empty() {
        let mut grid = Grid::new();
        grid.fill_pixels(true);
        assert!(Grid::in_bounds(W - 1, H - 1));
        assert!(!Grid::in_bounds(-1, 0));
        assert_eq!(grid.get_cell(-1, 0), Cell::EMPTY);
        assert_eq!(grid.get_cell(W, 0), Cell::EMPTY);
        assert_eq!(grid.get_cell(0, H), Cell::EMPTY);
    }

    #[test]
    fn test_grid_set_text() {
        let mut grid = Grid::new();
        grid.set_text(5, 5, 'Q');
        let cell = grid.get_cell(5, 5);
        assert_eq!(cell.kind(), CellKind::Text);
        assert_eq!(cell.ch(), 'Q');
        assert!(cell.pixel_on());

        grid.set_text(5, 5, ' ');
        assert!(!grid.get_cell(5, 5).pixel_on());
    }

    #[test]
    fn test_grid_set_text_string() {
        let mut grid = Grid::new();
        grid.set_text_string(0, 0, "HELLO");
        for (x, expected) in "HELLO".chars().enumerate() {
            let cell = grid.get_cell(x as i32, 0);
            assert!(cell.is_text());
            assert_eq!(cell.ch(), expected);
        }
        assert_eq!(grid.get_cell(5, 0), Cell::EMPTY);
    }

    #[test]
    fn test_grid_set_text_string_fully_left_of_grid() {
        let mut grid = Grid::new();
        grid.set_pixel(0, 0, true);
        grid.set_text_string(-2, 0, "AB");
        assert_eq!(grid.get_cell(0, 0), Cell::pixel(true));
        assert_eq!(grid.get_cell(1, 0), Cell::EMPTY);
    }

    #[test]
    fn test_grid_set_text_string_clips_left() {
        let mut grid = Grid::new();
        grid.set_text_string(-2, 3, "ABCD");
        assert_eq!(grid.get_cell(0, 3).ch(), 'C');
        assert_eq!(grid.get_cell(1, 3).ch(), 'D');
        assert_eq!(grid.get_cell(2, 3), Cell::EMPTY);
    }

    #[test]
    fn test_grid_set_text_string_truncates_right() {
        let mut grid = Grid::new();
        grid.set_text_string(W - 2, 4, "XYZ");
        assert_eq!(grid.get_cell(W - 2, 4).ch(), 'X');
        assert_eq!(grid.get_cell(W - 1, 4).ch(), 'Y');
        // Nothing wraps onto the next row.
        assert_eq!(grid.get_cell(0, 5), Cell::EMPTY);
    }

    #[test]
    fn test_grid_set_text_string_start_past_right_edge() {
        let mut grid = Grid::new();
        grid.set_text_string(W, 0, "abc");
        grid.set_text_string(i32::MAX, 0, "abc");
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn test_grid_set_text_string_extreme_left() {
        let mut grid = Grid::new();
        grid.set_text_string(i32::MIN, 0, "abc");
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn test_grid_set_text_string_bad_row() {
        let mut grid = Grid::new();
        grid.set_text_string(0, -1, "X");
        grid.set_text_string(0, H, "X");
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn test_grid_set_text_string_unicode() {
        let mut grid = Grid::new();
        grid.set_text_string(0, 0, "héllo");
        assert_eq!(grid.get_cell(1, 0).ch(), 'é');
        assert_eq!(grid.get_cell(4, 0).ch(), 'o');
    }

    #[test]
    fn test_grid_fill_pixels() {
        let mut grid = Grid::new();
        grid.fill_pixels(true);
        assert!(grid.cells().iter().all(|c| *c == Cell::pixel(true)));
        grid.fill_pixels(false);
        assert!(grid.cells().iter().all(|c| *c == Cell::pixel(false)));
    }

    #[test]
    fn test_grid_clear() {
        let mut grid = Grid::new();
        grid.fill_pixels(true);
        grid.set_text(1, 1, 'x');
        grid.clear();
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn test_grid_clear_serializes_blank() {
        let mut grid = Grid::new();
        grid.set_text_string(0, 0, "noise");
        grid.clear();
        let text = grid.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), HEIGHT);
        let blank = blank_line(' ');
        assert!(lines.iter().all(|line| *line == blank));
    }

    #[test]
    fn test_grid_fill_serializes_pixel_char() {
        let mut grid = Grid::new();
        grid.fill_pixels(true);
        let text = grid.to_string_with(Glyphs::new('#', ' '));
        let full = blank_line('#');
        assert_eq!(text.lines().count(), HEIGHT);
        assert!(text.lines().all(|line| line == full));
    }

    #[test]
    fn test_grid_serialize_mapping() {
        let mut grid = Grid::new();
        grid.set_pixel(0, 0, true);
        grid.set_pixel(1, 0, false);
        grid.set_text(2, 0, 'T');
        let text = grid.to_string_with(Glyphs::new('@', '.'));
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("@.T."));
    }

    #[test]
    fn test_grid_serialize_ignores_cached_pixel_char() {
        let mut grid = Grid::new();
        grid.set_pixel(0, 0, true);
        let text = grid.to_string_with(Glyphs::new('*', '-'));
        assert!(text.starts_with("*-"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn test_grid_serialize_length() {
        let mut grid = Grid::new();
        assert_eq!(grid.to_string().chars().count(), SERIALIZED_LEN);
        grid.fill_pixels(true);
        grid.set_text_string(100, 100, "mixed state");
        let text = grid.to_string_with(Glyphs::new('x', 'o'));
        assert_eq!(text.chars().count(), SERIALIZED_LEN);
        assert!(text.ends_with('\n'));
        assert_eq!(text.matches('\n').count(), HEIGHT);
    }

    #[test]
    fn test_grid_serialize_idempotent() {
        let mut grid = Grid::new();
        grid.set_text_string(3, 9, "same");
        grid.set_pixel(40, 40, true);
        assert_eq!(grid.to_string(), grid.to_string());
    }

    #[test_log::test]
    fn test_grid_render() {
        let mut grid = Grid::new();
        grid.set_text_string(0, 0, "hi");
        let mut sink = Vec::new();
        grid.render(&mut sink).unwrap();
        assert_eq!(sink, grid.to_string().into_bytes());
    }

    #[test_log::test]
    fn test_grid_render_with_glyphs() {
        let mut grid = Grid::new();
        grid.fill_pixels(false);
        let mut sink = Vec::new();
        grid.render_with(&mut sink, Glyphs::new('#', '.')).unwrap();
        assert_eq!(sink.len(), SERIALIZED_LEN);
        assert!(sink.iter().all(|&b| b == b'.' || b == b'\n'));
    }

    #[test]
    fn test_grid_memory_usage() {
        let grid = Grid::new();
        // 262,144 cells * 8 bytes, plus overhead
        assert!(grid.memory_usage() >= 2_097_152);
        assert!(grid.memory_usage() < 2_200_000);
    }
}
