//! Grid demo: Draw a framed scene and print the whole grid.
//!
//! Run with `RUST_LOG=debug` to see the grid's log output.

use console_display::{Glyphs, Grid, HEIGHT, WIDTH};
use log::info;

#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
const W: i32 = WIDTH as i32;
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
const H: i32 = HEIGHT as i32;

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut grid = Grid::new();

    // Frame
    for x in 0..W {
        grid.plot(x, 0);
        grid.plot(x, H - 1);
    }
    for y in 0..H {
        grid.plot(0, y);
        grid.plot(W - 1, y);
    }

    // Diagonals
    for i in 0..W.min(H) {
        grid.plot(i, i);
        grid.plot(W - 1 - i, i);
    }

    grid.set_text_string(4, 2, "console-display demo");
    grid.set_text_string(W - 8, 4, "clipped at the right edge");
    grid.set_text_string(-6, 6, "......dropped on the left");

    info!("{grid:?}");

    let mut stdout = std::io::stdout().lock();
    grid.render_with(&mut stdout, Glyphs::new('#', ' '))?;

    info!("done");
    Ok(())
}
