use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use gridwalk_core::Point;
use gridwalk_paths::Finalized;

use crate::canvas::{Canvas, Glyph};

/// Pacing of an animated replay.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ReplayOptions {
    /// Finalize events drawn between two flushes.
    pub batch: usize,
    /// Pause after each flush.
    pub delay: Duration,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            batch: 200,
            delay: Duration::from_millis(10),
        }
    }
}

fn to_ct_color(g: Glyph) -> Color {
    match g {
        Glyph::Free => Color::Reset,
        Glyph::Obstacle => Color::DarkGrey,
        Glyph::Explored => Color::DarkCyan,
        Glyph::Route => Color::Yellow,
        Glyph::Start => Color::Green,
        Glyph::Goal => Color::Red,
    }
}

fn queue_glyph<W: Write>(out: &mut W, g: Glyph) -> io::Result<()> {
    queue!(out, SetForegroundColor(to_ct_color(g)), Print(g.ch()))
}

/// Prints the canvas once, row by row, at the current cursor position.
pub fn render_static<W: Write>(out: &mut W, canvas: &Canvas) -> io::Result<()> {
    for row in canvas.rows() {
        let mut last = None;
        for &g in row {
            if last != Some(g) {
                queue!(out, SetForegroundColor(to_ct_color(g)))?;
                last = Some(g);
            }
            queue!(out, Print(g.ch()))?;
        }
        queue!(out, ResetColor, Print("\r\n"))?;
    }
    out.flush()
}

/// Clears the screen, draws `canvas`, then animates `events` followed by
/// `path`. Only changed cells are redrawn. The cursor is left below the
/// picture.
pub fn replay<W: Write>(
    out: &mut W,
    canvas: &mut Canvas,
    events: &[Finalized],
    path: &[Point],
    opts: &ReplayOptions,
) -> io::Result<()> {
    let (finalized, cells) = (events.len(), path.len());
    log::debug!("replaying {finalized} events and a {cells}-cell route");
    queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    render_static(out, canvas)?;

    for chunk in events.chunks(opts.batch.max(1)) {
        for ev in chunk {
            if let Some(cell) = canvas.mark(ev.position, Glyph::Explored) {
                draw_cell(out, cell, Glyph::Explored)?;
            }
        }
        pause(out, opts.delay)?;
    }
    for &p in path {
        if let Some(cell) = canvas.mark(p, Glyph::Route) {
            draw_cell(out, cell, Glyph::Route)?;
        }
    }

    let below = u16::try_from(canvas.size().y).unwrap_or(u16::MAX);
    queue!(out, ResetColor, cursor::MoveTo(0, below))?;
    out.flush()
}

fn draw_cell<W: Write>(out: &mut W, cell: Point, g: Glyph) -> io::Result<()> {
    let (Ok(x), Ok(y)) = (u16::try_from(cell.x), u16::try_from(cell.y)) else {
        return Ok(());
    };
    queue!(out, cursor::MoveTo(x, y))?;
    queue_glyph(out, g)
}

fn pause<W: Write>(out: &mut W, delay: Duration) -> io::Result<()> {
    out.flush()?;
    if !delay.is_zero() {
        thread::sleep(delay);
    }
    Ok(())
}
