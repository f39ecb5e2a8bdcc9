/// Character-cell surface for terminal rendering
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use cube3d_core::{Color, PixelStyle, RenderSurface};
use std::io::Write;

/// One character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            color: Color::Black,
        }
    }
}

/// Fixed-size grid of cells that the engine draws into and that is then
/// written to the terminal in one pass.
pub struct CellSurface {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Resize, blanking every cell.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(width * height, Cell::default());
    }

    fn plot(&mut self, x: i32, y: i32, glyph: char, color: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.cells[y as usize * self.width + x as usize] = Cell { glyph, color };
        }
    }

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), glyph: char, color: Color) {
        // Bresenham, all octants
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, glyph, color);
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Write every cell to `writer`, switching color only when it changes.
    pub fn present<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            if y > 0 {
                writer.queue(Print("\r\n"))?;
            }
            for cell in &self.cells[y * self.width..(y + 1) * self.width] {
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(term_color(cell.color)))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl RenderSurface for CellSurface {
    fn screen_width(&self) -> u32 {
        self.width as u32
    }

    fn screen_height(&self) -> u32 {
        self.height as u32
    }

    fn fill(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, style: PixelStyle, color: Color) {
        let x0 = x0.clamp(0, self.width as i32);
        let x1 = x1.clamp(0, self.width as i32);
        let y0 = y0.clamp(0, self.height as i32);
        let y1 = y1.clamp(0, self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let cell = Cell {
            glyph: style.glyph(),
            color,
        };
        for y in y0..y1 {
            let row = y as usize * self.width;
            self.cells[row + x0 as usize..row + x1 as usize].fill(cell);
        }
    }

    fn fill_triangle(&mut self, points: [(f32, f32); 3], style: PixelStyle, color: Color) {
        let [v0, v1, v2] = points;
        if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return;
        }

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        let glyph = style.glyph();
        let mut covered = false;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                match barycentric(v0, v1, v2, (px, py)) {
                    Some((w0, w1, w2)) => {
                        if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                            self.plot(x, y, glyph, color);
                            covered = true;
                        }
                    }
                    // Zero area
                    None => {
                        self.draw_triangle(points, style, color);
                        return;
                    }
                }
            }
        }

        // Slivers thinner than a cell would otherwise vanish
        if !covered {
            self.draw_triangle(points, style, color);
        }
    }

    fn draw_triangle(&mut self, points: [(f32, f32); 3], style: PixelStyle, color: Color) {
        if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return;
        }
        if self.width == 0 || self.height == 0 {
            return;
        }
        let max = ((self.width - 1) as f32, (self.height - 1) as f32);
        let glyph = style.glyph();
        for (from, to) in [
            (points[0], points[1]),
            (points[1], points[2]),
            (points[2], points[0]),
        ] {
            if let Some((from, to)) = clip_segment(from, to, max) {
                self.draw_line(
                    (from.0 as i32, from.1 as i32),
                    (to.0 as i32, to.1 as i32),
                    glyph,
                    color,
                );
            }
        }
    }
}

/// Liang-Barsky clip of a segment to `[0, max.0] x [0, max.1]`.
///
/// Runs in f64 so corners far off the surface still clip to the right cell.
/// Endpoints inside the box come back untouched; cut endpoints are rounded.
fn clip_segment(
    from: (f32, f32),
    to: (f32, f32),
    max: (f32, f32),
) -> Option<((f64, f64), (f64, f64))> {
    let from = (from.0 as f64, from.1 as f64);
    let to = (to.0 as f64, to.1 as f64);
    let max = (max.0 as f64, max.1 as f64);
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;

    for (p, q) in [
        (-dx, from.0),
        (dx, max.0 - from.0),
        (-dy, from.1),
        (dy, max.1 - from.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
    }

    let at = |t: f64| {
        (
            (from.0 + t * dx).round().clamp(0.0, max.0),
            (from.1 + t * dy).round().clamp(0.0, max.1),
        )
    };
    let start = if t0 == 0.0 { from } else { at(t0) };
    let end = if t1 == 1.0 { to } else { at(t1) };
    Some((start, end))
}

pub fn term_color(color: Color) -> TermColor {
    match color {
        Color::Black => TermColor::Black,
        Color::DarkBlue => TermColor::DarkBlue,
        Color::DarkGreen => TermColor::DarkGreen,
        Color::DarkCyan => TermColor::DarkCyan,
        Color::DarkRed => TermColor::DarkRed,
        Color::DarkMagenta => TermColor::DarkMagenta,
        Color::DarkYellow => TermColor::DarkYellow,
        Color::Grey => TermColor::Grey,
        Color::DarkGrey => TermColor::DarkGrey,
        Color::Blue => TermColor::Blue,
        Color::Green => TermColor::Green,
        Color::Cyan => TermColor::Cyan,
        Color::Red => TermColor::Red,
        Color::Magenta => TermColor::Magenta,
        Color::Yellow => TermColor::Yellow,
        Color::White => TermColor::White,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
