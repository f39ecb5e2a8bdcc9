/// The drawing contract a host provides to the engine
use serde::Deserialize;

/// Cell fill pattern, from fully filled to sparse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelStyle {
    #[default]
    Solid,
    ThreeQuarters,
    Half,
    Quarter,
}

impl PixelStyle {
    pub fn glyph(self) -> char {
        match self {
            PixelStyle::Solid => '\u{2588}',
            PixelStyle::ThreeQuarters => '\u{2593}',
            PixelStyle::Half => '\u{2592}',
            PixelStyle::Quarter => '\u{2591}',
        }
    }
}

/// The sixteen console colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Grey,
    DarkGrey,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

/// How projected triangles are handed to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    #[default]
    Filled,
    Wireframe,
}

impl RenderMode {
    pub fn toggled(self) -> Self {
        match self {
            RenderMode::Filled => RenderMode::Wireframe,
            RenderMode::Wireframe => RenderMode::Filled,
        }
    }
}

/// A 2D character-cell surface the engine draws onto.
///
/// Coordinates are in cells with the origin at the top-left. Triangle
/// corners are passed as floats; the surface decides how to snap them to
/// its grid. Anything outside the surface is discarded by the surface.
pub trait RenderSurface {
    fn screen_width(&self) -> u32;

    fn screen_height(&self) -> u32;

    /// Fill the rectangle `[x0, x1) x [y0, y1)`.
    fn fill(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, style: PixelStyle, color: Color);

    fn fill_triangle(&mut self, points: [(f32, f32); 3], style: PixelStyle, color: Color);

    /// Outline only.
    fn draw_triangle(&mut self, points: [(f32, f32); 3], style: PixelStyle, color: Color);
}
