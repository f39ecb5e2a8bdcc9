/// Perspective projection and viewport mapping
use nalgebra::Vector3;

use crate::config::ProjectionSettings;
use crate::transform::Mat4x4;

/// Parameters of the fixed perspective projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub near: f32,
    pub far: f32,
    pub fov_degrees: f32,
    /// Screen height over screen width.
    pub aspect_ratio: f32,
}

impl Projection {
    pub fn new(near: f32, far: f32, fov_degrees: f32, aspect_ratio: f32) -> Self {
        Self {
            near,
            far,
            fov_degrees,
            aspect_ratio,
        }
    }

    /// Projection for a screen of the given size. The aspect ratio is
    /// height / width.
    pub fn for_screen(settings: &ProjectionSettings, width: u32, height: u32) -> Self {
        Self::new(
            settings.near,
            settings.far,
            settings.fov_degrees,
            height as f32 / width as f32,
        )
    }

    /// `1 / tan(fov / 2)`
    pub fn fov_rad(&self) -> f32 {
        1.0 / (self.fov_degrees * 0.5).to_radians().tan()
    }

    /// Depth scale `near / (far - near)`. Lies in (0, 1) when `far > 2 * near`.
    pub fn q(&self) -> f32 {
        self.near / (self.far - self.near)
    }

    /// Build the projection matrix. The y scale is `aspect_ratio` alone,
    /// without the field-of-view factor.
    pub fn matrix(&self) -> Mat4x4 {
        let q = self.q();
        let mut m = Mat4x4::new();
        m[(0, 0)] = self.aspect_ratio * self.fov_rad();
        m[(1, 1)] = self.aspect_ratio;
        m[(2, 2)] = q;
        m[(2, 3)] = 1.0;
        m[(3, 2)] = -q * self.near;
        m
    }
}

/// Maps projected coordinates onto a screen of `width` x `height` cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    /// Shift x and y from roughly [-1, 1] into [0, 2], then scale by half
    /// the screen size. z passes through.
    pub fn to_screen(&self, v: &Vector3<f32>) -> Vector3<f32> {
        Vector3::new(
            (v.x + 1.0) * (0.5 * self.width),
            (v.y + 1.0) * (0.5 * self.height),
            v.z,
        )
    }
}
