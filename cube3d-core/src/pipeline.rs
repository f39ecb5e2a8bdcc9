/// Per-triangle transform pipeline and the hand-off to the surface
use nalgebra::Vector3;

use crate::config::RenderSettings;
use crate::geometry::{Mesh, Triangle};
use crate::projection::Viewport;
use crate::surface::{RenderMode, RenderSurface};
use crate::transform::{FrameRotation, Mat4x4};

/// Model-to-screen transform run for every triangle, every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipeline {
    pub projection: Mat4x4,
    /// Added to z after rotation to move the model in front of the eye.
    pub z_offset: f32,
}

impl Pipeline {
    pub fn new(projection: Mat4x4, z_offset: f32) -> Self {
        Self {
            projection,
            z_offset,
        }
    }

    /// Rotate (Z then X), translate along z, project, then map to screen.
    pub fn project_vertex(
        &self,
        v: &Vector3<f32>,
        rotation: &FrameRotation,
        viewport: &Viewport,
    ) -> Vector3<f32> {
        let mut translated = rotation.apply(v);
        translated.z += self.z_offset;
        let projected = self.projection.multiply_vector(&translated);
        viewport.to_screen(&projected)
    }

    pub fn project_triangle(
        &self,
        tri: &Triangle,
        rotation: &FrameRotation,
        viewport: &Viewport,
    ) -> Triangle {
        tri.map(|v| self.project_vertex(v, rotation, viewport))
    }

    /// Screen-space triangles for the whole mesh, in mesh order.
    pub fn project_mesh(
        &self,
        mesh: &Mesh,
        rotation: &FrameRotation,
        viewport: &Viewport,
    ) -> Vec<Triangle> {
        mesh.triangles()
            .iter()
            .map(|tri| self.project_triangle(tri, rotation, viewport))
            .collect()
    }
}

/// Hand one screen-space triangle to the surface using the configured fill.
pub fn rasterize<S: RenderSurface + ?Sized>(
    surface: &mut S,
    tri: &Triangle,
    settings: &RenderSettings,
) {
    let points = tri.screen_points();
    match settings.mode {
        RenderMode::Filled => surface.fill_triangle(points, settings.style, settings.foreground),
        RenderMode::Wireframe => surface.draw_triangle(points, settings.style, settings.foreground),
    }
}
