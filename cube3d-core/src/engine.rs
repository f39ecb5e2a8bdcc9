/// Frame driver: set up once with `on_create`, then `on_update` every frame
use crate::config::EngineConfig;
use crate::geometry::{Mesh, Triangle};
use crate::pipeline::{rasterize, Pipeline};
use crate::projection::{Projection, Viewport};
use crate::surface::{RenderMode, RenderSurface};
use crate::transform::{FrameRotation, Spin};

/// Lifecycle of an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Created, no mesh or projection yet.
    Uninitialized,
    /// Set up, no frame drawn yet.
    Ready,
    Rendering,
}

pub struct Engine {
    config: EngineConfig,
    state: EngineState,
    mesh: Mesh,
    pipeline: Pipeline,
    spin: Spin,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: EngineState::Uninitialized,
            mesh: Mesh::new(),
            pipeline: Pipeline::new(Default::default(), config.animation.z_offset),
            spin: Spin::new(config.animation.spin_rate),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn theta(&self) -> f32 {
        self.spin.theta
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn render_mode(&self) -> RenderMode {
        self.config.render.mode
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.config.render.mode = mode;
    }

    /// Build the cube and the projection for the surface's current size.
    ///
    /// Returns `false` if the surface has no area, in which case the engine
    /// stays uninitialized.
    pub fn on_create<S: RenderSurface + ?Sized>(&mut self, surface: &S) -> bool {
        let (width, height) = (surface.screen_width(), surface.screen_height());
        if width == 0 || height == 0 {
            log::warn!("refusing to set up on a {}x{} surface", width, height);
            return false;
        }

        self.mesh = Mesh::cube();
        let projection = Projection::for_screen(&self.config.projection, width, height);
        self.pipeline = Pipeline::new(projection.matrix(), self.config.animation.z_offset);
        self.state = EngineState::Ready;

        log::debug!(
            "engine ready: {} triangles, {}x{} surface, projection {:?}",
            self.mesh.len(),
            width,
            height,
            projection
        );
        true
    }

    /// Draw one frame. Returns `false` if [`Engine::on_create`] has not
    /// succeeded yet.
    pub fn on_update<S: RenderSurface + ?Sized>(&mut self, surface: &mut S, elapsed: f32) -> bool {
        if self.state == EngineState::Uninitialized {
            log::warn!("on_update called before on_create");
            return false;
        }
        self.state = EngineState::Rendering;

        let (width, height) = (surface.screen_width(), surface.screen_height());
        let render = self.config.render;
        surface.fill(0, 0, width as i32, height as i32, render.style, render.background);

        self.spin.advance(elapsed);
        log::trace!("frame theta = {}", self.spin.theta);

        let rotation = FrameRotation::new(self.spin.theta, self.config.animation.x_axis_ratio);
        let viewport = Viewport::new(width, height);
        for tri in self.mesh.triangles() {
            let projected = self.pipeline.project_triangle(tri, &rotation, &viewport);
            rasterize(surface, &projected, &render);
        }
        true
    }

    /// Screen-space triangles for the current angle, without drawing or
    /// advancing.
    pub fn project_frame(&self, width: u32, height: u32) -> Vec<Triangle> {
        let rotation = FrameRotation::new(self.spin.theta, self.config.animation.x_axis_ratio);
        self.pipeline
            .project_mesh(&self.mesh, &rotation, &Viewport::new(width, height))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{Call, RecordingSurface};
    use crate::surface::{Color, PixelStyle};
    use approx::assert_relative_eq;

    fn ready_engine(surface: &RecordingSurface) -> Engine {
        let mut engine = Engine::default();
        assert!(engine.on_create(surface));
        engine
    }

    #[test]
    fn test_lifecycle() {
        let mut surface = RecordingSurface::new(256, 240);
        let mut engine = Engine::default();
        assert_eq!(engine.state(), EngineState::Uninitialized);

        assert!(engine.on_create(&surface));
        assert_eq!(engine.state(), EngineState::Ready);
        assert_eq!(engine.mesh().len(), 12);

        assert!(engine.on_update(&mut surface, 0.016));
        assert_eq!(engine.state(), EngineState::Rendering);
    }

    #[test]
    fn test_update_before_create_draws_nothing() {
        let mut surface = RecordingSurface::new(256, 240);
        let mut engine = Engine::default();
        assert!(!engine.on_update(&mut surface, 0.5));
        assert!(surface.calls.is_empty());
        assert_eq!(engine.theta(), 0.0);
    }

    #[test]
    fn test_create_rejects_empty_surface() {
        let mut engine = Engine::default();
        assert!(!engine.on_create(&RecordingSurface::new(0, 240)));
        assert!(!engine.on_create(&RecordingSurface::new(256, 0)));
        assert_eq!(engine.state(), EngineState::Uninitialized);
    }

    #[test]
    fn test_frame_clears_then_draws_each_triangle() {
        let mut surface = RecordingSurface::new(256, 240);
        let mut engine = ready_engine(&surface);
        engine.on_update(&mut surface, 0.1);

        let calls = surface.take();
        assert_eq!(calls.len(), 13);
        assert_eq!(
            calls[0],
            Call::Fill(0, 0, 256, 240, PixelStyle::Solid, Color::Black)
        );

        let expected = engine.project_frame(256, 240);
        for (call, tri) in calls[1..].iter().zip(&expected) {
            assert_eq!(
                *call,
                Call::FillTriangle(tri.screen_points(), PixelStyle::Solid, Color::White)
            );
        }
    }

    #[test]
    fn test_theta_accumulates() {
        let mut surface = RecordingSurface::new(80, 40);
        let mut engine = ready_engine(&surface);
        engine.on_update(&mut surface, 0.25);
        engine.on_update(&mut surface, 0.5);
        assert_relative_eq!(engine.theta(), 0.75);
    }

    #[test]
    fn test_zero_elapsed_frames_are_identical() {
        let mut surface = RecordingSurface::new(256, 240);
        let mut engine = ready_engine(&surface);
        engine.on_update(&mut surface, 0.3);
        surface.take();

        engine.on_update(&mut surface, 0.0);
        let first = surface.take();
        engine.on_update(&mut surface, 0.0);
        let second = surface.take();

        assert_eq!(first, second);
        assert_relative_eq!(engine.theta(), 0.3);
    }

    #[test]
    fn test_wireframe_mode_outlines() {
        let mut surface = RecordingSurface::new(64, 32);
        let mut engine = ready_engine(&surface);
        engine.set_render_mode(engine.render_mode().toggled());
        engine.on_update(&mut surface, 0.0);

        let calls = surface.take();
        assert!(calls[1..]
            .iter()
            .all(|c| matches!(c, Call::DrawTriangle(_, _, Color::White))));
    }

    #[test]
    fn test_identical_engines_agree() {
        let surface = RecordingSurface::new(256, 240);
        let mut a = ready_engine(&surface);
        let mut b = ready_engine(&surface);
        let mut sa = RecordingSurface::new(256, 240);
        let mut sb = RecordingSurface::new(256, 240);
        for dt in [0.016, 0.033, 0.5, 1.0] {
            a.on_update(&mut sa, dt);
            b.on_update(&mut sb, dt);
        }
        assert_eq!(sa.calls, sb.calls);
    }

    #[test]
    fn test_closest_accepted_offset_stays_finite() {
        let mut config = EngineConfig::default();
        config.animation.z_offset = f32::from_bits(3f32.sqrt().to_bits() + 1);
        config.render.mode = RenderMode::Wireframe;
        assert!(config.validate().is_ok());

        let mut surface = RecordingSurface::new(64, 32);
        let mut engine = Engine::new(config);
        assert!(engine.on_create(&surface));
        for _ in 0..700 {
            engine.on_update(&mut surface, 0.01);
            for call in surface.take() {
                if let Call::DrawTriangle(points, _, _) = call {
                    assert!(points.iter().all(|(x, y)| x.is_finite() && y.is_finite()));
                }
            }
        }
    }
}
