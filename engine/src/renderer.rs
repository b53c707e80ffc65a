use glam::{Mat4, Vec3};

use crate::window::Window;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub diffuse_color: Vec3,
    pub spec_color: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::NEG_Z,
            diffuse_color: Vec3::ONE,
            spec_color: Vec3::ONE,
        }
    }
}

/// One mesh instance to draw this frame.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    pub mesh: &'a str,
    pub texture: &'a str,
    pub world: Mat4,
}

pub trait Renderer {
    fn initialize(&mut self, window: &dyn Window) -> bool;

    fn begin_draw(&mut self);

    fn draw(&mut self, items: &[DrawItem<'_>]);

    fn end_draw(&mut self);

    fn close(&mut self);

    fn set_view_matrix(&mut self, view: Mat4);

    fn set_ambient_light(&mut self, ambient: Vec3);

    fn directional_light_mut(&mut self) -> &mut DirectionalLight;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    pub draw_calls: usize,
    pub meshes: usize,
}

/// Builds the per-frame draw list against the scene's camera and lights.
/// Backend-agnostic: nothing is submitted to a GPU.
pub struct SceneRenderer {
    view: Mat4,
    projection: Mat4,
    ambient: Vec3,
    light: DirectionalLight,
    field_of_view: f32,
    near: f32,
    far: f32,
    in_frame: bool,
    frame_count: u64,
    current: FrameStats,
    last: FrameStats,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            ambient: Vec3::ZERO,
            light: DirectionalLight::default(),
            field_of_view: 70f32.to_radians(),
            near: 10.0,
            far: 10_000.0,
            in_frame: false,
            frame_count: 0,
            current: FrameStats::default(),
            last: FrameStats::default(),
        }
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn ambient_light(&self) -> Vec3 {
        self.ambient
    }

    pub fn directional_light(&self) -> &DirectionalLight {
        &self.light
    }

    /// Statistics of the last completed frame.
    pub fn last_frame(&self) -> FrameStats {
        self.last
    }
}

impl Renderer for SceneRenderer {
    fn initialize(&mut self, window: &dyn Window) -> bool {
        let (width, height) = window.size();
        if width == 0 || height == 0 {
            log::error!("renderer needs a non-empty drawable, got {width}x{height}");
            return false;
        }
        let aspect = width as f32 / height as f32;
        self.projection = Mat4::perspective_lh(self.field_of_view, aspect, self.near, self.far);
        log::info!("renderer ready ({width}x{height})");
        true
    }

    fn begin_draw(&mut self) {
        if self.in_frame {
            log::warn!("begin_draw called twice without end_draw");
        }
        self.in_frame = true;
        self.current = FrameStats {
            frame: self.frame_count,
            ..FrameStats::default()
        };
    }

    fn draw(&mut self, items: &[DrawItem<'_>]) {
        let view_projection = self.projection * self.view;
        let mut last_mesh = None;
        for item in items {
            // Everything behind the eye is dropped; the rest is counted as one
            // call per change of mesh.
            let clip = view_projection * item.world.w_axis;
            if clip.w <= 0.0 {
                continue;
            }
            self.current.meshes += 1;
            if last_mesh != Some((item.mesh, item.texture)) {
                self.current.draw_calls += 1;
                last_mesh = Some((item.mesh, item.texture));
            }
        }
    }

    fn end_draw(&mut self) {
        if !self.in_frame {
            log::warn!("end_draw called without begin_draw");
            return;
        }
        self.in_frame = false;
        self.frame_count += 1;
        self.last = self.current;
        log::trace!(
            "frame {}: {} meshes in {} calls",
            self.last.frame,
            self.last.meshes,
            self.last.draw_calls
        );
    }

    fn close(&mut self) {
        self.in_frame = false;
        log::info!("renderer closed after {} frames", self.frame_count);
    }

    fn set_view_matrix(&mut self, view: Mat4) {
        self.view = view;
    }

    fn set_ambient_light(&mut self, ambient: Vec3) {
        self.ambient = ambient;
    }

    fn directional_light_mut(&mut self) -> &mut DirectionalLight {
        &mut self.light
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PlatformEvent;

    struct FixedWindow(u32, u32);

    impl Window for FixedWindow {
        fn initialize(&mut self) -> bool {
            true
        }
        fn poll_events(&mut self, _events: &mut Vec<PlatformEvent>) {}
        fn size(&self) -> (u32, u32) {
            (self.0, self.1)
        }
        fn set_cursor_captured(&mut self, _captured: bool) {}
        fn close(&mut self) {}
    }

    #[test]
    fn refuses_empty_drawable() {
        let mut renderer = SceneRenderer::new();
        assert!(!renderer.initialize(&FixedWindow(0, 600)));
        assert!(renderer.initialize(&FixedWindow(800, 600)));
    }

    #[test]
    fn counts_meshes_and_batches_by_mesh() {
        let mut renderer = SceneRenderer::new();
        renderer.initialize(&FixedWindow(800, 600));
        renderer.set_view_matrix(Mat4::look_at_lh(Vec3::new(0.0, 0.0, -100.0), Vec3::ZERO, Vec3::Y));

        let at = |x: f32| Mat4::from_translation(Vec3::new(x, 0.0, 0.0));
        let items = [
            DrawItem { mesh: "Mesh_Plane", texture: "Plane", world: at(0.0) },
            DrawItem { mesh: "Mesh_Plane", texture: "Plane", world: at(10.0) },
            DrawItem { mesh: "Mesh_Cube", texture: "Cube", world: at(20.0) },
            // behind the eye
            DrawItem {
                mesh: "Mesh_Cube",
                texture: "Cube",
                world: Mat4::from_translation(Vec3::new(0.0, 0.0, -500.0)),
            },
        ];

        renderer.begin_draw();
        renderer.draw(&items);
        renderer.end_draw();

        let stats = renderer.last_frame();
        assert_eq!(stats.frame, 0);
        assert_eq!(stats.meshes, 3);
        assert_eq!(stats.draw_calls, 2);
    }

    #[test]
    fn scene_setters_apply() {
        let mut renderer = SceneRenderer::new();
        renderer.set_ambient_light(Vec3::splat(0.2));
        renderer.directional_light_mut().diffuse_color = Vec3::new(0.78, 0.88, 1.0);
        assert_eq!(renderer.ambient_light(), Vec3::splat(0.2));
        assert_eq!(renderer.directional_light().diffuse_color, Vec3::new(0.78, 0.88, 1.0));
    }
}
