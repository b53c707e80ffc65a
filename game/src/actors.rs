use engine::{Actor, ActorBase, ActorContext, Appearance, InputState, KeyCode};
use glam::{Mat4, Vec3};

macro_rules! static_prop {
    ($name:ident, $mesh:literal, $texture:literal, $scale:expr) => {
        pub struct $name {
            base: ActorBase,
        }

        impl $name {
            pub fn new() -> Self {
                let mut base = ActorBase::new().with_appearance(Appearance::new($mesh, $texture));
                base.set_scale($scale);
                Self { base }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Actor for $name {
            fn base(&self) -> &ActorBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut ActorBase {
                &mut self.base
            }
        }
    };
}

static_prop!(Cube, "Mesh_Cube", "Cube", 1.0);
// The plane mesh is 25 units wide; one floor tile is 250.
static_prop!(Plane, "Mesh_Plane", "Plane", 10.0);

/// Top-down camera that pans over the floor with WASD / arrow keys and
/// zooms with the mouse wheel.
pub struct PanCamera {
    base: ActorBase,
    speed: f32,
    velocity: Vec3,
    zoom: f32,
}

impl PanCamera {
    pub const MIN_HEIGHT: f32 = 300.0;
    pub const MAX_HEIGHT: f32 = 4000.0;

    pub fn new(height: f32, speed: f32) -> Self {
        let mut base = ActorBase::new();
        base.set_position(Vec3::new(0.0, 0.0, height));
        Self {
            base,
            speed,
            velocity: Vec3::ZERO,
            zoom: 0.0,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.base.position();
        let target = Vec3::new(eye.x, eye.y - 1.0, 0.0);
        Mat4::look_at_lh(eye, target, Vec3::Z)
    }
}

impl Actor for PanCamera {
    fn base(&self) -> &ActorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActorBase {
        &mut self.base
    }

    fn actor_input(&mut self, input: &InputState, _ctx: &mut ActorContext<'_>) {
        let keys = &input.keyboard;
        let axis = |positive: [KeyCode; 2], negative: [KeyCode; 2]| {
            let held = |pair: [KeyCode; 2]| pair.iter().any(|key| keys.key_value(*key));
            held(positive) as i32 as f32 - held(negative) as i32 as f32
        };

        let x = axis([KeyCode::KeyD, KeyCode::ArrowRight], [KeyCode::KeyA, KeyCode::ArrowLeft]);
        let y = axis([KeyCode::KeyW, KeyCode::ArrowUp], [KeyCode::KeyS, KeyCode::ArrowDown]);
        self.velocity = Vec3::new(x, y, 0.0).normalize_or_zero() * self.speed;
        self.zoom = input.mouse.scroll_wheel().y;
    }

    fn update_actor(&mut self, dt: f32, ctx: &mut ActorContext<'_>) {
        let mut position = self.base.position() + self.velocity * dt;
        position.z = (position.z - self.zoom * 100.0).clamp(Self::MIN_HEIGHT, Self::MAX_HEIGHT);
        self.zoom = 0.0;
        self.base.set_position(position);
        ctx.renderer().set_view_matrix(self.view_matrix());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_tiles_are_scaled_up() {
        let mut plane = Plane::new();
        plane.base_mut().set_position(Vec3::new(-1250.0, -1250.0, 0.0));
        plane.compute_world_transform();
        let world = plane.base().world_transform();
        assert_eq!(world.transform_vector3(Vec3::X), Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(plane.base().appearance().unwrap().mesh, "Mesh_Plane");
    }

    #[test]
    fn camera_looks_straight_down_at_its_footprint() {
        let camera = PanCamera::new(1500.0, 500.0);
        let view = camera.view_matrix();
        // The point under the camera sits in front of it, on the view axis.
        let below = view.transform_point3(Vec3::new(0.0, -1.0, 0.0));
        assert!(below.x.abs() < 1e-3);
        assert!(below.z > 0.0);
    }
}
