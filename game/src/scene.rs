use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use engine::{Actor, Game};
use glam::{Mat4, Quat, Vec3};

use crate::actors::{Cube, PanCamera, Plane};

const FLOOR_START: f32 = -1250.0;
const FLOOR_TILE: f32 = 250.0;
const FLOOR_TILES: usize = 10;

const CAMERA_HEIGHT: f32 = 1500.0;
const CAMERA_SPEED: f32 = 600.0;

fn load_assets(game: &mut Game) {
    let assets = game.assets_mut();

    assets.load_shader("Res/Shaders/Sprite.vert", "Res/Shaders/Sprite.frag", "", "", "", "Sprite");
    assets.load_shader("Res/Shaders/Phong.vert", "Res/Shaders/Phong.frag", "", "", "", "Phong");
    assets.load_shader("Res/Shaders/BasicMesh.vert", "Res/Shaders/BasicMesh.frag", "", "", "", "BasicMesh");

    assets.load_texture("Res/Textures/Default.png", "Default");
    assets.load_texture("Res/Textures/Cube.png", "Cube");
    assets.load_texture("Res/Textures/Plane.png", "Plane");
    assets.load_texture("Res/Textures/Sphere.png", "Sphere");

    assets.load_mesh("Res/Meshes/BasicMeshes/Cube.gpmesh", "Mesh_Cube");
    assets.load_mesh("Res/Meshes/BasicMeshes/Plane.gpmesh", "Mesh_Plane");
    assets.load_mesh("Res/Meshes/BasicMeshes/Sphere.gpmesh", "Mesh_Sphere");
}

fn place_actors(game: &mut Game) {
    let mut cube = Cube::new();
    let base = cube.base_mut();
    base.set_position(Vec3::new(200.0, 105.0, 0.0));
    base.set_scale(100.0);
    // Tip onto its side, then turn it 225 degrees about the vertical.
    let tip = Quat::from_axis_angle(Vec3::Y, -FRAC_PI_2);
    let turn = Quat::from_axis_angle(Vec3::Z, PI + FRAC_PI_4);
    base.set_rotation(turn * tip);
    game.add_actor(Box::new(cube));

    for i in 0..FLOOR_TILES {
        for j in 0..FLOOR_TILES {
            let mut plane = Plane::new();
            plane.base_mut().set_position(Vec3::new(
                FLOOR_START + i as f32 * FLOOR_TILE,
                FLOOR_START + j as f32 * FLOOR_TILE,
                0.0,
            ));
            game.add_actor(Box::new(plane));
        }
    }

    game.add_actor(Box::new(PanCamera::new(CAMERA_HEIGHT, CAMERA_SPEED)));
}

fn setup_lights(game: &mut Game) {
    let renderer = game.renderer_mut();
    renderer.set_view_matrix(Mat4::look_at_lh(Vec3::new(0.0, 0.0, CAMERA_HEIGHT), Vec3::NEG_Y, Vec3::Z));
    renderer.set_ambient_light(Vec3::splat(0.2));

    let light = renderer.directional_light_mut();
    light.direction = Vec3::new(0.0, -0.707, -0.707);
    light.diffuse_color = Vec3::new(0.78, 0.88, 1.0);
    light.spec_color = Vec3::splat(0.8);
}

/// The top-view template scene: a tilted cube over a 10x10 floor, seen from
/// above, with music.
pub fn load(game: &mut Game) -> anyhow::Result<()> {
    let relative = game.config().input.mouse_relative;
    game.set_mouse_relative_mode(relative);

    load_assets(game);
    place_actors(game);
    setup_lights(game);

    if let Err(err) = game.play_music("event:/Music") {
        log::warn!("no music: {err}");
    }

    log::info!("scene loaded with {} actors", game.actors().len());
    Ok(())
}
