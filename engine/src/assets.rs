use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDesc {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
    pub tess_control: Option<PathBuf>,
    pub tess_eval: Option<PathBuf>,
    pub geometry: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDesc {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshDesc {
    pub path: PathBuf,
}

/// Named shader, texture and mesh descriptors. Paths are opaque here; the
/// loader that turns them into GPU resources lives behind the renderer.
#[derive(Debug, Default)]
pub struct Assets {
    shaders: HashMap<String, ShaderDesc>,
    textures: HashMap<String, TextureDesc>,
    meshes: HashMap<String, MeshDesc>,
}

fn optional_stage(path: &str) -> Option<PathBuf> {
    (!path.is_empty()).then(|| PathBuf::from(path))
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty strings mark the optional tessellation/geometry stages as unused.
    pub fn load_shader(&mut self, vertex: &str, fragment: &str, tess_control: &str, tess_eval: &str, geometry: &str, name: &str) {
        let desc = ShaderDesc {
            vertex: PathBuf::from(vertex),
            fragment: PathBuf::from(fragment),
            tess_control: optional_stage(tess_control),
            tess_eval: optional_stage(tess_eval),
            geometry: optional_stage(geometry),
        };
        if self.shaders.insert(name.to_owned(), desc).is_some() {
            log::warn!("shader `{name}` reloaded");
        }
        log::debug!("shader `{name}` registered");
    }

    pub fn load_texture(&mut self, path: &str, name: &str) {
        if self.textures.insert(name.to_owned(), TextureDesc { path: PathBuf::from(path) }).is_some() {
            log::warn!("texture `{name}` reloaded");
        }
        log::debug!("texture `{name}` -> {path}");
    }

    pub fn load_mesh(&mut self, path: &str, name: &str) {
        if self.meshes.insert(name.to_owned(), MeshDesc { path: PathBuf::from(path) }).is_some() {
            log::warn!("mesh `{name}` reloaded");
        }
        log::debug!("mesh `{name}` -> {path}");
    }

    pub fn shader(&self, name: &str) -> Result<&ShaderDesc, EngineError> {
        self.shaders.get(name).ok_or_else(|| not_found("shader", name))
    }

    pub fn texture(&self, name: &str) -> Result<&TextureDesc, EngineError> {
        self.textures.get(name).ok_or_else(|| not_found("texture", name))
    }

    pub fn mesh(&self, name: &str) -> Result<&MeshDesc, EngineError> {
        self.meshes.get(name).ok_or_else(|| not_found("mesh", name))
    }

    pub fn len(&self) -> usize {
        self.shaders.len() + self.textures.len() + self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        log::info!("releasing {} assets", self.len());
        self.shaders.clear();
        self.textures.clear();
        self.meshes.clear();
    }
}

fn not_found(kind: &'static str, name: &str) -> EngineError {
    EngineError::AssetNotFound {
        kind,
        name: name.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_by_name() {
        let mut assets = Assets::new();
        assets.load_shader("Res/Shaders/Phong.vert", "Res/Shaders/Phong.frag", "", "", "", "Phong");
        assets.load_texture("Res/Textures/Cube.png", "Cube");
        assets.load_mesh("Res/Meshes/BasicMeshes/Cube.gpmesh", "Mesh_Cube");

        let phong = assets.shader("Phong").unwrap();
        assert_eq!(phong.fragment, PathBuf::from("Res/Shaders/Phong.frag"));
        assert!(phong.geometry.is_none());
        assert_eq!(assets.texture("Cube").unwrap().path, PathBuf::from("Res/Textures/Cube.png"));
        assert!(matches!(
            assets.mesh("Mesh_Sphere"),
            Err(EngineError::AssetNotFound { kind: "mesh", .. })
        ));
        assert_eq!(assets.len(), 3);
    }

    #[test]
    fn reload_replaces_and_clear_releases() {
        let mut assets = Assets::new();
        assets.load_texture("a.png", "Default");
        assets.load_texture("b.png", "Default");
        assert_eq!(assets.len(), 1);
        assert_eq!(assets.texture("Default").unwrap().path, PathBuf::from("b.png"));

        assets.clear();
        assert!(assets.is_empty());
    }
}
