//! Asset handle registry.
//!
//! Actors refer to their textures by path. [`TextureStore::load`] interns a
//! path and hands back an opaque [`TextureHandle`]; asking twice for the same
//! path returns the same handle. The GPU textures themselves are loaded by the
//! render side, which walks [`TextureStore::pending`] once per frame.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

/// Opaque reference to a texture registered in the [`TextureStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub usize);

#[derive(Resource, Debug, Default)]
pub struct TextureStore {
    paths: Vec<String>,
    by_path: FxHashMap<String, TextureHandle>,
    /// Index of the first handle not yet picked up by the renderer.
    uploaded: usize,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `path` to a handle, registering it on first use.
    pub fn load(&mut self, path: &str) -> TextureHandle {
        if let Some(handle) = self.by_path.get(path) {
            return *handle;
        }
        let handle = TextureHandle(self.paths.len());
        self.paths.push(path.to_string());
        self.by_path.insert(path.to_string(), handle);
        log::debug!("Registered texture {:?} as {:?}", path, handle);
        handle
    }

    pub fn get(&self, path: &str) -> Option<TextureHandle> {
        self.by_path.get(path).copied()
    }

    pub fn path(&self, handle: TextureHandle) -> Option<&str> {
        self.paths.get(handle.0).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Handles registered since the last call, with their paths.
    pub fn pending(&mut self) -> Vec<(TextureHandle, String)> {
        let start = self.uploaded;
        self.uploaded = self.paths.len();
        self.paths[start..]
            .iter()
            .enumerate()
            .map(|(i, p)| (TextureHandle(start + i), p.clone()))
            .collect()
    }
}
