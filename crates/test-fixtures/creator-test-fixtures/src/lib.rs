//! Shared scene-export fixtures for workspace tests.
//!
//! Fixture files live under `fixtures/` at the workspace root and are listed by
//! name in `fixtures/manifest.json`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    scenes: HashMap<String, SceneEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SceneEntry {
    Path(String),
    Detailed { path: String },
}

impl SceneEntry {
    fn as_path(&self) -> &str {
        match self {
            SceneEntry::Path(path) => path,
            SceneEntry::Detailed { path } => path,
        }
    }
}

/// Absolute path of the scene fixture registered as `name`.
fn locate(name: &str) -> Result<PathBuf> {
    let entry = MANIFEST
        .scenes
        .get(name)
        .ok_or_else(|| anyhow!("no scene fixture named '{name}' in fixtures/manifest.json"))?;
    Ok(Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../../fixtures")
        .join(entry.as_path()))
}

pub mod scenes {
    use super::*;

    /// Names of all registered scene fixtures.
    pub fn keys() -> Vec<String> {
        MANIFEST.scenes.keys().cloned().collect()
    }

    /// Raw JSON text of a scene export.
    pub fn json(name: &str) -> Result<String> {
        let path = locate(name)?;
        fs::read_to_string(&path)
            .with_context(|| format!("reading scene fixture '{name}' at {}", path.display()))
    }

    /// Decode a scene export into `T` (usually the reader's `SceneGraph`).
    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let text = json(name)?;
        serde_json::from_str(&text).with_context(|| format!("decoding scene fixture '{name}'"))
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        locate(name)
    }
}
