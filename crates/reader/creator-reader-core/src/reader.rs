//! Entry point: decode an export, import its clips and build the node tree.

use std::fs;
use std::path::Path;

use creator_animation_core::{AnimationRegistry, Config, NodeId};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ReaderError;
use crate::importer::{build_tree, import_clips};
use crate::node::{NodeFactory, Size};
use crate::schema::SceneGraph;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Sizing and event settings for the registry created by `build`.
    pub registry: Config,
    /// Fail on malformed clips instead of logging and keeping them.
    pub strict_clips: bool,
}

#[derive(Clone, Debug)]
pub struct CreatorReader {
    graph: SceneGraph,
    options: ReaderOptions,
}

impl CreatorReader {
    pub fn from_graph(graph: SceneGraph) -> Self {
        Self {
            graph,
            options: ReaderOptions::default(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ReaderError> {
        Ok(Self::from_graph(serde_json::from_str(text)?))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ReaderError> {
        Ok(Self::from_graph(serde_json::from_slice(bytes)?))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReaderError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ReaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&bytes)
    }

    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    /// Exporter version string.
    pub fn version(&self) -> &str {
        &self.graph.version
    }

    pub fn design_resolution(&self) -> Option<Size> {
        self.graph.design_resolution
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Import clips into a fresh registry and build the tree through `factory`.
    /// Nothing plays until [`LoadedScene::activate`].
    pub fn build<F: NodeFactory + ?Sized>(&self, factory: &mut F) -> Result<LoadedScene, ReaderError> {
        let mut registry = AnimationRegistry::new(self.options.registry.clone());
        import_clips(
            &self.graph.animation_clips,
            &mut registry,
            self.options.strict_clips,
        )?;
        let root = build_tree(&self.graph.root, factory, &mut registry).ok_or(ReaderError::NoRoot {
            kind: self.graph.root.object.kind_name(),
        })?;
        debug!(
            "built scene v'{}': {} nodes, {} clips, {} animated nodes",
            self.graph.version,
            self.graph.root.count(),
            registry.clips().len(),
            registry.entries().len()
        );
        Ok(LoadedScene { root, registry })
    }
}

/// A built scene: the host root node and the registry driving its animations.
pub struct LoadedScene {
    root: NodeId,
    registry: AnimationRegistry,
}

impl LoadedScene {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn registry(&self) -> &AnimationRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut AnimationRegistry {
        &mut self.registry
    }

    /// Start play-on-load clips. Only the first call has an effect.
    pub fn activate(&mut self) -> usize {
        self.registry.play_on_load()
    }

    pub fn into_parts(self) -> (NodeId, AnimationRegistry) {
        (self.root, self.registry)
    }
}
