//! Creator Reader
//!
//! Reads a Creator scene export (typed JSON), turns its animation clips into
//! immutable [`creator_animation_core::AnimationClip`]s, and walks the node tree,
//! asking a host [`NodeFactory`] to instantiate each node. The result is a
//! [`LoadedScene`]: the host root plus an [`AnimationRegistry`] ready to play.
//!
//! [`AnimationRegistry`]: creator_animation_core::AnimationRegistry

pub mod error;
pub mod importer;
pub mod memory;
pub mod node;
pub mod reader;
pub mod schema;

pub use error::ReaderError;
pub use importer::{build_tree, convert_clip, import_clips, register_animation};
pub use node::{AnimationRef, NodeDef, NodeFactory, NodeKind, Size};
pub use reader::{CreatorReader, LoadedScene, ReaderOptions};
pub use schema::{AnimationClipDef, NodeTree, SceneGraph};
