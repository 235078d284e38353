//! Creator Animation Core (engine-agnostic)
//!
//! Keyframe tracks, property sets and clips imported from a Creator scene export,
//! plus the runtime that plays them: an [`AnimationPlayer`] per running playback and
//! an [`AnimationRegistry`] per scene root that owns clips, entries and players.
//!
//! Hosts plug in through two small traits in [`binding`]: a [`TargetResolver`] that
//! maps `(root, path)` to a node handle and a [`PropertySink`] that receives sampled
//! values. [`scene::MemoryScene`] is an in-memory host used by tools and tests.

pub mod baking;
pub mod binding;
pub mod config;
pub mod data;
pub mod error;
pub mod ids;
pub mod inputs;
pub mod interp;
pub mod library;
pub mod outputs;
pub mod player;
pub mod registry;
pub mod sampling;
pub mod scene;
pub mod value;

// Re-exports for consumers (readers, hosts)
pub use baking::{
    bake_clip, export_baked_json, BakedClip, BakedPropertySet, BakingConfig,
    DEFAULT_MAX_BAKED_FRAMES,
};
pub use binding::{PropertySink, SceneHost, TargetResolver};
pub use config::Config;
pub use data::{AnimationClip, Keyframe, Property, PropertySample, PropertySet, Track, WrapMode};
pub use error::AnimationError;
pub use ids::{ClipId, NodeId, PlayerId};
pub use inputs::{Command, Inputs};
pub use interp::{Curve, Ease};
pub use library::ClipLibrary;
pub use outputs::AnimationEvent;
pub use player::{AnimationPlayer, CompletionCallback, PlayerState, Tick};
pub use registry::{AnimationEntry, AnimationRegistry};
pub use sampling::sample;
pub use scene::MemoryScene;
pub use value::{Color3, Interpolate, Vec2};
