//! Typed scene export as written by the editor plugin (camelCase JSON).
//!
//! Clips are listed once at the top level and referenced from nodes by uuid.
//! Keyframes carry an optional `curveType` (easing name) or `curveData`
//! (bezier control points) describing the segment they open.

use creator_animation_core::{Color3, Vec2};
use serde::{Deserialize, Serialize};

use crate::node::{NodeKind, Size};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneGraph {
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_resolution: Option<Size>,
    #[serde(default)]
    pub resolution_fit_width: bool,
    #[serde(default)]
    pub resolution_fit_height: bool,
    #[serde(default)]
    pub animation_clips: Vec<AnimationClipDef>,
    pub root: NodeTree,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeTree {
    pub object: NodeKind,
    #[serde(default)]
    pub children: Vec<NodeTree>,
}

impl NodeTree {
    pub fn leaf(object: NodeKind) -> Self {
        Self {
            object,
            children: Vec::new(),
        }
    }

    /// Nodes in this subtree, including the root.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(NodeTree::count).sum::<usize>()
    }
}

fn default_sample() -> f32 {
    60.0
}

fn default_speed() -> f32 {
    1.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationClipDef {
    pub name: String,
    /// Clips without a uuid are kept but cannot be referenced by nodes.
    #[serde(default)]
    pub uuid: String,
    /// In frames.
    #[serde(default)]
    pub duration: f32,
    #[serde(default = "default_sample")]
    pub sample: f32,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default)]
    pub wrap_mode: WrapModeDef,
    #[serde(default)]
    pub curve_data: Vec<AnimCurveData>,
}

/// Editor wrap mode: numeric code from the clip asset, or a name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WrapModeDef {
    Code(i64),
    Name(String),
}

impl Default for WrapModeDef {
    fn default() -> Self {
        WrapModeDef::Code(0)
    }
}

/// Tracks for one node; an absent or empty path means the clip's own node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimCurveData {
    pub path: String,
    pub props: AnimProps,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimProps {
    pub position: Vec<KeyDef<Vec2>>,
    pub color: Vec<KeyDef<Color3>>,
    pub scale_x: Vec<KeyDef<f32>>,
    pub scale_y: Vec<KeyDef<f32>>,
    pub rotation: Vec<KeyDef<f32>>,
    pub skew_x: Vec<KeyDef<f32>>,
    pub skew_y: Vec<KeyDef<f32>>,
    pub opacity: Vec<KeyDef<f32>>,
    pub anchor_x: Vec<KeyDef<f32>>,
    pub anchor_y: Vec<KeyDef<f32>>,
    pub position_x: Vec<KeyDef<f32>>,
    pub position_y: Vec<KeyDef<f32>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyDef<T> {
    pub frame: f32,
    pub value: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve_data: Option<Vec<f32>>,
}

impl<T> KeyDef<T> {
    pub fn new(frame: f32, value: T) -> Self {
        Self {
            frame,
            value,
            curve_type: None,
            curve_data: None,
        }
    }
}
