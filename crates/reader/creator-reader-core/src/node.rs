//! Node descriptions and the host factory seam.
//!
//! The set of constructible node kinds is closed: [`NodeKind`] has one variant per
//! kind and every consumer matches it exhaustively. Hosts build their own nodes
//! through [`NodeFactory`]; the reader never touches host objects directly.

use creator_animation_core::{Color3, NodeId, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

/// Animation component of a node: which clips it owns and what plays on load.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationRef {
    /// Clip uuids.
    pub clips: Vec<String>,
    /// Clip uuid; older exports write the clip name instead.
    pub default_clip: Option<String>,
    pub play_on_load: bool,
}

/// Fields shared by every node kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeDef {
    pub name: String,
    pub position: Vec2,
    pub anchor_point: Vec2,
    pub color: Color3,
    pub opacity: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub rotation_skew_x: f32,
    pub rotation_skew_y: f32,
    pub skew_x: f32,
    pub skew_y: f32,
    pub content_size: Size,
    pub tag: i32,
    pub local_z_order: i32,
    pub global_z_order: i32,
    pub enabled: bool,
    pub cascade_opacity_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anim: Option<AnimationRef>,
}

impl Default for NodeDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: Vec2::default(),
            anchor_point: Vec2::new(0.5, 0.5),
            color: Color3::WHITE,
            opacity: 255.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation_skew_x: 0.0,
            rotation_skew_y: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
            content_size: Size::default(),
            tag: 0,
            local_z_order: 0,
            global_z_order: 0,
            enabled: true,
            cascade_opacity_enabled: true,
            anim: None,
        }
    }
}

impl NodeDef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelDef {
    #[serde(flatten)]
    pub node: NodeDef,
    pub label_text: String,
    pub font_name: Option<String>,
    pub font_size: f32,
    pub line_height: f32,
    pub horizontal_alignment: Option<String>,
    pub vertical_alignment: Option<String>,
    pub overflow_type: Option<String>,
    pub enable_wrap: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RichTextDef {
    #[serde(flatten)]
    pub node: NodeDef,
    /// Markup text.
    pub text: String,
    pub font_size: f32,
    pub max_width: f32,
    pub line_height: f32,
    pub font_filename: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpriteDef {
    #[serde(flatten)]
    pub node: NodeDef,
    pub sprite_frame_name: Option<String>,
    pub sprite_type: Option<String>,
    pub size_mode: Option<String>,
    pub trim_enabled: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TileMapDef {
    #[serde(flatten)]
    pub node: NodeDef,
    pub tmx_filename: String,
    pub desired_content_size: Option<Size>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticleDef {
    #[serde(flatten)]
    pub node: NodeDef,
    pub particle_filename: String,
    pub texture_path: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollViewDef {
    #[serde(flatten)]
    pub node: NodeDef,
    pub background_image: Option<String>,
    /// "Horizontal", "Vertical", "Both" or "None".
    pub direction: Option<String>,
    pub bounce_enabled: bool,
    pub inner_container_size: Option<Size>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressBarDef {
    #[serde(flatten)]
    pub node: NodeDef,
    pub background_sprite_frame_name: Option<String>,
    pub bar_sprite_frame_name: Option<String>,
    /// 0..=100.
    pub percent: f32,
    pub reverse: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonDef {
    #[serde(flatten)]
    pub node: NodeDef,
    pub sprite_frame_name: Option<String>,
    pub pressed_sprite_frame_name: Option<String>,
    pub disabled_sprite_frame_name: Option<String>,
    pub transition: Option<String>,
    pub zoom_scale: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditBoxDef {
    #[serde(flatten)]
    pub node: NodeDef,
    pub background_image: Option<String>,
    pub text: String,
    pub placeholder: String,
    pub font_size: f32,
    pub max_length: i32,
    pub input_mode: Option<String>,
    pub return_type: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpineSkeletonDef {
    #[serde(flatten)]
    pub node: NodeDef,
    pub json_file: String,
    pub atlas_file: String,
    pub default_skin: Option<String>,
    pub default_animation: Option<String>,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub time_scale: f32,
}

/// One node of the export, tagged by kind (`{"type": "Sprite", ...}`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    Node(NodeDef),
    Label(LabelDef),
    RichText(RichTextDef),
    Sprite(SpriteDef),
    TileMap(TileMapDef),
    Particle(ParticleDef),
    Scene(NodeDef),
    ScrollView(ScrollViewDef),
    ProgressBar(ProgressBarDef),
    Button(ButtonDef),
    EditBox(EditBoxDef),
    SpineSkeleton(SpineSkeletonDef),
}

impl NodeKind {
    /// Common node fields.
    pub fn node(&self) -> &NodeDef {
        match self {
            NodeKind::Node(n) | NodeKind::Scene(n) => n,
            NodeKind::Label(d) => &d.node,
            NodeKind::RichText(d) => &d.node,
            NodeKind::Sprite(d) => &d.node,
            NodeKind::TileMap(d) => &d.node,
            NodeKind::Particle(d) => &d.node,
            NodeKind::ScrollView(d) => &d.node,
            NodeKind::ProgressBar(d) => &d.node,
            NodeKind::Button(d) => &d.node,
            NodeKind::EditBox(d) => &d.node,
            NodeKind::SpineSkeleton(d) => &d.node,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeKind::Node(_) => "Node",
            NodeKind::Label(_) => "Label",
            NodeKind::RichText(_) => "RichText",
            NodeKind::Sprite(_) => "Sprite",
            NodeKind::TileMap(_) => "TileMap",
            NodeKind::Particle(_) => "Particle",
            NodeKind::Scene(_) => "Scene",
            NodeKind::ScrollView(_) => "ScrollView",
            NodeKind::ProgressBar(_) => "ProgressBar",
            NodeKind::Button(_) => "Button",
            NodeKind::EditBox(_) => "EditBox",
            NodeKind::SpineSkeleton(_) => "SpineSkeleton",
        }
    }

    /// Buttons take their exported children as the title label.
    pub fn children_are_title(&self) -> bool {
        matches!(self, NodeKind::Button(_))
    }
}

/// Host-side node construction.
pub trait NodeFactory {
    /// Create a detached node for `kind`. `None` means the host does not build this
    /// kind; its children are still visited but cannot be attached.
    fn create(&mut self, kind: &NodeKind) -> Option<NodeId>;

    fn add_child(&mut self, parent: NodeId, child: NodeId);

    /// Hand a button's exported child over as its title label.
    fn set_title_label(&mut self, button: NodeId, label: NodeId);
}
