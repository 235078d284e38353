//! Canonical animation data model: keyframes, tracks, property sets and clips.
//!
//! Everything here is built once by the importer and then only read. Players keep
//! their own mutable state and borrow clips from the registry's arena.

use serde::{Deserialize, Serialize};

use crate::binding::PropertySink;
use crate::error::AnimationError;
use crate::ids::NodeId;
use crate::interp::Curve;
use crate::sampling::sample;
use crate::value::{Color3, Interpolate, Vec2};

/// A single keyframe. `frame` is expressed in sample units (editor frames).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    pub frame: f32,
    pub value: T,
    /// Timing of the segment that starts at this keyframe.
    #[serde(default, skip_serializing_if = "Curve::is_linear")]
    pub curve: Curve,
}

impl<T> Keyframe<T> {
    #[inline]
    pub fn new(frame: f32, value: T) -> Self {
        Self {
            frame,
            value,
            curve: Curve::Linear,
        }
    }

    #[inline]
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }
}

/// One property's keyframes in source order.
///
/// Tracks are never re-sorted; the importer preserves the order of the export.
/// An empty track means the property is not animated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Track<T> {
    keyframes: Vec<Keyframe<T>>,
}

impl<T> Default for Track<T> {
    fn default() -> Self {
        Self {
            keyframes: Vec::new(),
        }
    }
}

impl<T> Track<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keyframes(keyframes: Vec<Keyframe<T>>) -> Self {
        Self { keyframes }
    }

    /// Append a linear keyframe.
    pub fn push(&mut self, frame: f32, value: T) {
        self.keyframes.push(Keyframe::new(frame, value));
    }

    pub fn push_keyframe(&mut self, keyframe: Keyframe<T>) {
        self.keyframes.push(keyframe);
    }

    #[inline]
    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn last_frame(&self) -> Option<f32> {
        self.keyframes.last().map(|k| k.frame)
    }

    /// Index of the first keyframe that breaks finite, ascending order.
    fn first_disorder(&self) -> Option<(usize, bool)> {
        let mut last = f32::NEG_INFINITY;
        for (i, k) in self.keyframes.iter().enumerate() {
            if !k.frame.is_finite() {
                return Some((i, true));
            }
            if k.frame < last {
                return Some((i, false));
            }
            last = k.frame;
        }
        None
    }
}

impl<T: Interpolate> Track<T> {
    /// Sample at `frame`; `None` when the track is empty.
    #[inline]
    pub fn sample(&self, frame: f32) -> Option<T> {
        sample(self, frame)
    }
}

impl<T> FromIterator<(f32, T)> for Track<T> {
    fn from_iter<I: IntoIterator<Item = (f32, T)>>(iter: I) -> Self {
        Self {
            keyframes: iter
                .into_iter()
                .map(|(frame, value)| Keyframe::new(frame, value))
                .collect(),
        }
    }
}

/// Animatable properties in application order.
///
/// Later entries override earlier ones on the same node within a frame, so
/// per-axis position intentionally wins over the composite position track.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    Position,
    Color,
    ScaleX,
    ScaleY,
    Rotation,
    SkewX,
    SkewY,
    Opacity,
    AnchorX,
    AnchorY,
    PositionX,
    PositionY,
}

impl Property {
    pub const APPLY_ORDER: [Property; 12] = [
        Property::Position,
        Property::Color,
        Property::ScaleX,
        Property::ScaleY,
        Property::Rotation,
        Property::SkewX,
        Property::SkewY,
        Property::Opacity,
        Property::AnchorX,
        Property::AnchorY,
        Property::PositionX,
        Property::PositionY,
    ];

    /// Editor-side property name.
    pub fn name(self) -> &'static str {
        match self {
            Property::Position => "position",
            Property::Color => "color",
            Property::ScaleX => "scaleX",
            Property::ScaleY => "scaleY",
            Property::Rotation => "rotation",
            Property::SkewX => "skewX",
            Property::SkewY => "skewY",
            Property::Opacity => "opacity",
            Property::AnchorX => "anchorX",
            Property::AnchorY => "anchorY",
            Property::PositionX => "positionX",
            Property::PositionY => "positionY",
        }
    }
}

/// Tracks driving one node, addressed by a path relative to the player's root.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertySet {
    /// Empty path targets the root node itself.
    pub path: String,
    pub position: Track<Vec2>,
    pub color: Track<Color3>,
    pub scale_x: Track<f32>,
    pub scale_y: Track<f32>,
    pub rotation: Track<f32>,
    pub skew_x: Track<f32>,
    pub skew_y: Track<f32>,
    pub opacity: Track<f32>,
    pub anchor_x: Track<f32>,
    pub anchor_y: Track<f32>,
    pub position_x: Track<f32>,
    pub position_y: Track<f32>,
}

impl PropertySet {
    /// Property set for the root target.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn targets_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of keyframes on a property's track.
    pub fn keyframe_count(&self, property: Property) -> usize {
        match property {
            Property::Position => self.position.len(),
            Property::Color => self.color.len(),
            other => self.scalar_track(other).map_or(0, Track::len),
        }
    }

    /// Scalar track for a property, `None` for the vector/color properties.
    pub fn scalar_track(&self, property: Property) -> Option<&Track<f32>> {
        match property {
            Property::Position | Property::Color => None,
            Property::ScaleX => Some(&self.scale_x),
            Property::ScaleY => Some(&self.scale_y),
            Property::Rotation => Some(&self.rotation),
            Property::SkewX => Some(&self.skew_x),
            Property::SkewY => Some(&self.skew_y),
            Property::Opacity => Some(&self.opacity),
            Property::AnchorX => Some(&self.anchor_x),
            Property::AnchorY => Some(&self.anchor_y),
            Property::PositionX => Some(&self.position_x),
            Property::PositionY => Some(&self.position_y),
        }
    }

    /// Mutable scalar track, used by importers filling the set.
    pub fn scalar_track_mut(&mut self, property: Property) -> Option<&mut Track<f32>> {
        match property {
            Property::Position | Property::Color => None,
            Property::ScaleX => Some(&mut self.scale_x),
            Property::ScaleY => Some(&mut self.scale_y),
            Property::Rotation => Some(&mut self.rotation),
            Property::SkewX => Some(&mut self.skew_x),
            Property::SkewY => Some(&mut self.skew_y),
            Property::Opacity => Some(&mut self.opacity),
            Property::AnchorX => Some(&mut self.anchor_x),
            Property::AnchorY => Some(&mut self.anchor_y),
            Property::PositionX => Some(&mut self.position_x),
            Property::PositionY => Some(&mut self.position_y),
        }
    }

    /// Properties with at least one keyframe, in application order.
    pub fn animated_properties(&self) -> impl Iterator<Item = Property> + '_ {
        Property::APPLY_ORDER
            .into_iter()
            .filter(move |p| self.keyframe_count(*p) > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.animated_properties().next().is_none()
    }

    /// Largest keyframe stamp over all tracks.
    pub fn last_frame(&self) -> Option<f32> {
        let scalars = Property::APPLY_ORDER
            .into_iter()
            .filter_map(|p| self.scalar_track(p))
            .filter_map(Track::last_frame);
        self.position
            .last_frame()
            .into_iter()
            .chain(self.color.last_frame())
            .chain(scalars)
            .reduce(f32::max)
    }

    /// Sample every track at `frame`.
    pub fn sample_at(&self, frame: f32) -> PropertySample {
        PropertySample {
            position: self.position.sample(frame),
            color: self.color.sample(frame),
            scale_x: self.scale_x.sample(frame),
            scale_y: self.scale_y.sample(frame),
            rotation: self.rotation.sample(frame),
            skew_x: self.skew_x.sample(frame),
            skew_y: self.skew_y.sample(frame),
            opacity: self.opacity.sample(frame),
            anchor_x: self.anchor_x.sample(frame),
            anchor_y: self.anchor_y.sample(frame),
            position_x: self.position_x.sample(frame),
            position_y: self.position_y.sample(frame),
        }
    }

    fn validate(&self, clip: &str) -> Result<(), AnimationError> {
        let checks = [
            (Property::Position, self.position.first_disorder()),
            (Property::Color, self.color.first_disorder()),
        ]
        .into_iter()
        .chain(
            Property::APPLY_ORDER
                .into_iter()
                .filter_map(|p| self.scalar_track(p).map(|t| (p, t.first_disorder()))),
        );
        for (property, disorder) in checks {
            match disorder {
                Some((_, true)) => {
                    return Err(AnimationError::NonFiniteFrame {
                        clip: clip.to_string(),
                        path: self.path.clone(),
                        property: property.name().to_string(),
                    })
                }
                Some((index, false)) => {
                    return Err(AnimationError::UnorderedFrames {
                        clip: clip.to_string(),
                        path: self.path.clone(),
                        property: property.name().to_string(),
                        index,
                    })
                }
                None => {}
            }
        }
        Ok(())
    }
}

/// One frame's worth of sampled values for a property set. `None` leaves the
/// node's property untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skew_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skew_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_y: Option<f32>,
}

impl PropertySample {
    pub fn is_empty(&self) -> bool {
        *self == PropertySample::default()
    }

    /// Write every present value onto `node` in [`Property::APPLY_ORDER`].
    pub fn apply<S: PropertySink + ?Sized>(&self, node: NodeId, sink: &mut S) {
        if let Some(v) = self.position {
            sink.set_position(node, v);
        }
        if let Some(v) = self.color {
            sink.set_color(node, v);
        }
        if let Some(v) = self.scale_x {
            sink.set_scale_x(node, v);
        }
        if let Some(v) = self.scale_y {
            sink.set_scale_y(node, v);
        }
        if let Some(v) = self.rotation {
            sink.set_rotation(node, v);
        }
        if let Some(v) = self.skew_x {
            sink.set_skew_x(node, v);
        }
        if let Some(v) = self.skew_y {
            sink.set_skew_y(node, v);
        }
        if let Some(v) = self.opacity {
            sink.set_opacity(node, v);
        }
        match (self.anchor_x, self.anchor_y) {
            (Some(x), Some(y)) => sink.set_anchor_point(node, Vec2::new(x, y)),
            (Some(x), None) => sink.set_anchor_x(node, x),
            (None, Some(y)) => sink.set_anchor_y(node, y),
            (None, None) => {}
        }
        if let Some(v) = self.position_x {
            sink.set_position_x(node, v);
        }
        if let Some(v) = self.position_y {
            sink.set_position_y(node, v);
        }
    }
}

/// Behaviour at and beyond the clip's nominal duration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WrapMode {
    /// Same as `Normal`.
    #[default]
    Default,
    Normal,
    Loop,
    PingPong,
    Reverse,
    LoopReverse,
    PingPongReverse,
}

impl WrapMode {
    /// Convert the editor's numeric wrap-mode code.
    pub fn from_code(code: i64) -> Result<Self, AnimationError> {
        match code {
            0 => Ok(WrapMode::Default),
            1 => Ok(WrapMode::Normal),
            2 => Ok(WrapMode::Loop),
            22 => Ok(WrapMode::PingPong),
            36 => Ok(WrapMode::Reverse),
            38 => Ok(WrapMode::LoopReverse),
            54 => Ok(WrapMode::PingPongReverse),
            _ => Err(AnimationError::UnknownWrapMode { code }),
        }
    }

    /// Convert a wrap-mode name as written by newer exporters.
    pub fn from_name(name: &str) -> Result<Self, AnimationError> {
        match name {
            "Default" | "default" => Ok(WrapMode::Default),
            "Normal" | "normal" => Ok(WrapMode::Normal),
            "Loop" | "loop" => Ok(WrapMode::Loop),
            "PingPong" | "pingPong" => Ok(WrapMode::PingPong),
            "Reverse" | "reverse" => Ok(WrapMode::Reverse),
            "LoopReverse" | "loopReverse" => Ok(WrapMode::LoopReverse),
            "PingPongReverse" | "pingPongReverse" => Ok(WrapMode::PingPongReverse),
            _ => Err(AnimationError::UnknownWrapModeName {
                name: name.to_string(),
            }),
        }
    }

    /// Looping modes never complete on their own.
    #[inline]
    pub fn is_looping(self) -> bool {
        matches!(
            self,
            WrapMode::Loop | WrapMode::PingPong | WrapMode::LoopReverse | WrapMode::PingPongReverse
        )
    }

    #[inline]
    pub fn is_reverse(self) -> bool {
        matches!(
            self,
            WrapMode::Reverse | WrapMode::LoopReverse | WrapMode::PingPongReverse
        )
    }

    #[inline]
    pub fn is_ping_pong(self) -> bool {
        matches!(self, WrapMode::PingPong | WrapMode::PingPongReverse)
    }
}

/// Immutable clip: metadata plus one property set per animated node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationClip {
    /// Display name; not guaranteed unique.
    pub name: String,
    /// Unique id assigned by the editor.
    pub uuid: String,
    /// Nominal length in sample units (frames).
    pub duration: f32,
    /// Frames per second baked by the editor.
    pub sample: f32,
    pub speed: f32,
    #[serde(default)]
    pub wrap_mode: WrapMode,
    /// Applied in declaration order every tick.
    #[serde(default)]
    pub property_sets: Vec<PropertySet>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uuid: uuid.into(),
            duration: 0.0,
            sample: 60.0,
            speed: 1.0,
            wrap_mode: WrapMode::Default,
            property_sets: Vec::new(),
        }
    }

    pub fn with_timing(mut self, duration: f32, sample: f32, speed: f32) -> Self {
        self.duration = duration;
        self.sample = sample;
        self.speed = speed;
        self
    }

    pub fn with_wrap_mode(mut self, wrap_mode: WrapMode) -> Self {
        self.wrap_mode = wrap_mode;
        self
    }

    pub fn with_property_set(mut self, set: PropertySet) -> Self {
        self.property_sets.push(set);
        self
    }

    /// Sample rate used to convert seconds into frames. Non-positive or
    /// non-finite rates fall back to 1, i.e. frames are read as seconds.
    #[inline]
    pub fn frames_per_second(&self) -> f32 {
        if self.sample.is_finite() && self.sample > 0.0 {
            self.sample
        } else {
            1.0
        }
    }

    /// Playback length in seconds (before speed is applied).
    #[inline]
    pub fn real_duration(&self) -> f32 {
        let d = self.duration / self.frames_per_second();
        if d.is_finite() {
            d.max(0.0)
        } else {
            0.0
        }
    }

    /// Check that frames are finite and ascending and that timing is usable.
    /// Importers report failures but still keep the clip as authored.
    pub fn validate(&self) -> Result<(), AnimationError> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(AnimationError::InvalidTiming {
                clip: self.name.clone(),
                reason: format!("duration must be finite and >= 0, got {}", self.duration),
            });
        }
        if !self.speed.is_finite() {
            return Err(AnimationError::InvalidTiming {
                clip: self.name.clone(),
                reason: format!("speed must be finite, got {}", self.speed),
            });
        }
        for set in &self.property_sets {
            set.validate(&self.name)?;
        }
        Ok(())
    }
}
