//! Segment timing curves.
//!
//! A curve is attached to the keyframe that opens a segment and reshapes the
//! segment fraction before the value blend. `Curve::Linear` leaves it untouched,
//! which is the default for every keyframe the editor does not annotate.

pub mod functions;

use serde::{Deserialize, Serialize};

use self::functions as f;

/// Named easing functions understood by the editor export (`"quadIn"`, `"sineInOut"`, ...).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ease {
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    QuintIn,
    QuintOut,
    QuintInOut,
    SineIn,
    SineOut,
    SineInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    CircIn,
    CircOut,
    CircInOut,
}

impl Ease {
    /// Parse an editor easing name. Unknown names return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        let ease = match name {
            "quadIn" => Ease::QuadIn,
            "quadOut" => Ease::QuadOut,
            "quadInOut" => Ease::QuadInOut,
            "cubicIn" => Ease::CubicIn,
            "cubicOut" => Ease::CubicOut,
            "cubicInOut" => Ease::CubicInOut,
            "quartIn" => Ease::QuartIn,
            "quartOut" => Ease::QuartOut,
            "quartInOut" => Ease::QuartInOut,
            "quintIn" => Ease::QuintIn,
            "quintOut" => Ease::QuintOut,
            "quintInOut" => Ease::QuintInOut,
            "sineIn" => Ease::SineIn,
            "sineOut" => Ease::SineOut,
            "sineInOut" => Ease::SineInOut,
            "expoIn" => Ease::ExpoIn,
            "expoOut" => Ease::ExpoOut,
            "expoInOut" => Ease::ExpoInOut,
            "circIn" => Ease::CircIn,
            "circOut" => Ease::CircOut,
            "circInOut" => Ease::CircInOut,
            _ => return None,
        };
        Some(ease)
    }

    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Ease::QuadIn => f::quad_in(t),
            Ease::QuadOut => f::quad_out(t),
            Ease::QuadInOut => f::quad_in_out(t),
            Ease::CubicIn => f::cubic_in(t),
            Ease::CubicOut => f::cubic_out(t),
            Ease::CubicInOut => f::cubic_in_out(t),
            Ease::QuartIn => f::quart_in(t),
            Ease::QuartOut => f::quart_out(t),
            Ease::QuartInOut => f::quart_in_out(t),
            Ease::QuintIn => f::quint_in(t),
            Ease::QuintOut => f::quint_out(t),
            Ease::QuintInOut => f::quint_in_out(t),
            Ease::SineIn => f::sine_in(t),
            Ease::SineOut => f::sine_out(t),
            Ease::SineInOut => f::sine_in_out(t),
            Ease::ExpoIn => f::expo_in(t),
            Ease::ExpoOut => f::expo_out(t),
            Ease::ExpoInOut => f::expo_in_out(t),
            Ease::CircIn => f::circ_in(t),
            Ease::CircOut => f::circ_out(t),
            Ease::CircInOut => f::circ_in_out(t),
        }
    }
}

/// Timing of the segment that starts at a keyframe.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Curve {
    #[default]
    Linear,
    /// Hold the opening keyframe's value until the next keyframe.
    Constant,
    Ease(Ease),
    /// Cubic-bezier timing with control points (x1, y1, x2, y2).
    Bezier([f32; 4]),
}

impl Curve {
    /// Map a segment fraction in `[0, 1)` to the blend factor.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Curve::Linear => t,
            Curve::Constant => 0.0,
            Curve::Ease(ease) => ease.apply(t),
            Curve::Bezier([x1, y1, x2, y2]) => f::bezier_ease_t(t, x1, y1, x2, y2),
        }
    }

    #[inline]
    pub fn is_linear(&self) -> bool {
        matches!(self, Curve::Linear)
    }

    /// Build a curve from the exporter's `curveType` name. `"linear"` and
    /// `"constant"` are recognised alongside the easing names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Curve::Linear),
            "constant" => Some(Curve::Constant),
            other => Ease::from_name(other).map(Curve::Ease),
        }
    }

    /// Build a cubic-bezier curve from the exporter's `curveData` array.
    pub fn from_bezier_data(data: &[f32]) -> Option<Self> {
        match data {
            [x1, y1, x2, y2] if data.iter().all(|v| v.is_finite()) => {
                Some(Curve::Bezier([*x1, *y1, *x2, *y2]))
            }
            _ => None,
        }
    }
}
