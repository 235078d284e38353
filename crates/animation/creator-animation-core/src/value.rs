//! Value types carried by keyframes and the interpolation trait they share.

use serde::{Deserialize, Serialize};

use crate::interp::functions::lerp_f32;

/// 2D vector (position, anchor).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 8-bit RGB color as used by the host engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color3 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color3 {
    pub const WHITE: Color3 = Color3::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Componentwise blend between two keyframe values.
///
/// `t` is the (possibly eased) segment fraction. Eased curves may overshoot
/// `[0, 1]`; implementations must stay total for any finite `t`.
pub trait Interpolate: Copy {
    fn interpolate(a: Self, b: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        lerp_f32(a, b, t)
    }
}

impl Interpolate for Vec2 {
    #[inline]
    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        Vec2 {
            x: lerp_f32(a.x, b.x, t),
            y: lerp_f32(a.y, b.y, t),
        }
    }
}

/// Blend one 8-bit channel in float space, clamp, then truncate toward zero
/// (the host stores channels as unsigned bytes).
#[inline]
fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    let v = lerp_f32(a as f32, b as f32, t);
    if v.is_nan() {
        return a;
    }
    v.clamp(0.0, 255.0) as u8
}

impl Interpolate for Color3 {
    #[inline]
    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        Color3 {
            r: lerp_channel(a.r, b.r, t),
            g: lerp_channel(a.g, b.g, t),
            b: lerp_channel(a.b, b.b, t),
        }
    }
}
