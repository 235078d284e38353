//! Interpolation helpers:
//! - lerp_f32 (the base blend every value type builds on)
//! - cubic-bezier timing (x inverted by bisection, then y evaluated)
//! - named easing functions over a unit segment fraction

use std::f32::consts::{FRAC_PI_2, PI};

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Given control points (x1, y1, x2, y2) and an input t in [0,1],
/// compute the eased y by inverting the x bezier via binary search.
#[inline]
pub fn bezier_ease_t(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    // Bezier(0,0,1,1) is exactly linear
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    // Monotonic X in [0,1] assumed for x1/x2 in [0,1]
    let x1 = x1.clamp(0.0, 1.0);
    let x2 = x2.clamp(0.0, 1.0);
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}

#[inline]
pub fn quad_in(t: f32) -> f32 {
    t * t
}

#[inline]
pub fn quad_out(t: f32) -> f32 {
    t * (2.0 - t)
}

#[inline]
pub fn quad_in_out(t: f32) -> f32 {
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * t * t
    } else {
        let t = t - 1.0;
        -0.5 * (t * (t - 2.0) - 1.0)
    }
}

#[inline]
pub fn cubic_in(t: f32) -> f32 {
    t * t * t
}

#[inline]
pub fn cubic_out(t: f32) -> f32 {
    let t = t - 1.0;
    t * t * t + 1.0
}

#[inline]
pub fn cubic_in_out(t: f32) -> f32 {
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * t * t * t
    } else {
        let t = t - 2.0;
        0.5 * (t * t * t + 2.0)
    }
}

#[inline]
pub fn quart_in(t: f32) -> f32 {
    t * t * t * t
}

#[inline]
pub fn quart_out(t: f32) -> f32 {
    let t = t - 1.0;
    1.0 - t * t * t * t
}

#[inline]
pub fn quart_in_out(t: f32) -> f32 {
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * t * t * t * t
    } else {
        let t = t - 2.0;
        -0.5 * (t * t * t * t - 2.0)
    }
}

#[inline]
pub fn quint_in(t: f32) -> f32 {
    t * t * t * t * t
}

#[inline]
pub fn quint_out(t: f32) -> f32 {
    let t = t - 1.0;
    t * t * t * t * t + 1.0
}

#[inline]
pub fn quint_in_out(t: f32) -> f32 {
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * t * t * t * t * t
    } else {
        let t = t - 2.0;
        0.5 * (t * t * t * t * t + 2.0)
    }
}

#[inline]
pub fn sine_in(t: f32) -> f32 {
    1.0 - (t * FRAC_PI_2).cos()
}

#[inline]
pub fn sine_out(t: f32) -> f32 {
    (t * FRAC_PI_2).sin()
}

#[inline]
pub fn sine_in_out(t: f32) -> f32 {
    0.5 * (1.0 - (PI * t).cos())
}

#[inline]
pub fn expo_in(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else {
        1024f32.powf(t - 1.0)
    }
}

#[inline]
pub fn expo_out(t: f32) -> f32 {
    if t == 1.0 {
        1.0
    } else {
        1.0 - 2f32.powf(-10.0 * t)
    }
}

#[inline]
pub fn expo_in_out(t: f32) -> f32 {
    if t == 0.0 {
        return 0.0;
    }
    if t == 1.0 {
        return 1.0;
    }
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * 1024f32.powf(t - 1.0)
    } else {
        0.5 * (-(2f32.powf(-10.0 * (t - 1.0))) + 2.0)
    }
}

#[inline]
pub fn circ_in(t: f32) -> f32 {
    1.0 - (1.0 - t * t).max(0.0).sqrt()
}

#[inline]
pub fn circ_out(t: f32) -> f32 {
    let t = t - 1.0;
    (1.0 - t * t).max(0.0).sqrt()
}

#[inline]
pub fn circ_in_out(t: f32) -> f32 {
    let t = t * 2.0;
    if t < 1.0 {
        -0.5 * ((1.0 - t * t).max(0.0).sqrt() - 1.0)
    } else {
        let t = t - 2.0;
        0.5 * ((1.0 - t * t).max(0.0).sqrt() + 1.0)
    }
}
