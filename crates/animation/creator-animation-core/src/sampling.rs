//! Track sampling.
//!
//! Model:
//! - A Track holds keyframes with `frame` stamps in sample units, in source order.
//! - Before the first keyframe the first value holds; at or after the last keyframe
//!   the last value holds.
//! - In between, the segment `[k(i), k(i+1))` containing the frame is found by a
//!   linear scan, its fraction is shaped by `k(i).curve`, and values blend
//!   componentwise.
//!
//! API:
//! - sample(&Track, frame) -> Option<T>; `None` only for empty tracks.

use crate::data::{Keyframe, Track};
use crate::value::Interpolate;

/// Locate the segment for `frame`. Returns `(i, Some(i + 1))` for an interior
/// segment and `(i, None)` when the value at `i` should be held.
///
/// Edge cases:
/// - frame < first.frame → `(0, None)`
/// - frame >= last.frame (or NaN) → `(last, None)`
fn find_segment<T>(keys: &[Keyframe<T>], frame: f32) -> (usize, Option<usize>) {
    let last = keys.len() - 1;
    if frame < keys[0].frame {
        return (0, None);
    }
    if !(frame < keys[last].frame) {
        return (last, None);
    }
    // Linear scan: tracks are short and their order is not guaranteed.
    for i in 0..last {
        if frame < keys[i + 1].frame {
            return (i, Some(i + 1));
        }
    }
    (last, None)
}

/// Sample a single track at `frame` (sample units).
pub fn sample<T: Interpolate>(track: &Track<T>, frame: f32) -> Option<T> {
    let keys = track.keyframes();
    if keys.is_empty() {
        return None;
    }
    let (i0, i1) = find_segment(keys, frame);
    let Some(i1) = i1 else {
        return Some(keys[i0].value);
    };
    let left = &keys[i0];
    let right = &keys[i1];

    let span = right.frame - left.frame;
    // Zero-length or malformed segment: the later keyframe wins.
    if !(span > 0.0) || !span.is_finite() {
        return Some(right.value);
    }
    let t = ((frame - left.frame) / span).clamp(0.0, 1.0);
    Some(T::interpolate(left.value, right.value, left.curve.apply(t)))
}
