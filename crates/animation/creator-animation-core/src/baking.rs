//! Baking API: precompute per-frame property samples for a clip over a time window.
//!
//! A baked clip is an alternative execution strategy for the same data: frame `i`
//! holds exactly what direct sampling writes at clip-local time
//! `start_time + i / frame_rate`. Baking covers one forward pass in clip-local
//! seconds; wrap modes are a playback concern and are not baked in.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::binding::{resolve_target, SceneHost};
use crate::data::{AnimationClip, PropertySample};
use crate::ids::NodeId;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BakingConfig {
    /// Output frame rate (Hz). `None` uses the clip's own sample rate.
    pub frame_rate: Option<f32>,
    /// Start time (seconds) in clip space.
    pub start_time: f32,
    /// End time (seconds) in clip space; if None, uses the clip's real duration.
    pub end_time: Option<f32>,
    /// Upper bound on baked frames. Windows needing more are resampled at a lower
    /// rate so that exactly `max_frames` frames still span start to end.
    pub max_frames: usize,
}

/// Default for [`BakingConfig::max_frames`].
pub const DEFAULT_MAX_BAKED_FRAMES: usize = 65_536;

impl Default for BakingConfig {
    fn default() -> Self {
        Self {
            frame_rate: None,
            start_time: 0.0,
            end_time: None,
            max_frames: DEFAULT_MAX_BAKED_FRAMES,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BakedPropertySet {
    pub path: String,
    /// One snapshot per baked frame.
    pub samples: Vec<PropertySample>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BakedClip {
    pub uuid: String,
    pub name: String,
    pub frame_rate: f32,
    pub start_time: f32,
    pub end_time: f32,
    pub frame_count: usize,
    pub sets: Vec<BakedPropertySet>,
}

impl BakedClip {
    /// Clip-local seconds of baked frame `index`.
    pub fn time_of(&self, index: usize) -> f32 {
        self.start_time + index as f32 / self.frame_rate
    }

    /// Write baked frame `index` onto `host` under `root`, resolving paths the same
    /// way a player does. Out-of-range indices clamp to the last frame.
    pub fn apply_frame<H: SceneHost + ?Sized>(&self, index: usize, root: NodeId, host: &mut H) {
        if self.frame_count == 0 {
            return;
        }
        let index = index.min(self.frame_count - 1);
        for set in &self.sets {
            let Some(node) = resolve_target(&*host, root, &set.path) else {
                continue;
            };
            if let Some(sample) = set.samples.get(index) {
                sample.apply(node, host);
            }
        }
    }
}

/// Bake every property set of `clip` using the provided config.
pub fn bake_clip(clip: &AnimationClip, cfg: &BakingConfig) -> BakedClip {
    let fps = clip.frames_per_second();
    let mut rate = cfg
        .frame_rate
        .filter(|r| r.is_finite() && *r > 0.0)
        .unwrap_or(fps);
    let duration = clip.real_duration();
    let start = if cfg.start_time.is_finite() {
        cfg.start_time.clamp(0.0, duration)
    } else {
        0.0
    };
    let end = cfg
        .end_time
        .filter(|e| e.is_finite())
        .unwrap_or(duration)
        .clamp(start, duration);
    let max_frames = cfg.max_frames.max(1);
    let span = f64::from(end) - f64::from(start);
    // intervals between frames; the frame count is inclusive of the end
    let intervals = (span * f64::from(rate)).ceil();
    let frame_count = if intervals.is_finite() && intervals < max_frames as f64 {
        (intervals.max(0.0) as usize).saturating_add(1)
    } else {
        warn!(
            "bake '{}': {} frames at {} Hz exceed the cap of {}; resampling",
            clip.name, intervals, rate, max_frames
        );
        if max_frames > 1 {
            rate = ((max_frames - 1) as f64 / span) as f32;
        }
        max_frames
    };

    let sets = clip
        .property_sets
        .iter()
        .map(|set| BakedPropertySet {
            path: set.path.clone(),
            samples: (0..frame_count)
                .map(|i| {
                    let t = (start + i as f32 / rate).min(end);
                    set.sample_at(t * fps)
                })
                .collect(),
        })
        .collect();

    BakedClip {
        uuid: clip.uuid.clone(),
        name: clip.name.clone(),
        frame_rate: rate,
        start_time: start,
        end_time: end,
        frame_count,
        sets,
    }
}

/// Export baked data as serde_json::Value (stable schema for tools).
pub fn export_baked_json(baked: &BakedClip) -> serde_json::Value {
    serde_json::to_value(baked).unwrap_or(serde_json::Value::Null)
}
