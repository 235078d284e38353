//! Per-playback driver for one clip against one root node.
//!
//! States: `Idle → Running → {Completed, Stopped, Paused ↔ Running}`.
//! A player holds only handles: the clip lives in the registry's [`ClipLibrary`]
//! and the root node in the host scene graph.

use std::fmt;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::binding::{resolve_target, SceneHost};
use crate::data::{AnimationClip, WrapMode};
use crate::ids::{ClipId, NodeId, PlayerId};
use crate::library::ClipLibrary;

/// Invoked exactly once when a non-looping playback reaches its end.
pub type CompletionCallback = Box<dyn FnOnce() + Send + 'static>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerState {
    Idle,
    Running,
    Paused,
    Completed,
    Stopped,
}

/// What a single `tick` did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Player was not running; nothing was sampled.
    Inactive,
    Advanced,
    /// A looping clip entered a new pass.
    Wrapped { pass: u32 },
    /// Final frame written; the player is now `Completed`.
    Completed,
}

fn fmod(a: f32, b: f32) -> f32 {
    if b == 0.0 {
        return 0.0;
    }
    let m = a % b;
    if (m < 0.0 && b > 0.0) || (m > 0.0 && b < 0.0) {
        m + b
    } else {
        m
    }
}

/// Reflect t into [0, span] with ping-pong behavior, where period = 2 * span.
fn ping_pong(t: f32, span: f32) -> f32 {
    if span <= 0.0 {
        return 0.0;
    }
    let period = 2.0 * span;
    let m = fmod(t, period);
    if m <= span {
        m
    } else {
        period - m
    }
}

/// Map elapsed playback seconds to clip-local seconds under `mode`.
/// Returns the local time and the index of the current pass (0 for one-shot modes).
pub fn wrap_time(mode: WrapMode, elapsed: f32, duration: f32) -> (f32, u32) {
    if !(duration > 0.0) || !duration.is_finite() {
        return (0.0, 0);
    }
    let pass = if mode.is_looping() {
        let p = (elapsed / duration).floor();
        if p.is_finite() && p > 0.0 {
            p.min(u32::MAX as f32) as u32
        } else {
            0
        }
    } else {
        0
    };
    let local = match mode {
        WrapMode::Default | WrapMode::Normal => elapsed,
        WrapMode::Reverse => (duration - elapsed).max(0.0),
        WrapMode::Loop => fmod(elapsed, duration),
        WrapMode::LoopReverse => duration - fmod(elapsed, duration),
        WrapMode::PingPong => ping_pong(elapsed, duration),
        WrapMode::PingPongReverse => duration - ping_pong(elapsed, duration),
    };
    (local, pass)
}

pub struct AnimationPlayer {
    id: PlayerId,
    clip: ClipId,
    root: NodeId,
    /// Playback seconds, already scaled by clip speed.
    elapsed: f32,
    state: PlayerState,
    pass: u32,
    on_complete: Option<CompletionCallback>,
}

impl fmt::Debug for AnimationPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationPlayer")
            .field("id", &self.id)
            .field("clip", &self.clip)
            .field("root", &self.root)
            .field("elapsed", &self.elapsed)
            .field("state", &self.state)
            .field("pass", &self.pass)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl AnimationPlayer {
    pub fn new(id: PlayerId, clip: ClipId, root: NodeId) -> Self {
        Self {
            id,
            clip,
            root,
            elapsed: 0.0,
            state: PlayerState::Idle,
            pass: 0,
            on_complete: None,
        }
    }

    pub fn with_completion(mut self, callback: CompletionCallback) -> Self {
        self.on_complete = Some(callback);
        self
    }

    pub fn set_completion(&mut self, callback: Option<CompletionCallback>) {
        self.on_complete = callback;
    }

    #[inline]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[inline]
    pub fn clip(&self) -> ClipId {
        self.clip
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn state(&self) -> PlayerState {
        self.state
    }

    #[inline]
    pub fn pass(&self) -> u32 {
        self.pass
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == PlayerState::Running
    }

    /// Running or paused: the player still owns its (target, clip) key.
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self.state, PlayerState::Running | PlayerState::Paused)
    }

    /// Idle → Running with elapsed reset. No-op in any other state.
    pub fn start(&mut self) -> bool {
        if self.state != PlayerState::Idle {
            debug!("player {:?}: start ignored in {:?}", self.id, self.state);
            return false;
        }
        self.elapsed = 0.0;
        self.pass = 0;
        self.state = PlayerState::Running;
        debug!("player {:?}: started clip {:?} on {:?}", self.id, self.clip, self.root);
        true
    }

    /// Running → Paused; elapsed is kept. No-op otherwise.
    pub fn pause(&mut self) -> bool {
        if self.state != PlayerState::Running {
            return false;
        }
        self.state = PlayerState::Paused;
        debug!("player {:?}: paused at {}", self.id, self.elapsed);
        true
    }

    /// Paused → Running without resetting elapsed. No-op otherwise.
    pub fn resume(&mut self) -> bool {
        if self.state != PlayerState::Paused {
            return false;
        }
        self.state = PlayerState::Running;
        debug!("player {:?}: resumed at {}", self.id, self.elapsed);
        true
    }

    /// Any state → Stopped, immediately. The completion callback is dropped unfired.
    pub fn stop(&mut self) -> bool {
        if self.state == PlayerState::Stopped {
            return false;
        }
        self.state = PlayerState::Stopped;
        self.on_complete = None;
        debug!("player {:?}: stopped at {}", self.id, self.elapsed);
        true
    }

    /// Resolve the clip by handle and advance. A missing clip stops the player.
    pub fn tick<H: SceneHost + ?Sized>(
        &mut self,
        dt: f32,
        clips: &ClipLibrary,
        host: &mut H,
    ) -> Tick {
        if self.state != PlayerState::Running {
            return Tick::Inactive;
        }
        match clips.get(self.clip) {
            Some(clip) => self.advance(dt, clip, host),
            None => {
                warn!("player {:?}: clip {:?} not found; stopping", self.id, self.clip);
                self.stop();
                Tick::Inactive
            }
        }
    }

    /// Advance by `dt` seconds and write sampled values for `clip` onto the host.
    ///
    /// `clip` must be the clip this player was created for.
    pub fn advance<H: SceneHost + ?Sized>(
        &mut self,
        dt: f32,
        clip: &AnimationClip,
        host: &mut H,
    ) -> Tick {
        if self.state != PlayerState::Running {
            return Tick::Inactive;
        }
        let dt = if dt.is_finite() { dt } else { 0.0 };
        self.elapsed += dt * clip.speed;

        let duration = clip.real_duration();
        let (local, pass) = wrap_time(clip.wrap_mode, self.elapsed, duration);
        let frame = local * clip.frames_per_second();
        self.apply(clip, frame, host);

        if !clip.wrap_mode.is_looping() {
            // A stalled or backwards clip would otherwise hold its first frame forever.
            let stalled = clip.speed <= 0.0 && self.elapsed <= 0.0;
            if self.elapsed >= duration || stalled {
                self.complete();
                return Tick::Completed;
            }
            return Tick::Advanced;
        }
        if pass != self.pass {
            self.pass = pass;
            return Tick::Wrapped { pass };
        }
        Tick::Advanced
    }

    fn apply<H: SceneHost + ?Sized>(&self, clip: &AnimationClip, frame: f32, host: &mut H) {
        for set in &clip.property_sets {
            let Some(node) = resolve_target(&*host, self.root, &set.path) else {
                trace!(
                    "player {:?}: no node at '{}' under {:?}; skipping",
                    self.id,
                    set.path,
                    self.root
                );
                continue;
            };
            set.sample_at(frame).apply(node, host);
        }
    }

    fn complete(&mut self) {
        self.state = PlayerState::Completed;
        debug!("player {:?}: completed at {}", self.id, self.elapsed);
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
    }
}
