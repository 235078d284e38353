//! Per-scene animation registry.
//!
//! Owns the clip arena, the (node → clips) entries discovered while the scene was
//! built, and the table of active players. Lookups are linear and first-match:
//! entries are few and registration order is meaningful.
//!
//! Invariant: at most one active (running or paused) player per
//! `(target, clip display name)`. Starting a playback for a key that is already
//! active stops and replaces the previous player.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::binding::SceneHost;
use crate::config::Config;
use crate::data::AnimationClip;
use crate::ids::{ClipId, IdAllocator, NodeId, PlayerId};
use crate::inputs::{Command, Inputs};
use crate::library::ClipLibrary;
use crate::outputs::AnimationEvent;
use crate::player::{AnimationPlayer, CompletionCallback, Tick};

/// Clips available on one node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationEntry {
    pub target: NodeId,
    #[serde(default)]
    pub clips: Vec<ClipId>,
    #[serde(default)]
    pub default_clip: Option<ClipId>,
    #[serde(default)]
    pub play_on_load: bool,
}

impl AnimationEntry {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            clips: Vec::new(),
            default_clip: None,
            play_on_load: false,
        }
    }

    pub fn with_clip(mut self, clip: ClipId) -> Self {
        self.clips.push(clip);
        self
    }

    pub fn with_default_clip(mut self, clip: ClipId) -> Self {
        self.default_clip = Some(clip);
        self
    }

    pub fn with_play_on_load(mut self, play_on_load: bool) -> Self {
        self.play_on_load = play_on_load;
        self
    }
}

/// Bounded event buffer; overflow is counted and reported on drain.
#[derive(Debug)]
struct EventQueue {
    events: Vec<AnimationEvent>,
    cap: usize,
    dropped: usize,
}

impl EventQueue {
    fn push(&mut self, event: AnimationEvent) {
        if self.events.len() >= self.cap {
            if self.dropped == 0 {
                warn!("event queue full ({} events); dropping until drained", self.cap);
            }
            self.dropped += 1;
            return;
        }
        self.events.push(event);
    }

    fn drain(&mut self) -> Vec<AnimationEvent> {
        if self.dropped > 0 {
            warn!("{} animation events were dropped since last drain", self.dropped);
            self.dropped = 0;
        }
        std::mem::take(&mut self.events)
    }
}

pub struct AnimationRegistry {
    cfg: Config,
    ids: IdAllocator,
    clips: ClipLibrary,
    entries: Vec<AnimationEntry>,
    /// In start order; ticked in this order.
    players: Vec<AnimationPlayer>,
    events: EventQueue,
    loaded: bool,
}

impl Default for AnimationRegistry {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AnimationRegistry {
    pub fn new(cfg: Config) -> Self {
        Self {
            ids: IdAllocator::new(),
            clips: ClipLibrary::new(),
            entries: Vec::with_capacity(cfg.entry_capacity),
            players: Vec::with_capacity(cfg.player_capacity),
            events: EventQueue {
                events: Vec::new(),
                cap: cfg.max_pending_events,
                dropped: 0,
            },
            loaded: false,
            cfg,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn clips(&self) -> &ClipLibrary {
        &self.clips
    }

    /// Store an imported clip. Clips are immutable once inserted.
    pub fn insert_clip(&mut self, clip: AnimationClip) -> ClipId {
        self.clips.insert(clip)
    }

    pub fn entries(&self) -> &[AnimationEntry] {
        &self.entries
    }

    /// Append an entry. Duplicate targets are kept; lookups see the first one.
    pub fn add_animation(&mut self, entry: AnimationEntry) {
        self.entries.push(entry);
    }

    /// Whether `play_on_load` already ran.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Start the default clip of every entry flagged for autoplay.
    /// Runs once per registry; returns the number of playbacks started.
    pub fn play_on_load(&mut self) -> usize {
        if self.loaded {
            warn!("play_on_load called twice; ignoring");
            return 0;
        }
        self.loaded = true;
        let pending: Vec<(NodeId, ClipId)> = self
            .entries
            .iter()
            .filter(|e| e.play_on_load)
            .filter_map(|e| e.default_clip.map(|clip| (e.target, clip)))
            .collect();
        pending
            .into_iter()
            .filter_map(|(target, clip)| self.run_clip(target, clip, None))
            .count()
    }

    /// Play the clip named `name` registered on `target`.
    pub fn play_animation_clip(&mut self, target: NodeId, name: &str) -> Option<PlayerId> {
        self.play_animation_clip_with_callback(target, name, None)
    }

    /// Like [`play_animation_clip`](Self::play_animation_clip) with a completion
    /// callback. The callback is dropped unfired if nothing starts.
    pub fn play_animation_clip_with_callback(
        &mut self,
        target: NodeId,
        name: &str,
        on_complete: Option<CompletionCallback>,
    ) -> Option<PlayerId> {
        let Some(entry) = self.entries.iter().find(|e| e.target == target) else {
            warn!("can't find target {:?} for clip '{}'", target, name);
            return None;
        };
        let clip = entry
            .clips
            .iter()
            .copied()
            .find(|id| self.clips.get(*id).is_some_and(|c| c.name == name));
        let Some(clip) = clip else {
            warn!("can't find clip '{}' on target {:?}", name, target);
            return None;
        };
        self.run_clip(target, clip, on_complete)
    }

    /// Start `clip` on `target` directly, replacing any active playback of the
    /// same clip name on that target.
    pub fn run_clip(
        &mut self,
        target: NodeId,
        clip: ClipId,
        on_complete: Option<CompletionCallback>,
    ) -> Option<PlayerId> {
        let Some(name) = self.clips.get(clip).map(|c| c.name.clone()) else {
            warn!("run_clip: unknown clip {:?}", clip);
            return None;
        };
        let id = self.ids.alloc_player();
        if let Some(idx) = self.find_active(target, &name) {
            let mut prev = self.players.remove(idx);
            prev.stop();
            debug!("{:?} replaces {:?} for '{}' on {:?}", id, prev.id(), name, target);
            self.events.push(AnimationEvent::Replaced {
                player: prev.id(),
                by: id,
            });
        }
        let mut player = AnimationPlayer::new(id, clip, target);
        player.set_completion(on_complete);
        player.start();
        self.events.push(AnimationEvent::Started {
            player: id,
            target,
            clip,
            name,
        });
        self.players.push(player);
        Some(id)
    }

    /// Stop and discard the active playback for `(target, name)`.
    pub fn stop_animation_clip(&mut self, target: NodeId, name: &str) -> bool {
        let Some(idx) = self.find_active(target, name) else {
            debug!("stop: no active '{}' on {:?}", name, target);
            return false;
        };
        let mut player = self.players.remove(idx);
        player.stop();
        self.events.push(AnimationEvent::Stopped {
            player: player.id(),
        });
        true
    }

    pub fn pause_animation_clip(&mut self, target: NodeId, name: &str) -> bool {
        let Some(idx) = self.find_active(target, name) else {
            debug!("pause: no active '{}' on {:?}", name, target);
            return false;
        };
        let player = &mut self.players[idx];
        if !player.pause() {
            return false;
        }
        let player = player.id();
        self.events.push(AnimationEvent::Paused { player });
        true
    }

    pub fn resume_animation_clip(&mut self, target: NodeId, name: &str) -> bool {
        let Some(idx) = self.find_active(target, name) else {
            debug!("resume: no active '{}' on {:?}", name, target);
            return false;
        };
        let player = &mut self.players[idx];
        if !player.resume() {
            return false;
        }
        let player = player.id();
        self.events.push(AnimationEvent::Resumed { player });
        true
    }

    /// Active (running or paused) player for `(target, name)`.
    pub fn active_player(&self, target: NodeId, name: &str) -> Option<&AnimationPlayer> {
        self.find_active(target, name).map(|idx| &self.players[idx])
    }

    pub fn active_player_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    pub fn players(&self) -> impl Iterator<Item = &AnimationPlayer> {
        self.players.iter()
    }

    /// Advance every running player by `dt` seconds, writing onto `host`.
    /// Completed players are discarded after the pass.
    pub fn update<H: SceneHost + ?Sized>(&mut self, dt: f32, host: &mut H) {
        let Self {
            players,
            clips,
            events,
            ..
        } = self;
        for player in players.iter_mut() {
            match player.tick(dt, clips, host) {
                Tick::Completed => events.push(AnimationEvent::Completed {
                    player: player.id(),
                    elapsed: player.elapsed(),
                }),
                Tick::Wrapped { pass } => events.push(AnimationEvent::Looped {
                    player: player.id(),
                    pass,
                }),
                Tick::Inactive | Tick::Advanced => {}
            }
        }
        players.retain(AnimationPlayer::is_active);
    }

    /// Apply a command batch in order.
    pub fn apply_inputs(&mut self, inputs: &Inputs) {
        for command in &inputs.commands {
            match command {
                Command::Play { target, clip } => {
                    self.play_animation_clip(*target, clip);
                }
                Command::Stop { target, clip } => {
                    self.stop_animation_clip(*target, clip);
                }
                Command::Pause { target, clip } => {
                    self.pause_animation_clip(*target, clip);
                }
                Command::Resume { target, clip } => {
                    self.resume_animation_clip(*target, clip);
                }
            }
        }
    }

    /// Take all events queued since the previous drain.
    pub fn drain_events(&mut self) -> Vec<AnimationEvent> {
        self.events.drain()
    }

    fn find_active(&self, target: NodeId, name: &str) -> Option<usize> {
        self.players.iter().position(|p| {
            p.root() == target
                && p.is_active()
                && self.clips.get(p.clip()).is_some_and(|c| c.name == name)
        })
    }
}
