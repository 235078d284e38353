//! Semantic playback events.
//!
//! The registry queues these while driving players; hosts pull them with
//! `AnimationRegistry::drain_events` after each update. Property values never
//! appear here: they go straight to the host through `PropertySink`.

use serde::{Deserialize, Serialize};

use crate::ids::{ClipId, NodeId, PlayerId};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[non_exhaustive]
pub enum AnimationEvent {
    Started {
        player: PlayerId,
        target: NodeId,
        clip: ClipId,
        name: String,
    },
    Paused {
        player: PlayerId,
    },
    Resumed {
        player: PlayerId,
    },
    /// Stopped explicitly; no completion callback fires.
    Stopped {
        player: PlayerId,
    },
    /// Displaced by a new playback of the same clip on the same target.
    Replaced {
        player: PlayerId,
        by: PlayerId,
    },
    /// A looping clip started pass `pass` (1-based count of wraps so far).
    Looped {
        player: PlayerId,
        pass: u32,
    },
    Completed {
        player: PlayerId,
        elapsed: f32,
    },
}

impl AnimationEvent {
    /// Player the event concerns.
    pub fn player(&self) -> PlayerId {
        match self {
            AnimationEvent::Started { player, .. }
            | AnimationEvent::Paused { player }
            | AnimationEvent::Resumed { player }
            | AnimationEvent::Stopped { player }
            | AnimationEvent::Replaced { player, .. }
            | AnimationEvent::Looped { player, .. }
            | AnimationEvent::Completed { player, .. } => *player,
        }
    }
}
