//! Batched control input.
//!
//! Hosts that prefer data over method calls (scripting bridges, replay logs) queue
//! [`Command`]s and hand them to `AnimationRegistry::apply_inputs` before `update`.
//! Commands address playbacks the same way the direct API does: a target node and
//! a clip display name.

use serde::{Deserialize, Serialize};

use crate::ids::NodeId;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    /// Applied in order.
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl Inputs {
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum Command {
    Play { target: NodeId, clip: String },
    Stop { target: NodeId, clip: String },
    Pause { target: NodeId, clip: String },
    Resume { target: NodeId, clip: String },
}
