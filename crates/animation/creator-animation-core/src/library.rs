//! Clip arena.
//!
//! Clips are stored densely and addressed by [`ClipId`]; a uuid index supports the
//! importer, which resolves node animation references by uuid (display names are
//! not unique).

use hashbrown::HashMap;
use log::{debug, warn};

use crate::data::AnimationClip;
use crate::ids::{ClipId, IdAllocator};

#[derive(Default, Debug)]
pub struct ClipLibrary {
    ids: IdAllocator,
    items: Vec<(ClipId, AnimationClip)>,
    by_uuid: HashMap<String, ClipId>,
}

impl ClipLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a clip and return its handle. A later clip with an already-known
    /// uuid shadows the earlier one in uuid lookups; both stay addressable by id.
    /// Clips with an empty uuid are stored but not indexed.
    pub fn insert(&mut self, clip: AnimationClip) -> ClipId {
        let id = self.ids.alloc_clip();
        if clip.uuid.is_empty() {
            debug!("clip '{}' has no uuid; not indexed", clip.name);
        } else if let Some(prev) = self.by_uuid.insert(clip.uuid.clone(), id) {
            warn!(
                "clip uuid '{}' registered twice ({:?} shadowed by {:?})",
                clip.uuid, prev, id
            );
        }
        self.items.push((id, clip));
        id
    }

    pub fn get(&self, id: ClipId) -> Option<&AnimationClip> {
        // Ids are dense indices handed out by this library.
        self.items
            .get(id.0 as usize)
            .filter(|(cid, _)| *cid == id)
            .map(|(_, clip)| clip)
    }

    pub fn id_by_uuid(&self, uuid: &str) -> Option<ClipId> {
        self.by_uuid.get(uuid).copied()
    }

    pub fn get_by_uuid(&self, uuid: &str) -> Option<&AnimationClip> {
        self.id_by_uuid(uuid).and_then(|id| self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClipId, &AnimationClip)> {
        self.items.iter().map(|(id, clip)| (*id, clip))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
