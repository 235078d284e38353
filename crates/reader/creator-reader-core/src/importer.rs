//! Export → runtime conversion.
//!
//! - Clips: scalar fields are copied verbatim, the wrap-mode code is converted,
//!   and every `(frame, value)` pair is appended to its track in source order
//!   (no sorting, no de-duplication).
//! - Tree: nodes are created through the host factory, parent first; every node
//!   with an animation component becomes an [`AnimationEntry`].

use creator_animation_core::{
    AnimationClip, AnimationEntry, AnimationError, AnimationRegistry, ClipId, Curve, Keyframe,
    NodeId, PropertySet, Track, WrapMode,
};
use log::{debug, trace, warn};

use crate::node::{AnimationRef, NodeFactory};
use crate::schema::{AnimProps, AnimationClipDef, KeyDef, NodeTree, WrapModeDef};

pub fn convert_wrap_mode(def: &WrapModeDef) -> Result<WrapMode, AnimationError> {
    match def {
        WrapModeDef::Code(code) => WrapMode::from_code(*code),
        WrapModeDef::Name(name) => WrapMode::from_name(name),
    }
}

fn convert_curve<T>(key: &KeyDef<T>, clip: &str) -> Curve {
    if let Some(data) = &key.curve_data {
        return Curve::from_bezier_data(data).unwrap_or_else(|| {
            warn!(
                "clip '{}': malformed curveData {:?} at frame {}; using linear",
                clip, data, key.frame
            );
            Curve::Linear
        });
    }
    match key.curve_type.as_deref() {
        None => Curve::Linear,
        Some(name) => Curve::from_name(name).unwrap_or_else(|| {
            warn!(
                "clip '{}': unknown curveType '{}' at frame {}; using linear",
                clip, name, key.frame
            );
            Curve::Linear
        }),
    }
}

fn convert_track<T: Copy>(keys: &[KeyDef<T>], clip: &str) -> Track<T> {
    Track::from_keyframes(
        keys.iter()
            .map(|k| Keyframe::new(k.frame, k.value).with_curve(convert_curve(k, clip)))
            .collect(),
    )
}

fn convert_props(path: &str, props: &AnimProps, clip: &str) -> PropertySet {
    PropertySet {
        path: path.to_string(),
        position: convert_track(&props.position, clip),
        color: convert_track(&props.color, clip),
        scale_x: convert_track(&props.scale_x, clip),
        scale_y: convert_track(&props.scale_y, clip),
        rotation: convert_track(&props.rotation, clip),
        skew_x: convert_track(&props.skew_x, clip),
        skew_y: convert_track(&props.skew_y, clip),
        opacity: convert_track(&props.opacity, clip),
        anchor_x: convert_track(&props.anchor_x, clip),
        anchor_y: convert_track(&props.anchor_y, clip),
        position_x: convert_track(&props.position_x, clip),
        position_y: convert_track(&props.position_y, clip),
    }
}

/// Build a clip from its export description. An unknown wrap mode is logged and
/// read as `Default`.
pub fn convert_clip(def: &AnimationClipDef) -> AnimationClip {
    let wrap_mode = convert_wrap_mode(&def.wrap_mode).unwrap_or_else(|err| {
        warn!("clip '{}': {}; using Default", def.name, err);
        WrapMode::Default
    });
    let mut clip = AnimationClip::new(def.name.clone(), def.uuid.clone())
        .with_timing(def.duration, def.sample, def.speed)
        .with_wrap_mode(wrap_mode);
    clip.property_sets = def
        .curve_data
        .iter()
        .map(|cd| convert_props(&cd.path, &cd.props, &def.name))
        .collect();
    clip
}

/// Convert and store every clip, returning handles in export order.
///
/// With `strict`, the first unknown wrap mode or malformed track aborts the import;
/// otherwise problems are logged and the clip is kept as authored.
pub fn import_clips(
    defs: &[AnimationClipDef],
    registry: &mut AnimationRegistry,
    strict: bool,
) -> Result<Vec<ClipId>, AnimationError> {
    let mut ids = Vec::with_capacity(defs.len());
    for def in defs {
        let clip = convert_clip(def);
        if strict {
            convert_wrap_mode(&def.wrap_mode)?;
            clip.validate()?;
        } else if let Err(err) = clip.validate() {
            warn!("{}; keeping clip as authored", err);
        }
        ids.push(registry.insert_clip(clip));
    }
    debug!("imported {} animation clips", ids.len());
    Ok(ids)
}

/// Register `anim` for `target`. Unknown clip uuids are logged and skipped.
/// Returns false when nothing usable remained and no entry was added.
pub fn register_animation(
    registry: &mut AnimationRegistry,
    target: NodeId,
    anim: &AnimationRef,
) -> bool {
    let mut entry = AnimationEntry::new(target).with_play_on_load(anim.play_on_load);
    for uuid in &anim.clips {
        match registry.clips().id_by_uuid(uuid) {
            Some(id) => entry.clips.push(id),
            None => warn!("node {:?}: unknown clip uuid '{}'; skipped", target, uuid),
        }
    }
    if let Some(key) = &anim.default_clip {
        let clips = registry.clips();
        // Older exports reference the default clip by name.
        let found = clips.id_by_uuid(key).or_else(|| {
            entry
                .clips
                .iter()
                .copied()
                .find(|id| clips.get(*id).is_some_and(|c| c.name == *key))
        });
        match found {
            Some(id) => {
                if !entry.clips.contains(&id) {
                    entry.clips.push(id);
                }
                entry.default_clip = Some(id);
            }
            None => warn!("node {:?}: default clip '{}' not found", target, key),
        }
    }
    if entry.clips.is_empty() {
        debug!("node {:?}: animation component without clips", target);
        return false;
    }
    registry.add_animation(entry);
    true
}

/// Create `tree` through `factory`, registering animation components on the way.
///
/// Children are created even when the host skips their parent, matching how the
/// export is walked, but they stay detached in that case.
pub fn build_tree<F: NodeFactory + ?Sized>(
    tree: &NodeTree,
    factory: &mut F,
    registry: &mut AnimationRegistry,
) -> Option<NodeId> {
    let node = factory.create(&tree.object);
    match node {
        Some(id) => {
            if let Some(anim) = &tree.object.node().anim {
                register_animation(registry, id, anim);
            }
        }
        None => trace!(
            "factory skipped {} '{}'",
            tree.object.kind_name(),
            tree.object.node().name
        ),
    }
    let as_title = tree.object.children_are_title();
    for child_tree in &tree.children {
        let child = build_tree(child_tree, factory, registry);
        if let (Some(parent), Some(child)) = (node, child) {
            if as_title {
                factory.set_title_label(parent, child);
            } else {
                factory.add_child(parent, child);
            }
        }
    }
    node
}
