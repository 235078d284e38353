use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use creator_animation_core::{
    data::{AnimationClip, PropertySet, WrapMode},
    ids::{ClipId, NodeId},
    inputs::{Command, Inputs},
    outputs::AnimationEvent,
    player::PlayerState,
    registry::{AnimationEntry, AnimationRegistry},
    scene::MemoryScene,
    value::{Color3, Vec2},
    Config,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

/// One-second clip (60 frames at 60 fps) rotating the root from 0 to 60 degrees.
fn spin_clip(name: &str, uuid: &str) -> AnimationClip {
    let mut set = PropertySet::root();
    set.rotation.push(0.0, 0.0);
    set.rotation.push(60.0, 60.0);
    AnimationClip::new(name, uuid)
        .with_timing(60.0, 60.0, 1.0)
        .with_property_set(set)
}

fn rotation(scene: &MemoryScene, node: NodeId) -> f32 {
    scene.node(node).unwrap().rotation
}

fn counter() -> (Arc<AtomicUsize>, Box<dyn FnOnce() + Send>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let h = hits.clone();
    (
        hits,
        Box::new(move || {
            h.fetch_add(1, Ordering::SeqCst);
        }),
    )
}

fn setup(clip: AnimationClip) -> (AnimationRegistry, MemoryScene, NodeId, ClipId) {
    let mut scene = MemoryScene::new();
    let root = scene.add_node(None, "root");
    let mut reg = AnimationRegistry::new(Config::default());
    let id = reg.insert_clip(clip);
    reg.add_animation(AnimationEntry::new(root).with_clip(id));
    (reg, scene, root, id)
}

/// it should complete a one-second clip on the second half-second tick and fire the callback once
#[test]
fn completes_after_real_duration() {
    let (mut reg, mut scene, root, _) = setup(spin_clip("spin", "u-spin"));
    let (hits, cb) = counter();
    reg.play_animation_clip_with_callback(root, "spin", Some(cb))
        .expect("started");

    reg.update(0.5, &mut scene);
    assert_eq!(
        reg.active_player(root, "spin").map(|p| p.state()),
        Some(PlayerState::Running)
    );
    approx(rotation(&scene, root), 30.0, 1e-4);
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    reg.update(0.5, &mut scene);
    assert!(reg.active_player(root, "spin").is_none());
    // final frame is written before completing
    approx(rotation(&scene, root), 60.0, 1e-4);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    reg.update(0.5, &mut scene);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(reg.active_player_count(), 0);

    let events = reg.drain_events();
    assert!(matches!(events.first(), Some(AnimationEvent::Started { .. })));
    assert!(matches!(events.last(), Some(AnimationEvent::Completed { .. })));
}

/// it should keep players on different targets independent
#[test]
fn players_on_different_targets_are_independent() {
    let mut scene = MemoryScene::new();
    let root = scene.add_node(None, "root");
    let a = scene.add_node(Some(root), "a");
    let b = scene.add_node(Some(root), "b");
    let mut reg = AnimationRegistry::default();
    let clip = reg.insert_clip(spin_clip("spin", "u-spin"));

    reg.run_clip(a, clip, None).unwrap();
    reg.update(0.25, &mut scene);
    reg.run_clip(b, clip, None).unwrap();
    reg.update(0.25, &mut scene);

    approx(reg.active_player(a, "spin").unwrap().elapsed(), 0.5, 1e-6);
    approx(reg.active_player(b, "spin").unwrap().elapsed(), 0.25, 1e-6);
    approx(rotation(&scene, a), 30.0, 1e-4);
    approx(rotation(&scene, b), 15.0, 1e-4);
    assert_eq!(rotation(&scene, root), 0.0);
}

/// it should replace an active playback of the same clip on the same target
#[test]
fn replay_replaces_active_player() {
    let (mut reg, mut scene, root, _) = setup(spin_clip("spin", "u-spin"));
    let first = reg.play_animation_clip(root, "spin").unwrap();
    reg.update(0.25, &mut scene);
    let second = reg.play_animation_clip(root, "spin").unwrap();
    assert_ne!(first, second);
    assert_eq!(reg.active_player_count(), 1);
    assert_eq!(reg.active_player(root, "spin").unwrap().id(), second);

    scene.reset_write_counts();
    reg.update(0.25, &mut scene);
    // one player, one rotation write
    assert_eq!(scene.node(root).unwrap().writes, 1);
    approx(rotation(&scene, root), 15.0, 1e-4);

    let events = reg.drain_events();
    assert!(events.contains(&AnimationEvent::Replaced {
        player: first,
        by: second
    }));
}

/// it should not fire the completion callback of a replaced or stopped player
#[test]
fn replaced_and_stopped_players_never_complete() {
    let (mut reg, mut scene, root, _) = setup(spin_clip("spin", "u-spin"));
    let (hits, cb) = counter();
    reg.play_animation_clip_with_callback(root, "spin", Some(cb));
    reg.play_animation_clip(root, "spin");
    let (stop_hits, stop_cb) = counter();
    reg.update(0.5, &mut scene);
    assert!(reg.stop_animation_clip(root, "spin"));
    reg.play_animation_clip_with_callback(root, "spin", Some(stop_cb));
    reg.stop_animation_clip(root, "spin");
    for _ in 0..4 {
        reg.update(0.5, &mut scene);
    }
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(stop_hits.load(Ordering::SeqCst), 0);
    assert_eq!(reg.active_player_count(), 0);
    assert!(!reg.stop_animation_clip(root, "spin"));
}

/// it should treat a second pause as a no-op and resume without resetting elapsed
#[test]
fn pause_is_idempotent_and_resume_keeps_elapsed() {
    let (mut reg, mut scene, root, _) = setup(spin_clip("spin", "u-spin"));
    reg.play_animation_clip(root, "spin");
    reg.update(0.25, &mut scene);
    reg.drain_events();

    assert!(reg.pause_animation_clip(root, "spin"));
    let once = format!("{:?}", reg.active_player(root, "spin").unwrap());
    assert!(!reg.pause_animation_clip(root, "spin"));
    let twice = format!("{:?}", reg.active_player(root, "spin").unwrap());
    assert_eq!(once, twice);

    reg.update(0.25, &mut scene);
    approx(reg.active_player(root, "spin").unwrap().elapsed(), 0.25, 1e-6);
    approx(rotation(&scene, root), 15.0, 1e-4);

    assert!(reg.resume_animation_clip(root, "spin"));
    assert!(!reg.resume_animation_clip(root, "spin"));
    reg.update(0.25, &mut scene);
    approx(reg.active_player(root, "spin").unwrap().elapsed(), 0.5, 1e-6);

    let paused = reg
        .drain_events()
        .iter()
        .filter(|e| matches!(e, AnimationEvent::Paused { .. }))
        .count();
    assert_eq!(paused, 1);
}

/// it should log and ignore requests for unknown targets and clip names
#[test]
fn unknown_target_or_clip_is_a_no_op() {
    let (mut reg, _scene, root, _) = setup(spin_clip("spin", "u-spin"));
    assert!(reg.play_animation_clip(NodeId(77), "spin").is_none());
    assert!(reg.play_animation_clip(root, "walk").is_none());
    assert!(!reg.pause_animation_clip(root, "spin"));
    assert!(!reg.resume_animation_clip(root, "spin"));
    assert_eq!(reg.active_player_count(), 0);
    assert!(reg.drain_events().is_empty());
}

/// it should search only the first entry registered for a target
#[test]
fn lookups_are_first_match() {
    let mut scene = MemoryScene::new();
    let root = scene.add_node(None, "root");
    let mut reg = AnimationRegistry::default();
    let spin = reg.insert_clip(spin_clip("spin", "u-1"));
    let other = reg.insert_clip(spin_clip("other", "u-2"));
    reg.add_animation(AnimationEntry::new(root).with_clip(spin));
    reg.add_animation(AnimationEntry::new(root).with_clip(other));
    assert_eq!(reg.entries().len(), 2);
    assert!(reg.play_animation_clip(root, "spin").is_some());
    assert!(reg.play_animation_clip(root, "other").is_none());
}

/// it should start default clips on load exactly once
#[test]
fn play_on_load_runs_once() {
    let mut scene = MemoryScene::new();
    let root = scene.add_node(None, "root");
    let child = scene.add_node(Some(root), "child");
    let mut reg = AnimationRegistry::default();
    let spin = reg.insert_clip(spin_clip("spin", "u-1"));
    reg.add_animation(
        AnimationEntry::new(root)
            .with_clip(spin)
            .with_default_clip(spin)
            .with_play_on_load(true),
    );
    reg.add_animation(AnimationEntry::new(child).with_clip(spin).with_default_clip(spin));
    reg.add_animation(AnimationEntry::new(child).with_clip(spin).with_play_on_load(true));

    assert_eq!(reg.play_on_load(), 1);
    assert!(reg.is_loaded());
    assert_eq!(reg.play_on_load(), 0);
    assert_eq!(reg.active_player_count(), 1);
    assert!(reg.active_player(root, "spin").is_some());
    reg.update(0.5, &mut scene);
    approx(rotation(&scene, root), 30.0, 1e-4);
    assert_eq!(rotation(&scene, child), 0.0);
}

/// it should apply properties in the fixed order so per-axis position wins
#[test]
fn per_axis_position_overrides_vector_position() {
    let mut set = PropertySet::root();
    set.position.push(0.0, Vec2::new(10.0, 20.0));
    set.position_x.push(0.0, 99.0);
    set.anchor_x.push(0.0, 0.0);
    set.color.push(0.0, Color3::new(1, 2, 3));
    let clip = AnimationClip::new("pose", "u-pose")
        .with_timing(10.0, 60.0, 1.0)
        .with_property_set(set);
    let (mut reg, mut scene, root, _) = setup(clip);
    reg.play_animation_clip(root, "pose");
    reg.update(0.01, &mut scene);
    let node = scene.node(root).unwrap();
    assert_eq!(node.position, Vec2::new(99.0, 20.0));
    assert_eq!(node.anchor, Vec2::new(0.0, 0.5));
    assert_eq!(node.color, Color3::new(1, 2, 3));
    // untouched properties keep their defaults
    assert_eq!(node.opacity, 255.0);
    assert_eq!(node.scale_x, 1.0);
}

/// it should leave properties without tracks untouched and skip unresolved paths
#[test]
fn missing_tracks_and_paths_are_skipped() {
    let mut missing = PropertySet::with_path("nowhere/to/be/found");
    missing.opacity.push(0.0, 0.0);
    let mut child = PropertySet::with_path("body/arm");
    child.opacity.push(0.0, 100.0);
    let clip = spin_clip("spin", "u-spin")
        .with_property_set(missing)
        .with_property_set(child);
    let (mut reg, mut scene, root, _) = setup(clip);
    let body = scene.add_node(Some(root), "body");
    let arm = scene.add_node(Some(body), "arm");

    scene.node_mut(root).unwrap().color = Color3::new(9, 9, 9);
    reg.play_animation_clip(root, "spin");
    reg.update(0.5, &mut scene);

    let r = scene.node(root).unwrap();
    assert_eq!(r.color, Color3::new(9, 9, 9));
    assert_eq!(r.opacity, 255.0);
    assert_eq!(scene.node(arm).unwrap().opacity, 100.0);
    assert_eq!(scene.node(body).unwrap().writes, 0);
}

fn play_wrapped(mode: WrapMode, ticks: usize) -> (AnimationRegistry, MemoryScene, NodeId) {
    let (mut reg, mut scene, root, _) = setup(spin_clip("spin", "u-spin").with_wrap_mode(mode));
    reg.play_animation_clip(root, "spin");
    for _ in 0..ticks {
        reg.update(0.25, &mut scene);
    }
    (reg, scene, root)
}

/// it should sample `duration - elapsed` in reverse mode and complete at the start frame
#[test]
fn reverse_runs_backwards_once() {
    let (_, scene, root) = play_wrapped(WrapMode::Reverse, 1);
    approx(rotation(&scene, root), 45.0, 1e-4);

    let (reg, scene, root) = play_wrapped(WrapMode::Reverse, 4);
    approx(rotation(&scene, root), 0.0, 1e-4);
    assert_eq!(reg.active_player_count(), 0);
}

/// it should wrap elapsed modulo duration in loop mode and never complete
#[test]
fn loop_wraps_and_reports_passes() {
    let (mut reg, scene, root) = play_wrapped(WrapMode::Loop, 5);
    approx(rotation(&scene, root), 15.0, 1e-4);
    assert_eq!(reg.active_player_count(), 1);
    let looped: Vec<_> = reg
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            AnimationEvent::Looped { pass, .. } => Some(pass),
            _ => None,
        })
        .collect();
    assert_eq!(looped, vec![1]);
    assert!(reg.active_player(root, "spin").unwrap().state() == PlayerState::Running);
}

/// it should run reversed loops from the end
#[test]
fn loop_reverse_starts_at_end() {
    let (_, scene, root) = play_wrapped(WrapMode::LoopReverse, 1);
    approx(rotation(&scene, root), 45.0, 1e-4);
    let (reg, scene, root) = play_wrapped(WrapMode::LoopReverse, 5);
    approx(rotation(&scene, root), 45.0, 1e-4);
    assert_eq!(reg.active_player_count(), 1);
}

/// it should reflect direction on every ping-pong pass
#[test]
fn ping_pong_reflects() {
    let (_, scene, root) = play_wrapped(WrapMode::PingPong, 5);
    approx(rotation(&scene, root), 45.0, 1e-4);
    let (_, scene, root) = play_wrapped(WrapMode::PingPong, 9);
    approx(rotation(&scene, root), 15.0, 1e-4);
    let (reg, scene, root) = play_wrapped(WrapMode::PingPongReverse, 1);
    approx(rotation(&scene, root), 45.0, 1e-4);
    assert_eq!(reg.active_player_count(), 1);
}

/// it should scale elapsed by clip speed
#[test]
fn speed_scales_elapsed() {
    let clip = spin_clip("spin", "u-spin").with_timing(60.0, 60.0, 2.0);
    let (mut reg, mut scene, root, _) = setup(clip);
    reg.play_animation_clip(root, "spin");
    reg.update(0.25, &mut scene);
    approx(rotation(&scene, root), 30.0, 1e-4);
    reg.update(0.25, &mut scene);
    assert_eq!(reg.active_player_count(), 0);
}

/// it should complete one-shot clips that cannot move forward after the first write
#[test]
fn stalled_one_shot_clips_complete() {
    for speed in [0.0, -1.0] {
        let clip = spin_clip("spin", "u-spin").with_timing(60.0, 60.0, speed);
        let (mut reg, mut scene, root, _) = setup(clip);
        scene.node_mut(root).unwrap().rotation = 45.0;
        let (hits, cb) = counter();
        reg.play_animation_clip_with_callback(root, "spin", Some(cb));

        reg.update(0.5, &mut scene);
        approx(rotation(&scene, root), 0.0, 1e-6);
        assert_eq!(reg.active_player_count(), 0, "speed {speed}");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    // looping clips are left running
    let clip = spin_clip("spin", "u-spin")
        .with_timing(60.0, 60.0, 0.0)
        .with_wrap_mode(WrapMode::Loop);
    let (mut reg, mut scene, root, _) = setup(clip);
    reg.play_animation_clip(root, "spin");
    reg.update(0.5, &mut scene);
    assert!(reg.active_player(root, "spin").is_some());
}

/// it should apply command batches in order, including from JSON
#[test]
fn command_batches() {
    let (mut reg, mut scene, root, _) = setup(spin_clip("spin", "u-spin"));
    let mut inputs = Inputs::default();
    inputs.push(Command::Play {
        target: root,
        clip: "spin".into(),
    });
    reg.apply_inputs(&inputs);
    reg.update(0.25, &mut scene);

    let json = r#"{ "commands": [ { "cmd": "pause", "target": 0, "clip": "spin" } ] }"#;
    let batch: Inputs = serde_json::from_str(json).unwrap();
    reg.apply_inputs(&batch);
    assert_eq!(
        reg.active_player(root, "spin").map(|p| p.state()),
        Some(PlayerState::Paused)
    );

    reg.apply_inputs(&Inputs {
        commands: vec![
            Command::Resume {
                target: root,
                clip: "spin".into(),
            },
            Command::Stop {
                target: root,
                clip: "spin".into(),
            },
        ],
    });
    assert_eq!(reg.active_player_count(), 0);
}

/// it should cap queued events between drains
#[test]
fn event_cap_drops_overflow() {
    let mut scene = MemoryScene::new();
    let mut reg = AnimationRegistry::new(Config {
        max_pending_events: 2,
        ..Config::default()
    });
    let clip = reg.insert_clip(spin_clip("spin", "u-spin"));
    for i in 0..3 {
        let node = scene.add_node(None, format!("n{i}"));
        reg.run_clip(node, clip, None);
    }
    assert_eq!(reg.drain_events().len(), 2);
    reg.update(0.1, &mut scene);
    assert!(reg.drain_events().is_empty());
    assert_eq!(reg.active_player_count(), 3);
}

/// it should serialize events with a kind tag
#[test]
fn events_serialize_with_kind() {
    let (mut reg, _scene, root, _) = setup(spin_clip("spin", "u-spin"));
    reg.play_animation_clip(root, "spin");
    let json = serde_json::to_value(reg.drain_events()).unwrap();
    assert_eq!(json[0]["kind"], "started");
    assert_eq!(json[0]["name"], "spin");
}
