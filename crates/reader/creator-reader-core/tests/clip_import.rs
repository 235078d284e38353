use creator_animation_core::{
    data::WrapMode,
    error::AnimationError,
    ids::NodeId,
    interp::{Curve, Ease},
    registry::AnimationRegistry,
    scene::MemoryScene,
    value::Vec2,
};
use creator_reader::{
    convert_clip, import_clips, register_animation, schema::KeyDef, AnimationClipDef,
    AnimationRef, CreatorReader, ReaderError, ReaderOptions, SceneGraph,
};

fn graph(name: &str) -> SceneGraph {
    creator_test_fixtures::scenes::load(name).expect("load scene fixture")
}

fn strict() -> ReaderOptions {
    ReaderOptions {
        strict_clips: true,
        ..Default::default()
    }
}

#[test]
/// it should copy clip timing and convert wrap-mode codes and names
fn converts_clip_metadata() {
    let g = graph("animated-sprite");
    let bounce = convert_clip(&g.animation_clips[0]);
    assert_eq!(bounce.name, "bounce");
    assert_eq!(bounce.uuid, "c-bounce");
    assert_eq!(bounce.duration, 60.0);
    assert_eq!(bounce.sample, 60.0);
    assert_eq!(bounce.wrap_mode, WrapMode::Default);
    assert_eq!(bounce.property_sets.len(), 2);
    assert!(bounce.property_sets[0].path.is_empty());
    assert_eq!(bounce.property_sets[1].path, "arm");

    let fade = convert_clip(&g.animation_clips[1]);
    assert_eq!(fade.wrap_mode, WrapMode::Loop);
    // speed defaults to 1 when absent
    assert_eq!(fade.speed, 1.0);
}

#[test]
/// it should map curveType names and curveData arrays onto keyframe curves
fn converts_keyframe_curves() {
    let g = graph("animated-sprite");
    let bounce = convert_clip(&g.animation_clips[0]);
    let rotation = bounce.property_sets[1].rotation.keyframes();
    assert_eq!(rotation[0].curve, Curve::Ease(Ease::QuadIn));
    assert_eq!(rotation[1].curve, Curve::Linear);

    let fade = convert_clip(&g.animation_clips[1]);
    let set = &fade.property_sets[0];
    assert_eq!(
        set.opacity.keyframes()[0].curve,
        Curve::Bezier([0.42, 0.0, 0.58, 1.0])
    );
    // unknown curve names fall back to linear
    assert_eq!(set.color.keyframes()[0].curve, Curve::Linear);
}

#[test]
/// it should keep keyframes in source order without sorting
fn preserves_source_order() {
    let g = graph("unordered-keys");
    let clip = convert_clip(&g.animation_clips[0]);
    let frames: Vec<f32> = clip.property_sets[0]
        .scale_x
        .keyframes()
        .iter()
        .map(|k| k.frame)
        .collect();
    assert_eq!(frames, vec![5.0, 0.0, 10.0]);

    // lenient import keeps the clip as authored
    let mut registry = AnimationRegistry::default();
    let ids = import_clips(&g.animation_clips, &mut registry, false).unwrap();
    assert_eq!(ids.len(), 1);
    assert_eq!(registry.clips().get(ids[0]).unwrap(), &clip);
}

#[test]
/// it should fail strict imports on out-of-order keyframes
fn strict_rejects_unordered_keys() {
    let json = creator_test_fixtures::scenes::json("unordered-keys").unwrap();
    let mut scene = MemoryScene::new();
    let result = CreatorReader::from_json(&json)
        .unwrap()
        .with_options(strict())
        .build(&mut scene);
    assert!(matches!(
        result,
        Err(ReaderError::InvalidClip(AnimationError::UnorderedFrames { .. }))
    ));
}

#[test]
/// it should read unknown wrap codes as Default unless strict
fn unknown_wrap_mode() {
    let g = graph("legacy-default-clip");
    let odd = convert_clip(&g.animation_clips[1]);
    assert_eq!(odd.wrap_mode, WrapMode::Default);
    // a missing uuid stays empty and is never indexed
    assert_eq!(odd.uuid, "");
    let mut lenient = AnimationRegistry::default();
    let ids = import_clips(&g.animation_clips, &mut lenient, false).unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(lenient.clips().id_by_uuid(""), None);
    assert_eq!(lenient.clips().id_by_uuid("odd"), None);

    let mut registry = AnimationRegistry::default();
    let err = import_clips(&g.animation_clips, &mut registry, true).unwrap_err();
    assert!(matches!(err, AnimationError::UnknownWrapMode { code: 99 }));

    let json = creator_test_fixtures::scenes::json("legacy-default-clip").unwrap();
    let mut scene = MemoryScene::new();
    assert!(CreatorReader::from_json(&json)
        .unwrap()
        .with_options(strict())
        .build(&mut scene)
        .is_err());
}

#[test]
/// it should accept wrap modes written by name
fn wrap_mode_names() {
    let def: AnimationClipDef = serde_json::from_str(
        r#"{ "name": "p", "duration": 10, "wrapMode": "PingPongReverse" }"#,
    )
    .unwrap();
    assert_eq!(convert_clip(&def).wrap_mode, WrapMode::PingPongReverse);
    assert_eq!(def.sample, 60.0);

    let def: AnimationClipDef =
        serde_json::from_str(r#"{ "name": "p", "wrapMode": "sideways" }"#).unwrap();
    assert_eq!(convert_clip(&def).wrap_mode, WrapMode::Default);
}

#[test]
/// it should skip unknown uuids and add a missing default clip to the entry
fn registers_animation_refs() {
    let g = graph("animated-sprite");
    let mut registry = AnimationRegistry::default();
    let ids = import_clips(&g.animation_clips, &mut registry, false).unwrap();

    let target = NodeId(3);
    let anim = AnimationRef {
        clips: vec!["c-missing".into()],
        default_clip: Some("c-fade".into()),
        play_on_load: true,
    };
    assert!(register_animation(&mut registry, target, &anim));
    let entry = &registry.entries()[0];
    assert_eq!(entry.clips, vec![ids[1]]);
    assert_eq!(entry.default_clip, Some(ids[1]));

    let nothing = AnimationRef {
        clips: vec!["c-missing".into()],
        default_clip: Some("bounce".into()),
        play_on_load: false,
    };
    // a name only resolves among the entry's own clips
    assert!(!register_animation(&mut registry, NodeId(4), &nothing));
    assert_eq!(registry.entries().len(), 1);
}

#[test]
/// it should import hand-built definitions as well as fixtures
fn converts_hand_built_definition() {
    let mut def: AnimationClipDef =
        serde_json::from_str(r#"{ "name": "slide", "duration": 4, "sample": 2 }"#).unwrap();
    def.curve_data = vec![serde_json::from_value(serde_json::json!({
        "path": "child",
        "props": { "positionX": [ { "frame": 0, "value": 1 }, { "frame": 4, "value": 9 } ] }
    }))
    .unwrap()];
    let clip = convert_clip(&def);
    assert!(clip.uuid.is_empty());
    assert_eq!(clip.real_duration(), 2.0);
    let sample = clip.property_sets[0].sample_at(2.0);
    assert_eq!(sample.position_x, Some(5.0));
    assert_eq!(sample.position, None);

    let key = KeyDef::new(1.0, Vec2::new(1.0, 2.0));
    assert!(key.curve_type.is_none() && key.curve_data.is_none());
}
