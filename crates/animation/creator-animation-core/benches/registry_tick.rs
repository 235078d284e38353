use criterion::{black_box, criterion_group, criterion_main, Criterion};

use creator_animation_core::{
    data::{AnimationClip, PropertySet, WrapMode},
    registry::AnimationRegistry,
    scene::MemoryScene,
    value::{Color3, Vec2},
    Config,
};

fn dense_clip() -> AnimationClip {
    let mut clip = AnimationClip::new("idle", "bench-idle")
        .with_timing(120.0, 60.0, 1.0)
        .with_wrap_mode(WrapMode::Loop);
    for path in ["", "body", "body/arm", "body/arm/hand"] {
        let mut set = PropertySet::with_path(path);
        for k in 0..=12 {
            let f = k as f32 * 10.0;
            set.position.push(f, Vec2::new(f, -f));
            set.rotation.push(f, f * 3.0);
            set.opacity.push(f, 255.0 - f);
            set.color.push(f, Color3::new(k as u8 * 20, 0, 255 - k as u8 * 20));
        }
        clip.property_sets.push(set);
    }
    clip
}

fn bench_registry_tick(c: &mut Criterion) {
    let mut scene = MemoryScene::new();
    let mut reg = AnimationRegistry::new(Config::default());
    let clip = reg.insert_clip(dense_clip());
    for i in 0..32 {
        let root = scene.add_node(None, format!("actor{i}"));
        let body = scene.add_node(Some(root), "body");
        let arm = scene.add_node(Some(body), "arm");
        scene.add_node(Some(arm), "hand");
        reg.run_clip(root, clip, None);
    }

    c.bench_function("registry_tick_32_players", |b| {
        b.iter(|| {
            reg.update(black_box(1.0 / 60.0), &mut scene);
            black_box(reg.drain_events());
        })
    });
}

criterion_group!(benches, bench_registry_tick);
criterion_main!(benches);
