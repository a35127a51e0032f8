//! End-to-end behavior of the synchronizer over realistic event streams
//!
//! Each test drives the synchronizer the way a detector would and checks the
//! registry and scene afterwards.

use std::sync::Arc;

use crate::config::PlaneSyncConfig;
use crate::foundation::math::{Mat4, Vec2, Vec3};
use crate::planes::{
    DetectedPlane, PlaneError, PlaneEvent, PlaneId, PlaneSynchronizer, PolygonBuilder, SyncOutcome,
};
use crate::scene::Scene;

fn outline(size: f32, corners: usize) -> Vec<Vec2> {
    (0..corners)
        .map(|i| {
            let angle = i as f32 / corners as f32 * std::f32::consts::TAU;
            Vec2::new(angle.cos() * size, angle.sin() * size)
        })
        .collect()
}

fn plane(id: u32, size: f32) -> DetectedPlane {
    DetectedPlane::new(
        PlaneId(id),
        outline(size, 6),
        Mat4::new_translation(&Vec3::new(0.0, id as f32 * 0.1, 0.0)),
    )
}

fn setup() -> (PlaneSynchronizer, Scene) {
    let config = PlaneSyncConfig::default().with_material_seed(11);
    (PlaneSynchronizer::from_config(&config), Scene::new())
}

#[test]
fn test_at_most_one_mesh_per_plane() {
    let (mut sync, mut scene) = setup();
    let mut events = vec![PlaneEvent::SessionReset];
    for id in 0..3 {
        events.push(PlaneEvent::Added(plane(id, 0.5)));
    }
    for step in 1..=10 {
        for id in 0..3 {
            events.push(PlaneEvent::Updated(plane(id, 0.5 + step as f32 * 0.05)));
        }
    }

    sync.handle_all(&events, &mut scene);

    assert_eq!(sync.registry().len(), 3);
    assert_eq!(scene.len(), 3, "every rebuild must release the node it replaces");
    for id in 0..3 {
        let tracked = sync.registry().get(PlaneId(id)).expect("plane should be tracked");
        assert!(scene.contains(tracked.node));
    }
    assert_eq!(sync.stats().rebuilt, 30);
}

#[test]
fn test_material_survives_updates() {
    let (mut sync, mut scene) = setup();
    sync.handle(&PlaneEvent::Added(plane(1, 0.5)), &mut scene);
    let original = Arc::clone(&sync.registry().get(PlaneId(1)).expect("tracked").material);

    let outcome = sync.handle(&PlaneEvent::Updated(plane(1, 0.9)), &mut scene);

    assert_eq!(outcome, SyncOutcome::Rebuilt);
    let tracked = sync.registry().get(PlaneId(1)).expect("tracked");
    assert!(Arc::ptr_eq(&tracked.material, &original));
    let node = scene.get(tracked.node).expect("node installed");
    assert!(Arc::ptr_eq(&node.material, &original));
    assert_eq!(scene.stats().materials_released, 0);
}

#[test]
fn test_stale_update_leaves_mesh_untouched() {
    let (mut sync, mut scene) = setup();
    sync.handle(&PlaneEvent::Added(plane(1, 0.5)), &mut scene);
    let before = sync.registry().get(PlaneId(1)).map(|t| t.node).expect("tracked");
    let vertices_before = scene.get(before).map(|n| n.mesh.vertices.clone()).expect("node");
    let stats_before = scene.stats();

    let stale = plane(1, 2.0).with_missing_point(3);
    let outcome = sync.handle(&PlaneEvent::Updated(stale), &mut scene);

    assert_eq!(outcome, SyncOutcome::SkippedStale);
    assert_eq!(sync.registry().get(PlaneId(1)).map(|t| t.node), Some(before));
    assert_eq!(scene.get(before).map(|n| n.mesh.vertices.clone()), Some(vertices_before));
    assert_eq!(scene.stats(), stats_before);
}

#[test]
fn test_removal_is_idempotent() {
    let (mut sync, mut scene) = setup();

    let never_added = sync.handle(&PlaneEvent::Removed(plane(4, 0.5)), &mut scene);
    assert_eq!(never_added, SyncOutcome::Ignored(PlaneError::UnknownIdOnRemove(PlaneId(4))));

    sync.handle(&PlaneEvent::Added(plane(4, 0.5)), &mut scene);
    assert_eq!(sync.handle(&PlaneEvent::Removed(plane(4, 0.5)), &mut scene), SyncOutcome::Removed);
    assert_eq!(
        sync.handle(&PlaneEvent::Removed(plane(4, 0.5)), &mut scene),
        SyncOutcome::Ignored(PlaneError::UnknownIdOnRemove(PlaneId(4)))
    );

    assert!(!sync.registry().contains(PlaneId(4)));
    assert!(scene.is_empty());
}

#[test]
fn test_session_reset_starts_clean() {
    let (mut sync, mut scene) = setup();
    for id in 0..4 {
        sync.handle(&PlaneEvent::Added(plane(id, 0.5)), &mut scene);
    }
    let old_material = Arc::clone(&sync.registry().get(PlaneId(2)).expect("tracked").material);

    assert_eq!(sync.handle(&PlaneEvent::SessionReset, &mut scene), SyncOutcome::Reset { released: 4 });
    assert!(sync.registry().is_empty());
    assert!(scene.is_empty());

    // Ids may come back in the new session; they start over with new colors
    assert_eq!(sync.handle(&PlaneEvent::Added(plane(2, 0.5)), &mut scene), SyncOutcome::Installed);
    let tracked = sync.registry().get(PlaneId(2)).expect("tracked again");
    assert!(!Arc::ptr_eq(&tracked.material, &old_material));
    assert_ne!(tracked.material.id, old_material.id);
    assert_eq!(Arc::strong_count(&old_material), 1, "pre-reset material must not be referenced");
}

#[test]
fn test_two_point_outline_is_rejected() {
    let builder = PolygonBuilder::default();
    let result = builder.build(&[Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)], &Mat4::identity(), None);
    assert_eq!(result.unwrap_err(), PlaneError::DegeneratePolygon { distinct_points: 2 });

    let (mut sync, mut scene) = setup();
    let sliver = DetectedPlane::new(
        PlaneId(8),
        [Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)],
        Mat4::identity(),
    );
    sync.handle(&PlaneEvent::Added(sliver), &mut scene);
    assert!(!sync.registry().contains(PlaneId(8)));
    assert!(scene.is_empty());
}

#[test]
fn test_interleaved_planes_do_not_interfere() {
    let (mut sync, mut scene) = setup();
    let events = vec![
        PlaneEvent::Added(plane(1, 0.5)),
        PlaneEvent::Added(plane(2, 0.7)),
        PlaneEvent::Updated(plane(1, 0.6)),
        PlaneEvent::Updated(plane(2, 0.8).with_missing_point(0)),
        PlaneEvent::Removed(plane(1, 0.6)),
        PlaneEvent::Updated(plane(1, 0.9)),
        PlaneEvent::Updated(plane(2, 1.0)),
    ];

    let outcomes = sync.handle_all(&events, &mut scene);

    assert_eq!(
        outcomes,
        vec![
            SyncOutcome::Installed,
            SyncOutcome::Installed,
            SyncOutcome::Rebuilt,
            SyncOutcome::SkippedStale,
            SyncOutcome::Removed,
            SyncOutcome::Ignored(PlaneError::UnknownIdOnUpdate(PlaneId(1))),
            SyncOutcome::Rebuilt,
        ]
    );
    assert_eq!(sync.registry().ids(), vec![PlaneId(2)]);
    assert_eq!(scene.len(), 1);
}

#[test]
fn test_non_finite_update_keeps_mesh() {
    let (mut sync, mut scene) = setup();
    sync.handle(&PlaneEvent::Added(plane(1, 0.5)), &mut scene);
    let before = sync.registry().get(PlaneId(1)).map(|t| t.node).expect("tracked");
    let vertices_before = scene.get(before).map(|n| n.mesh.vertices.clone()).expect("node");

    for bad in [f32::NAN, f32::INFINITY] {
        let mut corrupted = plane(1, 0.8);
        corrupted.outline[2] = Some(Vec2::new(bad, 0.5));

        let outcome = sync.handle(&PlaneEvent::Updated(corrupted), &mut scene);

        assert_eq!(outcome, SyncOutcome::Dropped(PlaneError::NonFinite("outline point")));
        assert_eq!(sync.registry().get(PlaneId(1)).map(|t| t.node), Some(before));
        assert_eq!(
            scene.get(before).map(|n| n.mesh.vertices.clone()),
            Some(vertices_before.clone()),
            "mesh must survive a {} coordinate",
            bad
        );
    }
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.stats().geometries_released, 0);
}

#[test]
fn test_stale_add_installs_on_first_complete_update() {
    let (mut sync, mut scene) = setup();
    let events = vec![
        PlaneEvent::Added(plane(3, 0.5).with_missing_point(1)),
        PlaneEvent::Updated(plane(3, 0.6).with_missing_point(4)),
        PlaneEvent::Updated(plane(3, 0.7)),
        PlaneEvent::Updated(plane(3, 0.8)),
    ];

    let outcomes = sync.handle_all(&events, &mut scene);

    assert_eq!(
        outcomes,
        vec![
            SyncOutcome::SkippedStale,
            SyncOutcome::SkippedStale,
            SyncOutcome::Installed,
            SyncOutcome::Rebuilt,
        ]
    );
    assert!(sync.pending().is_empty());
    assert_eq!(sync.registry().ids(), vec![PlaneId(3)]);
    assert_eq!(scene.len(), 1);
}

#[test]
fn test_corrupt_add_recovers_on_update() {
    let (mut sync, mut scene) = setup();
    let mut corrupted = plane(5, 0.5);
    corrupted.outline[0] = Some(Vec2::new(f32::NAN, 0.0));

    assert!(matches!(
        sync.handle(&PlaneEvent::Added(corrupted), &mut scene),
        SyncOutcome::Dropped(PlaneError::NonFinite(_))
    ));
    assert_eq!(sync.pending(), vec![PlaneId(5)]);

    assert_eq!(sync.handle(&PlaneEvent::Updated(plane(5, 0.5)), &mut scene), SyncOutcome::Installed);
    assert!(sync.registry().contains(PlaneId(5)));
}

#[test]
fn test_pending_planes_are_forgotten_on_remove_and_reset() {
    let (mut sync, mut scene) = setup();
    sync.handle(&PlaneEvent::Added(plane(1, 0.5).with_missing_point(0)), &mut scene);
    sync.handle(&PlaneEvent::Added(plane(2, 0.5).with_missing_point(0)), &mut scene);
    assert_eq!(sync.pending(), vec![PlaneId(1), PlaneId(2)]);

    assert_eq!(sync.handle(&PlaneEvent::Removed(plane(1, 0.5)), &mut scene), SyncOutcome::Removed);
    assert_eq!(
        sync.handle(&PlaneEvent::Updated(plane(1, 0.5)), &mut scene),
        SyncOutcome::Ignored(PlaneError::UnknownIdOnUpdate(PlaneId(1)))
    );

    sync.handle(&PlaneEvent::SessionReset, &mut scene);
    assert!(sync.pending().is_empty());
    assert_eq!(
        sync.handle(&PlaneEvent::Updated(plane(2, 0.5)), &mut scene),
        SyncOutcome::Ignored(PlaneError::UnknownIdOnUpdate(PlaneId(2)))
    );
    assert!(scene.is_empty());
}
