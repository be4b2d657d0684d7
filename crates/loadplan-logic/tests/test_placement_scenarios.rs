//! Integration tests for end-to-end placement behaviour.
//!
//! Exercises: descriptors → store → placement / auto-stack → summary,
//! both through the free functions and through `command::apply`.
//!
//! All tests are pure logic, no front end involved.

use loadplan_logic::command::{apply, Command, Direction, EditorState};
use loadplan_logic::config::EditorConfig;
use loadplan_logic::descriptor::{layout_packages, parse_descriptors};
use loadplan_logic::error::{PlacementError, PlacementWarning};
use loadplan_logic::geometry::{rotated_footprint, Rotation};
use loadplan_logic::package::{Container, Package};
use loadplan_logic::placement::{
    align_to_wall, delete, resize, rotate90, set_absolute_position, translate, ResizeRequest,
    Wall,
};
use loadplan_logic::stacking::AutoStack;

// ── Helpers ────────────────────────────────────────────────────────────

fn trailer() -> Container {
    Container {
        length: 13.6,
        width: 2.45,
        height: 2.7,
    }
}

fn boxed(id: u32, x: f64, depth: f64, stackable: bool) -> Package {
    let mut p = Package::with_defaults(id);
    p.x = x;
    p.depth = depth;
    p.stackable = stackable;
    p
}

fn find(packages: &[Package], id: u32) -> &Package {
    packages.iter().find(|p| p.id == id).unwrap()
}

// ── Geometry ───────────────────────────────────────────────────────────

#[test]
fn footprint_is_periodic_in_rotation() {
    for (w, h) in [(3.0, 1.2), (0.5, 0.5), (2.2, 7.1)] {
        assert_eq!(rotated_footprint(w, h, Rotation::Deg90), (h, w));
        for deg in [0_i64, 90, 180, 270] {
            let r = Rotation::from_degrees(deg).unwrap();
            let wrapped = Rotation::from_degrees(deg + 360).unwrap();
            assert_eq!(
                rotated_footprint(w, h, r),
                rotated_footprint(w, h, wrapped)
            );
        }
    }
}

// ── Placement ──────────────────────────────────────────────────────────

#[test]
fn align_floor_is_idempotent() {
    let mut p = boxed(1, 2.0, 1.0, false);
    p.z = 1.3;
    let once = align_to_wall(1, &[p], &trailer(), Wall::Floor).unwrap();
    let twice = align_to_wall(1, &once.packages, &trailer(), Wall::Floor).unwrap();
    assert_eq!(find(&once.packages, 1).z, 0.0);
    assert_eq!(once.packages, twice.packages);
}

#[test]
fn four_rotations_restore_orientation_and_position() {
    let mut packages = vec![boxed(1, 1.0, 1.0, false)];
    for _ in 0..4 {
        packages = rotate90(1, &packages, &trailer()).unwrap().packages;
    }
    let p = find(&packages, 1);
    assert_eq!(p.rotation, Rotation::Deg0);
    assert!((p.x - 1.0).abs() < 1e-9, "x={}", p.x);
}

#[test]
fn absolute_position_past_the_end_clamps() {
    let c = trailer();
    let placed = set_absolute_position(
        1,
        &[boxed(1, 0.0, 1.0, false)],
        &c,
        (20.0, 0.0, 0.0),
        AutoStack::Off,
    )
    .unwrap();
    assert!((find(&placed.packages, 1).x - 10.6).abs() < 1e-9);

    // turned a quarter, only 1.2 m of it runs along the trailer
    let mut turned = boxed(1, 0.0, 1.0, false);
    turned.rotation = Rotation::Deg90;
    let placed =
        set_absolute_position(1, &[turned], &c, (20.0, 0.0, 0.0), AutoStack::Off).unwrap();
    assert!((find(&placed.packages, 1).x - 12.4).abs() < 1e-9);

    let mut long = boxed(1, 0.0, 1.0, false);
    long.width = 20.0;
    let placed = set_absolute_position(1, &[long], &c, (5.0, 0.0, 0.0), AutoStack::Off).unwrap();
    assert_eq!(find(&placed.packages, 1).x, 0.0);
}

#[test]
fn auto_stack_lands_on_support_and_drops_back() {
    let c = trailer();
    let packages = vec![boxed(1, 0.0, 1.0, false), boxed(2, 5.0, 1.0, true)];

    let on_top =
        set_absolute_position(2, &packages, &c, (1.0, 0.0, 0.0), AutoStack::on()).unwrap();
    assert!(on_top.warning.is_none());
    let b = find(&on_top.packages, 2);
    assert!((b.z - 1.1).abs() < 1e-9, "z={}", b.z);

    let away =
        set_absolute_position(2, &on_top.packages, &c, (6.0, 0.0, b.z), AutoStack::on())
            .unwrap();
    assert_eq!(find(&away.packages, 2).z, 0.0);
}

#[test]
fn auto_stack_refuses_to_break_the_roof() {
    let c = trailer();
    let packages = vec![boxed(1, 0.0, 1.0, false), boxed(2, 5.0, 2.0, true)];

    let placed =
        set_absolute_position(2, &packages, &c, (1.0, 0.0, 0.0), AutoStack::on()).unwrap();
    let b = find(&placed.packages, 2);
    assert_eq!(b.z, 0.0, "height is held back");
    assert!((b.x - 1.0).abs() < 1e-9, "horizontal move still applies");
    match placed.warning {
        Some(PlacementWarning::StackOverflow { id, required_top, .. }) => {
            assert_eq!(id, 2);
            assert!((required_top - 3.1).abs() < 1e-9);
        }
        other => panic!("expected overflow warning, got {other:?}"),
    }
}

#[test]
fn vertical_nudge_bypasses_auto_stack() {
    let c = trailer();
    let mut b = boxed(2, 1.0, 1.0, true);
    b.z = 0.5;
    let packages = vec![boxed(1, 0.0, 1.0, false), b];
    let placed = translate(2, &packages, &c, (0.0, 0.0, 0.25), AutoStack::on()).unwrap();
    assert!((find(&placed.packages, 2).z - 0.75).abs() < 1e-9);
}

#[test]
fn resize_below_minimum_is_a_no_op() {
    let packages = vec![boxed(1, 0.0, 1.0, false)];
    let request = ResizeRequest {
        width: Some(0.05),
        ..Default::default()
    };
    let err = resize(1, &packages, &trailer(), &request).unwrap_err();
    assert!(matches!(err, PlacementError::OutOfRange { field: "width", .. }));
    assert_eq!(packages[0].width, 3.0);
}

#[test]
fn delete_removes_only_the_target() {
    let packages: Vec<Package> = (1..=3).map(|id| boxed(id, 0.0, 1.0, false)).collect();
    let left = delete(2, &packages);
    let ids: Vec<u32> = left.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(delete(2, &left), left);
}

// ── Sessions ───────────────────────────────────────────────────────────

#[test]
fn bulk_load_then_edit_keeps_everything_inside() {
    let (descriptors, bad) =
        parse_descriptors("Crate,4,1.2,1,300,1;Drum,1,1,1.5,120;oops,1;Long,12,1,1,500");
    assert_eq!(bad.len(), 1);

    let state = EditorState::new(EditorConfig::default()).unwrap();
    let state = apply(&state, Command::LoadPackages(layout_packages(descriptors)))
        .unwrap()
        .state;
    assert_eq!(state.store.len(), 3);
    assert!(state
        .store
        .list()
        .iter()
        .all(|p| p.fits_within(state.store.container())));

    let mut state = apply(&state, Command::Select(2)).unwrap().state;
    for _ in 0..100 {
        state = apply(&state, Command::Translate(Direction::YPlus)).unwrap().state;
    }
    let drum = state.store.get(2).unwrap();
    assert!((drum.y - 1.45).abs() < 1e-9, "y={}", drum.y);

    let next = apply(&state, Command::AddPackage).unwrap().state;
    assert_eq!(next.selected, Some(4));
}

#[test]
fn summary_tracks_session() {
    let state = EditorState::new(EditorConfig::default()).unwrap();
    let state = apply(&state, Command::AddPackage).unwrap().state;
    let s = state.store.summary();
    assert_eq!(s.package_count, 2);
    assert!((s.total_weight - 600.0).abs() < 1e-9);
    let expected = 2.0 * 3.0 * 1.2 * 0.86 / (13.6 * 2.45 * 2.7);
    assert!((s.utilization - expected).abs() < 1e-9);
}
