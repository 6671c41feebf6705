use super::*;
use crate::geom2::{OrientedBox, Pose2, Rect3};
use crate::geom3::{bottom_plane, top_plane, Plane3};
use crate::rand::{draw_pile, PileGenCfg, ReplayToken};
use nalgebra::{vector, Vector2, Vector3};
use proptest::prelude::*;

fn pile_of(boxes: &[(f64, f64, f64, Rect3)]) -> Pile {
    let mut pile = Pile::new();
    for (k, &(x, z, rot, bbox)) in boxes.iter().enumerate() {
        pile.push(ObjectId(k as u64 + 10), OrientedBox::new(Pose2::new(x, z, rot), bbox));
    }
    pile
}

fn is_level(pose: &Pose3) -> bool {
    (pose.up() - Vector3::y()).norm() < 1e-12
}

#[test]
fn empty_pile_gives_empty_layout() {
    assert!(layout_pile(&Pile::new(), &LayoutCfg::default()).is_empty());
}

#[test]
fn single_card_rests_flat_at_origin() {
    let pile = pile_of(&[(0.0, 0.0, 0.0, Rect3::card(2.0, 0.02, 3.0))]);
    let out = layout_pile(&pile, &LayoutCfg::default());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, ObjectId(10));
    assert_eq!(out[0].pose.position, vector![0.0, 0.0, 0.0]);
    assert!(is_level(&out[0].pose));
}

#[test]
fn aligned_stack_is_vertical() {
    let card = Rect3::card(2.0, 0.1, 2.0);
    let pile = pile_of(&[(0.0, 0.0, 0.0, card), (0.0, 0.0, 0.0, card), (0.0, 0.0, 0.0, card)]);
    let out = layout_pile(&pile, &LayoutCfg::default());
    for (k, expected) in [0.0, 0.1, 0.2].into_iter().enumerate() {
        assert!((out[k].pose.position.y - expected).abs() < 1e-12, "object {k}");
        assert!(out[k].pose.tilt() < 1e-6, "object {k}");
        assert!(out[k].pose.position.x.abs() < 1e-12);
        assert!(out[k].pose.position.z.abs() < 1e-12);
    }
}

#[test]
fn partial_overlap_tilts_toward_table() {
    let card = Rect3::card(2.0, 0.1, 2.0);
    let pile = pile_of(&[(0.0, 0.0, 0.0, card), (1.4, 0.6, 0.0, card)]);
    let out = layout_pile(&pile, &LayoutCfg::default());
    let b = &out[1].pose;
    assert!(b.tilt() > 0.01);
    // Raised on the -X side (over the first card), down on the table at +X.
    assert!(b.up().x > 0.0);
    let h = b.position.y;
    assert!(h > 0.0 && h < 0.1);
    // Roof face from the first card's edge x = 1 (height 0.1) to x = 2.4 (table).
    assert!((h - 0.1 / 1.4).abs() < 1e-5);
}

#[test]
fn load_above_pulls_partial_overlap_onto_supporter() {
    let card = Rect3::card(2.0, 0.1, 2.0);
    // Same two cards as the tilting case, with a stack on top near the first card.
    let mut boxes = vec![(0.0, 0.0, 0.0, card), (1.4, 0.6, 0.0, card)];
    boxes.extend(std::iter::repeat((0.6, 0.5, 0.0, card)).take(6));
    let pile = pile_of(&boxes);
    let cfg = LayoutCfg::default();

    let centers = CenterOfMassSolver::from_cfg(&cfg).centers_of_mass(&pile.boxes());
    // The second card's query point moves from its own center over the first card.
    assert!(!lies_over(&pile, 0, vector![1.4, 0.6]));
    assert!(lies_over(&pile, 0, centers[1]));

    let out = layout_pile(&pile, &cfg);
    let b = &out[1].pose;
    assert!(b.tilt() < 1e-6);
    assert!((b.position.y - 0.1).abs() < 1e-9);
}

fn lies_over(pile: &Pile, index: usize, p: Vector2<f64>) -> bool {
    pile.entries()[index].boxed.contains_point(p)
}

#[test]
fn disjoint_second_card_rests_flat() {
    let card = Rect3::card(2.0, 0.1, 2.0);
    let pile = pile_of(&[(0.0, 0.0, 0.0, card), (3.0, 0.0, 0.5, card)]);
    let out = layout_pile(&pile, &LayoutCfg::default());
    assert_eq!(out[1].pose.position, vector![3.0, 0.0, 0.0]);
    assert!(is_level(&out[1].pose));
}

#[test]
fn flat_pose_uses_table_height_and_box_bottom() {
    let bbox = Rect3::new(vector![-1.0, -0.05, -1.0], vector![1.0, 0.05, 1.0]);
    let pose = flat_pose(&Pose2::new(0.5, -0.5, 1.0), &bbox, 0.5);
    assert!((pose.position - vector![0.5, 0.55, -0.5]).norm() < 1e-12);
    assert!(is_level(&pose));
    assert!((pose.rotation.angle() - 1.0).abs() < 1e-12);
}

#[test]
fn pose_on_plane_puts_bottom_face_in_plane() {
    let bbox = Rect3::new(vector![-1.0, -0.05, -1.5], vector![1.0, 0.05, 1.5]);
    let plane = Plane3::through(
        vector![0.0, 0.3, 0.0],
        vector![0.0, 0.3, 1.0],
        vector![2.0, 0.1, 0.0],
    )
    .unwrap();
    assert!(plane.normal.y > 0.0);
    let pose = pose_on_plane(&Pose2::new(0.4, 0.2, 0.7), &bbox, &plane);
    let bottom = bottom_plane(&bbox, &pose);
    assert!((bottom.normal - plane.normal).norm() < 1e-12);
    assert!((bottom.dot - plane.dot).abs() < 1e-12);
    // Top face sits one thickness above along the normal.
    assert!((top_plane(&bbox, &pose).dot - plane.dot - 0.1).abs() < 1e-12);
    // Planar rotation survives the tilt.
    let x_axis = pose.rotation * Vector3::x();
    let (sin, cos) = 0.7f64.sin_cos();
    let expected = vector![cos, -sin].normalize();
    let projected = vector![x_axis.x, x_axis.z].normalize();
    assert!((projected - expected).norm() < 1e-2);
}

#[test]
fn tilt_onto_level_normal_is_identity() {
    assert_eq!(tilt_onto(&Vector3::y()), nalgebra::UnitQuaternion::identity());
    let n = vector![0.6, 0.8, 0.0];
    assert!((tilt_onto(&n) * Vector3::y() - n).norm() < 1e-12);
}

#[test]
fn snapshot_layout_matches_pile_layout() {
    let card = Rect3::card(2.0, 0.02, 3.0);
    let mut snap = TableSnapshot::new();
    snap.insert_object(ObjectId(1), Pose2::new(0.0, 0.0, 0.0), card)
        .insert_object(ObjectId(2), Pose2::new(0.5, 0.3, 0.2), card)
        .insert_object(ObjectId(3), Pose2::new(9.0, 0.0, 0.0), card)
        .push_member(PileId(7), ObjectId(2))
        .push_member(PileId(7), ObjectId(1));
    let pile = collect_pile(&snap, PileId(7)).unwrap();
    let ids: Vec<ObjectId> = pile.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![ObjectId(2), ObjectId(1)]);
    let cfg = LayoutCfg::default();
    assert_eq!(
        layout_snapshot(&snap, PileId(7), &cfg).unwrap(),
        layout_pile(&pile, &cfg)
    );
}

#[test]
fn collect_pile_rejects_malformed_input() {
    let card = Rect3::card(2.0, 0.02, 3.0);
    let mut snap = TableSnapshot::new();
    snap.insert_object(ObjectId(1), Pose2::new(0.0, 0.0, 0.0), card)
        .insert_object(ObjectId(2), Pose2::new(f64::NAN, 0.0, 0.0), card)
        .insert_object(ObjectId(3), Pose2::new(0.0, 0.0, 0.0), Rect3::card(2.0, 0.0, 3.0))
        .push_member(PileId(1), ObjectId(1))
        .push_member(PileId(1), ObjectId(1))
        .push_member(PileId(2), ObjectId(4))
        .push_member(PileId(3), ObjectId(2))
        .push_member(PileId(4), ObjectId(3));
    assert_eq!(
        collect_pile(&snap, PileId(0)),
        Err(PileError::UnknownPile(PileId(0)))
    );
    assert_eq!(
        collect_pile(&snap, PileId(1)),
        Err(PileError::DuplicateObject(ObjectId(1)))
    );
    assert_eq!(
        collect_pile(&snap, PileId(2)),
        Err(PileError::MissingObject(ObjectId(4)))
    );
    assert!(matches!(
        collect_pile(&snap, PileId(3)),
        Err(PileError::NonFinite { id: ObjectId(2), .. })
    ));
    let err = collect_pile(&snap, PileId(4)).unwrap_err();
    assert_eq!(
        err,
        PileError::DegenerateExtent {
            id: ObjectId(3),
            axis: 'y'
        }
    );
    assert!(err.to_string().contains("object 3"));
}

#[test]
fn degenerate_pile_entry_rests_flat() {
    // Unchecked piles may carry zero-area boxes; the solver still answers.
    let pile = pile_of(&[
        (0.0, 0.0, 0.0, Rect3::card(2.0, 0.1, 2.0)),
        (0.0, 0.0, 0.0, Rect3::card(0.0, 0.1, 2.0)),
    ]);
    assert!(pile.validate().is_err());
    let out = layout_pile(&pile, &LayoutCfg::default());
    assert_eq!(out[1].pose.position.y, 0.0);
}

fn random_pile(seed: u64, count: usize, spread: f64) -> Pile {
    let cfg = PileGenCfg {
        count,
        spread,
        ..PileGenCfg::default()
    };
    draw_pile(cfg, ReplayToken { seed, index: 0 })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn layout_is_deterministic(seed in any::<u64>(), count in 0usize..20) {
        let pile = random_pile(seed, count, 1.5);
        let cfg = LayoutCfg::default();
        prop_assert_eq!(layout_pile(&pile, &cfg), layout_pile(&pile, &cfg));
    }

    #[test]
    fn ids_are_preserved_in_order(seed in any::<u64>(), count in 0usize..20) {
        let pile = random_pile(seed, count, 1.5);
        let out = layout_pile(&pile, &LayoutCfg::default());
        let ids: Vec<ObjectId> = out.iter().map(|r| r.id).collect();
        let expected: Vec<ObjectId> = pile.iter().map(|e| e.id).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn bottom_object_is_flat(seed in any::<u64>(), count in 1usize..12, table in -1.0f64..1.0) {
        let pile = random_pile(seed, count, 1.5);
        let cfg = LayoutCfg { table_height: table, ..LayoutCfg::default() };
        let out = layout_pile(&pile, &cfg);
        let first = &pile.entries()[0].boxed;
        prop_assert!(is_level(&out[0].pose));
        prop_assert_eq!(out[0].pose.position.y, table - first.bbox.min.y);
    }

    #[test]
    fn isolated_objects_rest_flat(seed in any::<u64>(), count in 1usize..12) {
        let pile = random_pile(seed, count, 6.0);
        let out = layout_pile(&pile, &LayoutCfg::default());
        // Circumradius of a 2 x 3 card, with slack for tilted top faces.
        let reach = 2.0 * 1.81;
        let centers: Vec<_> = pile.iter().map(|e| e.boxed.center()).collect();
        for j in 1..pile.len() {
            if (0..j).all(|i| (centers[i] - centers[j]).norm() > reach) {
                prop_assert!(is_level(&out[j].pose));
                prop_assert_eq!(out[j].pose.position.y, 0.0);
            }
        }
    }

    #[test]
    fn no_interpenetration_with_faces_below(seed in any::<u64>(), count in 2usize..14) {
        let pile = random_pile(seed, count, 1.5);
        let out = layout_pile(&pile, &LayoutCfg::default());
        let boxes = pile.boxes();
        for j in 1..boxes.len() {
            let outline = crate::geom2::footprint(&boxes[j]);
            let bottom = bottom_plane(&boxes[j].bbox, &out[j].pose);
            for i in 0..j {
                let face = top_face(&boxes[i].bbox, &out[i].pose);
                let clipped = face.polygon.intersection(&outline);
                for &c in &clipped.corners {
                    let v = face.plane.point_at(c);
                    prop_assert!(
                        bottom.distance(v) <= 1e-5,
                        "object {} cuts into object {} by {}", j, i, bottom.distance(v)
                    );
                }
            }
        }
    }
}
