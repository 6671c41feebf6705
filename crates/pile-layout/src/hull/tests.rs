use super::search::top_vertex_and_remaining;
use super::*;
use crate::geom2::{footprint, OrientedBox, Pose2, Rect3};
use nalgebra::{vector, Vector3};

const ITERS: usize = 10_000;

fn square(x: f64, z: f64, side: f64) -> ConvexBoundary2 {
    footprint(&OrientedBox::new(
        Pose2::new(x, z, 0.0),
        Rect3::card(side, 0.1, side),
    ))
}

#[test]
fn empty_hull_has_no_support() {
    let hull = BoundedConvexHull::new(square(0.0, 0.0, 2.0), 0.0);
    assert_eq!(hull.vertices().len(), 4);
    assert!(hull.find_support_plane(vector![0.0, 0.0], ITERS).is_none());
}

#[test]
fn disjoint_polygon_is_rejected() {
    let mut hull = BoundedConvexHull::new(square(0.0, 0.0, 2.0), 0.0);
    assert!(!hull.add_planar_polygon(&square(3.0, 0.0, 2.0), &Plane3::horizontal(0.1)));
    assert_eq!(hull.accepted(), 0);
    assert_eq!(hull.vertices().len(), 4);
}

#[test]
fn covering_face_gives_its_plane() {
    let mut hull = BoundedConvexHull::new(square(0.0, 0.0, 2.0), 0.0);
    assert!(hull.add_planar_polygon(&square(0.0, 0.0, 2.0), &Plane3::horizontal(0.1)));
    let plane = hull.find_support_plane(vector![0.2, -0.3], ITERS).unwrap();
    assert!((plane.normal - Vector3::y()).norm() < 1e-12);
    assert!((plane.height_at(vector![0.0, 0.0]) - 0.1).abs() < 1e-12);
}

#[test]
fn highest_of_stacked_faces_wins() {
    let mut hull = BoundedConvexHull::new(square(0.0, 0.0, 2.0), 0.0);
    hull.add_planar_polygon(&square(0.0, 0.0, 2.0), &Plane3::horizontal(0.1));
    hull.add_planar_polygon(&square(0.0, 0.0, 2.0), &Plane3::horizontal(0.2));
    let plane = hull.find_support_plane(vector![0.0, 0.0], ITERS).unwrap();
    assert!((plane.height_at(vector![0.5, 0.5]) - 0.2).abs() < 1e-12);
}

#[test]
fn face_below_table_is_ignored_for_height() {
    let mut hull = BoundedConvexHull::new(square(0.0, 0.0, 2.0), 0.0);
    assert!(hull.add_planar_polygon(&square(0.0, 0.0, 2.0), &Plane3::horizontal(-0.5)));
    let plane = hull.find_support_plane(vector![0.0, 0.0], ITERS).unwrap();
    assert!((plane.normal - Vector3::y()).norm() < 1e-12);
    assert!(plane.height_at(vector![0.0, 0.0]).abs() < 1e-12);
}

#[test]
fn partial_support_tilts_toward_table() {
    // Footprint [0, 2]²; a raised face covers only [0, 1]².
    let mut hull = BoundedConvexHull::new(square(1.0, 1.0, 2.0), 0.0);
    assert!(hull.add_planar_polygon(&square(0.0, 0.0, 2.0), &Plane3::horizontal(0.1)));
    let center = vector![1.6, 1.2];
    let plane = hull.find_support_plane(center, ITERS).unwrap();
    assert!(plane.normal.y < 1.0);
    // Descends away from the raised corner.
    assert!(plane.normal.x > 0.0);
    let h = plane.height_at(center);
    assert!(h > 0.0 && h < 0.1);
    for v in hull.vertices() {
        assert!(plane.distance(*v) <= 1e-6, "vertex {v:?} above support plane");
    }
}

#[test]
fn edge_surrounding_center_from_corner() {
    let corners = square(0.0, 0.0, 2.0).corners;
    // From corner (1, 1) toward a point just below the center: the bottom edge
    // (-1, -1) → (1, -1) closes the triangle.
    let e = edge_index_surrounding(&corners, vector![0.1, -0.2], corners[0]);
    assert_eq!(corners[e], vector![-1.0, -1.0]);
    assert_eq!(e, 2);
    // Degenerate query returns the first edge.
    assert_eq!(edge_index_surrounding(&corners, corners[0], corners[0]), 0);
}

#[test]
fn top_vertex_skips_spanning_vertices() {
    let plane = Plane3::horizontal(0.0);
    let verts = [
        vector![0.0, 0.0, 0.0],
        vector![1.0, 0.5, 0.0],
        vector![0.0, 0.2, 1.0],
        vector![2.0, -1.0, 0.0],
    ];
    let (top, rest) = top_vertex_and_remaining(&verts, &plane).unwrap();
    assert_eq!(top, vector![1.0, 0.5, 0.0]);
    assert_eq!(rest.len(), 2);
    assert!(top_vertex_and_remaining(&verts[..1], &plane).is_none());
}
