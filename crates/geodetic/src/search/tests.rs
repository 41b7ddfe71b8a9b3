use super::*;
use crate::sphere::geodetic_distance;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn mesh_1d(lons: &[f64], lats: &[f64], depths: &[f64]) -> Mesh {
    Mesh::new(
        &ArrayView::from(lons),
        &ArrayView::from(lats),
        Some(&ArrayView::from(depths)),
    )
    .unwrap()
}

#[test]
fn ties_keep_earliest_index() {
    // Points 1 and 3 coincide and are both nearest to the query.
    let mesh = mesh_1d(&[0.5, 0.1, 0.4, 0.1], &[0.5, 0.1, 0.4, 0.1], &[0.0; 4]);
    let query = PointSet::new(&[0.1], &[0.1]).with_depths(&[0.0]);
    let idx = mesh.nearest_indices(&query).unwrap();
    assert_eq!(idx.as_slice(), &[1]);
}

#[test]
fn zero_vertical_offset_matches_surface_distance() {
    let mesh = mesh_1d(&[0.01, 0.02, -0.03], &[0.0, 0.01, 0.02], &[5.0, 5.0, 5.0]);
    let query = PointSet::new(&[0.015], &[0.004]).with_depths(&[5.0]);
    let d = mesh.nearest_distances(&query).unwrap();
    let expected = [(0.01, 0.0), (0.02, 0.01), (-0.03, 0.02)]
        .iter()
        .map(|&(lon, lat)| geodetic_distance(0.015, 0.004, lon, lat))
        .fold(f64::INFINITY, f64::min);
    assert_eq!(d.as_slice(), &[expected]);
}

#[test]
fn depth_changes_the_winner() {
    // Same surface location twice; the one at matching depth wins.
    let mesh = mesh_1d(&[0.0, 0.0], &[0.0, 0.0], &[30.0, 10.0]);
    let query = PointSet::new(&[0.0], &[0.0]).with_depths(&[12.0]);
    let result = mesh.min_distance(&query, false).unwrap();
    assert_eq!(result.distances().unwrap().as_slice(), &[2.0]);
    let result = mesh.min_distance(&query, true).unwrap();
    assert_eq!(result.indices().unwrap().as_slice(), &[1]);
}

#[test]
fn empty_mesh_is_rejected() {
    let empty: [f64; 0] = [];
    let err = Mesh::new(&ArrayView::from(&empty), &ArrayView::from(&empty), None).unwrap_err();
    assert!(matches!(err, GeodeticError::Shape { .. }));
    assert!(Mesh::from_points(&[]).is_err());
}

#[test]
fn mismatched_query_shapes_fail_before_scanning() {
    let mesh = mesh_1d(&[0.0], &[0.0], &[0.0]);
    let query = PointSet::new(&[0.0, 0.1, 0.2], &[0.0, 0.1]);
    assert!(matches!(
        mesh.min_distance(&query, true),
        Err(GeodeticError::Shape { .. })
    ));
}

#[test]
fn output_takes_query_shape() {
    let mesh = mesh_1d(&[0.0, 0.1], &[0.0, 0.1], &[0.0, 0.0]);
    let lons = [0.0, 0.1, 0.01, 0.09, 0.02, 0.11];
    let lats = [0.0, 0.1, 0.0, 0.1, 0.01, 0.1];
    let query = PointSet {
        lons: ArrayView::new(&lons, &[2, 3]).unwrap(),
        lats: ArrayView::new(&lats, &[2, 3]).unwrap(),
        depths: None,
    };
    let idx = mesh.nearest_indices(&query).unwrap();
    assert_eq!(idx.shape(), &[2, 3]);
    assert_eq!(idx.as_slice(), &[0, 1, 0, 1, 0, 1]);
}

#[test]
fn mesh_index_follows_row_major_flattening() {
    // 2x2 mesh; nearest point lives at [1, 0] -> flat index 2.
    let lons = [0.0, 0.1, 0.2, 0.3];
    let lats = [0.0, 0.0, 0.0, 0.0];
    let mesh = Mesh::new(
        &ArrayView::new(&lons, &[2, 2]).unwrap(),
        &ArrayView::new(&lats, &[2, 2]).unwrap(),
        None,
    )
    .unwrap();
    assert_eq!(mesh.len(), 4);
    let query = PointSet::new(&[0.21], &[0.0]);
    assert_eq!(mesh.nearest_indices(&query).unwrap().as_slice(), &[2]);
}

#[test]
fn scalar_depth_broadcasts_over_queries() {
    let mesh = mesh_1d(&[0.0], &[0.0], &[0.0]);
    let depth = 3.0;
    let query = PointSet::new(&[0.0, 0.0], &[0.0, 0.0]).with_depths(&depth);
    let d = mesh.nearest_distances(&query).unwrap();
    assert_eq!(d.as_slice(), &[3.0, 3.0]);
}

#[test]
fn nan_query_reports_no_index() {
    let mesh = mesh_1d(&[0.0, 0.1], &[0.0, 0.1], &[0.0, 0.0]);
    let query = PointSet::new(&[f64::NAN], &[0.0]);
    assert_eq!(mesh.nearest_indices(&query).unwrap().as_slice(), &[-1]);
    assert!(mesh.nearest_distances(&query).unwrap().as_slice()[0].is_nan());
}

#[test]
fn closest_points_pick_mesh_coordinates() {
    let mesh = Mesh::from_points(&[
        Point::with_depth(0.0, 0.0, 1.0),
        Point::with_depth(0.5, 0.5, 2.0),
    ])
    .unwrap();
    let query = PointSet::new(&[0.45, 0.01], &[0.4, -0.02]);
    let closest = mesh.closest_points(&query).unwrap();
    assert_eq!(closest.lons.as_slice(), &[0.5, 0.0]);
    assert_eq!(closest.lats.as_slice(), &[0.5, 0.0]);
    assert_eq!(closest.depths.as_slice(), &[2.0, 1.0]);
}

#[test]
fn seeded_random_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(7);
    let n_mesh = 50;
    let pts: Vec<Point> = (0..n_mesh)
        .map(|_| {
            Point::with_depth(
                rng.gen_range(-0.2..0.2),
                rng.gen_range(-0.2..0.2),
                rng.gen_range(0.0..20.0),
            )
        })
        .collect();
    let mesh = Mesh::from_points(&pts).unwrap();
    for _ in 0..20 {
        let q = Point::with_depth(
            rng.gen_range(-0.3..0.3),
            rng.gen_range(-0.3..0.3),
            rng.gen_range(0.0..20.0),
        );
        let (best, idx) = mesh.nearest(&q);
        let idx = idx.unwrap();
        let brute = pts
            .iter()
            .map(|p| q.distance_with_depth(p))
            .fold(f64::INFINITY, f64::min);
        assert_eq!(best, brute);
        assert_eq!(q.distance_with_depth(&pts[idx]), best);
    }
}

proptest! {
    #[test]
    fn index_is_first_minimum(
        mesh_pts in prop::collection::vec((-0.5f64..0.5, -0.5f64..0.5, 0.0f64..10.0), 1..24),
        q in (-0.6f64..0.6, -0.6f64..0.6, 0.0f64..10.0),
    ) {
        let pts: Vec<Point> = mesh_pts.iter().map(|&(x, y, z)| Point::with_depth(x, y, z)).collect();
        let mesh = Mesh::from_points(&pts).unwrap();
        let query = Point::with_depth(q.0, q.1, q.2);
        let (best, idx) = mesh.nearest(&query);
        let idx = idx.unwrap();
        let dists: Vec<f64> = pts.iter().map(|p| query.distance_with_depth(p)).collect();
        prop_assert_eq!(dists[idx], best);
        prop_assert!(dists.iter().all(|&d| d >= best));
        prop_assert!(dists[..idx].iter().all(|&d| d > best));
    }

    #[test]
    fn repeated_calls_are_bit_identical(
        lons in prop::collection::vec(-0.5f64..0.5, 1..10),
        qlon in -0.5f64..0.5,
    ) {
        let lats = vec![0.1; lons.len()];
        let mesh = Mesh::new(&ArrayView::from(&lons), &ArrayView::from(&lats), None).unwrap();
        let qlons = [qlon];
        let query = PointSet::new(&qlons, &[0.0]);
        let a = mesh.nearest_distances(&query).unwrap();
        let b = mesh.nearest_distances(&query).unwrap();
        prop_assert_eq!(a.as_slice()[0].to_bits(), b.as_slice()[0].to_bits());
    }
}
