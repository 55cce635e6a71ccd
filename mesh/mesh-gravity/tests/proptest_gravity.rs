//! Property-based tests for the gravity kernel.
//!
//! Run with: cargo test -p mesh-gravity -- proptest

#![allow(clippy::unwrap_used)]

use std::f64::consts::PI;

use mesh_gravity::{PolyhedronGravity, Topology};
use mesh_types::{IndexedMesh, Point3, Vector3, icosphere, unit_cube};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// A point well inside the unit icosphere (norm at most √3/2).
fn arb_interior_point() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-0.5..0.5f64).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

/// A point clear of the unit icosphere.
fn arb_exterior_point() -> impl Strategy<Value = Point3<f64>> {
    (prop::array::uniform3(-1.0..1.0f64), 1.2..50.0f64).prop_filter_map(
        "direction must be non-degenerate",
        |([x, y, z], radius)| {
            Vector3::new(x, y, z)
                .try_normalize(1e-3)
                .map(|dir| Point3::from(dir * radius))
        },
    )
}

fn arb_offset() -> impl Strategy<Value = Vector3<f64>> {
    prop::array::uniform3(-100.0..100.0f64).prop_map(|[x, y, z]| Vector3::new(x, y, z))
}

/// A unit cube scaled and moved to a random place.
fn arb_cube() -> impl Strategy<Value = IndexedMesh> {
    (0.1..100.0f64, arb_offset()).prop_map(|(scale, offset)| {
        let mut mesh = unit_cube();
        mesh.scale(scale);
        mesh.translate(offset);
        mesh
    })
}

// =============================================================================
// Property Tests: Containment
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn interior_points_sum_to_four_pi(point in arb_interior_point()) {
        let gravity = PolyhedronGravity::new(icosphere(1.0, 2)).unwrap();
        let sum = gravity.solid_angle_sum(&point);
        prop_assert!((sum - 4.0 * PI).abs() < 1e-6, "sum {} at {}", sum, point);
        prop_assert!(gravity.is_inside(&point));
    }

    #[test]
    fn exterior_points_sum_to_zero(point in arb_exterior_point()) {
        let gravity = PolyhedronGravity::new(icosphere(1.0, 2)).unwrap();
        let sum = gravity.solid_angle_sum(&point);
        prop_assert!(sum.abs() < 1e-6, "sum {} at {}", sum, point);
        prop_assert!(!gravity.is_inside(&point));
    }
}

// =============================================================================
// Property Tests: Transformed Meshes
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn transformed_cube_keeps_edge_count(mesh in arb_cube()) {
        let topology = Topology::build(&mesh).unwrap();
        prop_assert_eq!(topology.edges().len(), 18);
        prop_assert_eq!(topology.faces().len(), 12);
    }

    #[test]
    fn transformed_cube_contains_its_center(mesh in arb_cube()) {
        let center = mesh.centroid();
        let gravity = PolyhedronGravity::new(mesh).unwrap();
        prop_assert!(gravity.is_inside(&center));
    }

    #[test]
    fn potential_is_negative(mesh in arb_cube(), offset in arb_offset()) {
        let point = mesh.centroid() + offset;
        let gravity = PolyhedronGravity::new(mesh).unwrap();
        let potential = gravity.potential(&point);
        prop_assert!(potential.is_finite());
        prop_assert!(potential < 0.0, "potential {} at {}", potential, point);
    }

    #[test]
    fn acceleration_follows_translation(offset in arb_offset()) {
        let mesh = unit_cube();
        let mut moved = mesh.clone();
        moved.translate(offset);

        let a = PolyhedronGravity::new(mesh).unwrap();
        let b = PolyhedronGravity::new(moved).unwrap();

        let point = Point3::new(2.5, -1.0, 0.75);
        let ga = a.acceleration(&point);
        let gb = b.acceleration(&(point + offset));
        prop_assert!((ga - gb).norm() <= 1e-8 * ga.norm().max(1.0));
    }
}
