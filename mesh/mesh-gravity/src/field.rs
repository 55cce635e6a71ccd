//! Werner–Scheeres field evaluation.
//!
//! Evaluates the geometric potential and acceleration kernel of a uniform
//! polyhedron at a field point as a sum of edge and face terms:
//!
//! ```text
//! U = 1/2 ( -Σ_e (r_e · E_e · r_e) L_e + Σ_f (r_f · F_f · r_f) ω_f )
//! g =       -Σ_e (E_e · r_e) L_e     + Σ_f (F_f · r_f) ω_f
//! ```
//!
//! Multiply by `G * density` for physical units. Far from the body
//! `U ≈ -V / r` and `g` points toward the body.
//!
//! Reference: Werner R. A. and D. J. Scheeres (1997), *Exterior gravitation
//! of a polyhedron derived and compared with harmonic and mascon gravitation
//! representations of asteroid 4769 Castalia*, CeMDA 65, 313-344.

use std::f64::consts::TAU;

use mesh_types::PlateModel;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GravityError, GravityResult};
use crate::params::GravityParams;
use crate::topology::{EdgeDyad, FaceDyad, Topology};

/// Solid-angle sum at or above which a point counts as inside.
///
/// The sum is `4π` inside and `0` outside; the midpoint splits them.
pub const CONTAINMENT_THRESHOLD: f64 = TAU;

/// Displacement from the field point to one vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Displacement {
    /// `vertex_position - field_point`.
    pub r: Vector3<f64>,
    /// `|r|`.
    pub magnitude: f64,
}

/// Per-query scratch buffer of vertex displacements.
///
/// Every evaluation refreshes the whole buffer for its own field point, so
/// a cache can be reused across calls to avoid reallocation. It holds no
/// state that outlives a call. Give each thread its own cache.
#[derive(Debug, Clone, Default)]
pub struct DisplacementCache {
    entries: Vec<Displacement>,
}

impl DisplacementCache {
    /// Create an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a cache with room for `vertex_count` vertices.
    #[must_use]
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            entries: Vec::with_capacity(vertex_count),
        }
    }

    /// Recompute every displacement for `field_point`.
    pub fn refresh<M: PlateModel + ?Sized>(&mut self, mesh: &M, field_point: &Point3<f64>) {
        self.entries.clear();
        self.entries
            .extend((0..mesh.vertex_count()).map(|vertex| {
                let r = mesh.vertex_position(vertex) - field_point;
                Displacement {
                    r,
                    magnitude: r.norm(),
                }
            }));
    }

    /// Displacements indexed by vertex id.
    #[must_use]
    pub fn entries(&self) -> &[Displacement] {
        &self.entries
    }

    /// Displacement of one vertex.
    #[inline]
    fn at(&self, vertex: u32) -> &Displacement {
        &self.entries[vertex as usize]
    }
}

/// Potential and optional acceleration at one field point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldSample {
    /// Geometric potential (multiply by `G * density`).
    pub potential: f64,
    /// Geometric acceleration, when requested.
    ///
    /// Not scaled by the `1/2` applied to the potential.
    pub acceleration: Option<Vector3<f64>>,
}

/// Evaluate the potential, and optionally the acceleration, at a field point.
///
/// Allocates a fresh [`DisplacementCache`]. Use [`evaluate_with_cache`] to
/// reuse one across many calls.
///
/// # Errors
///
/// Returns [`GravityError::MeshMismatch`] if `mesh` is not the mesh the
/// topology was built from (vertex counts differ).
///
/// # Example
///
/// ```
/// use mesh_gravity::{build_topology, evaluate};
/// use mesh_types::{unit_tetrahedron, Point3};
///
/// let mesh = unit_tetrahedron();
/// let topology = build_topology(&mesh).unwrap();
///
/// let sample = evaluate(&topology, &mesh, &Point3::new(50.0, 0.0, 0.0), true).unwrap();
/// assert!(sample.potential < 0.0);
/// assert!(sample.acceleration.unwrap().x < 0.0); // pulled back toward the body
/// ```
pub fn evaluate<M: PlateModel + ?Sized>(
    topology: &Topology,
    mesh: &M,
    field_point: &Point3<f64>,
    want_acceleration: bool,
) -> GravityResult<FieldSample> {
    let mut cache = DisplacementCache::with_capacity(mesh.vertex_count());
    evaluate_with_cache(topology, mesh, field_point, want_acceleration, &mut cache)
}

/// Evaluate at a field point using a caller-owned scratch cache.
///
/// # Errors
///
/// Returns [`GravityError::MeshMismatch`] if `mesh` is not the mesh the
/// topology was built from (vertex counts differ).
pub fn evaluate_with_cache<M: PlateModel + ?Sized>(
    topology: &Topology,
    mesh: &M,
    field_point: &Point3<f64>,
    want_acceleration: bool,
    cache: &mut DisplacementCache,
) -> GravityResult<FieldSample> {
    check_mesh(topology, mesh)?;
    cache.refresh(mesh, field_point);
    Ok(accumulate(topology, cache, want_acceleration))
}

/// Sum of the signed solid angles of all faces seen from a field point.
///
/// `4π` for an interior point and `0` for an exterior one.
///
/// # Errors
///
/// Returns [`GravityError::MeshMismatch`] if the mesh does not match the topology.
pub fn solid_angle_sum<M: PlateModel + ?Sized>(
    topology: &Topology,
    mesh: &M,
    field_point: &Point3<f64>,
) -> GravityResult<f64> {
    let mut cache = DisplacementCache::with_capacity(mesh.vertex_count());
    solid_angle_sum_with_cache(topology, mesh, field_point, &mut cache)
}

/// [`solid_angle_sum`] using a caller-owned scratch cache.
///
/// # Errors
///
/// Returns [`GravityError::MeshMismatch`] if the mesh does not match the topology.
pub fn solid_angle_sum_with_cache<M: PlateModel + ?Sized>(
    topology: &Topology,
    mesh: &M,
    field_point: &Point3<f64>,
    cache: &mut DisplacementCache,
) -> GravityResult<f64> {
    check_mesh(topology, mesh)?;
    cache.refresh(mesh, field_point);
    let params = topology.params();
    Ok(topology
        .faces()
        .iter()
        .map(|face| face_solid_angle(face, cache, params))
        .sum())
}

/// Check whether a field point lies inside the polyhedron.
///
/// True when the solid-angle sum is at least [`CONTAINMENT_THRESHOLD`].
/// Points on the surface may go either way.
///
/// # Errors
///
/// Returns [`GravityError::MeshMismatch`] if the mesh does not match the topology.
///
/// # Example
///
/// ```
/// use mesh_gravity::{build_topology, is_inside};
/// use mesh_types::{unit_tetrahedron, Point3};
///
/// let mesh = unit_tetrahedron();
/// let topology = build_topology(&mesh).unwrap();
///
/// assert!(is_inside(&topology, &mesh, &Point3::new(0.25, 0.25, 0.25)).unwrap());
/// assert!(!is_inside(&topology, &mesh, &Point3::new(10.0, 10.0, 10.0)).unwrap());
/// ```
pub fn is_inside<M: PlateModel + ?Sized>(
    topology: &Topology,
    mesh: &M,
    field_point: &Point3<f64>,
) -> GravityResult<bool> {
    solid_angle_sum(topology, mesh, field_point).map(|sum| sum >= CONTAINMENT_THRESHOLD)
}

/// [`is_inside`] using a caller-owned scratch cache.
///
/// # Errors
///
/// Returns [`GravityError::MeshMismatch`] if the mesh does not match the topology.
pub fn is_inside_with_cache<M: PlateModel + ?Sized>(
    topology: &Topology,
    mesh: &M,
    field_point: &Point3<f64>,
    cache: &mut DisplacementCache,
) -> GravityResult<bool> {
    solid_angle_sum_with_cache(topology, mesh, field_point, cache)
        .map(|sum| sum >= CONTAINMENT_THRESHOLD)
}

fn check_mesh<M: PlateModel + ?Sized>(topology: &Topology, mesh: &M) -> GravityResult<()> {
    if mesh.vertex_count() == topology.vertex_count() {
        Ok(())
    } else {
        Err(GravityError::MeshMismatch {
            expected: topology.vertex_count(),
            actual: mesh.vertex_count(),
        })
    }
}

/// Sum edge and face terms over a refreshed cache.
pub(crate) fn accumulate(
    topology: &Topology,
    cache: &DisplacementCache,
    want_acceleration: bool,
) -> FieldSample {
    let params = topology.params();
    let mut potential = 0.0;
    let mut acceleration = Vector3::zeros();

    for edge in topology.edges() {
        // Any point on the edge line works; take the first endpoint.
        let r = &cache.at(edge.vertices.0).r;
        let le = edge_log_term(edge, cache, params);

        let er = edge.dyad * r;
        potential -= r.dot(&er) * le;
        if want_acceleration {
            acceleration -= er * le;
        }
    }

    for face in topology.faces() {
        let r = &cache.at(face.vertices[0]).r;
        let wf = face_solid_angle(face, cache, params);

        let fr = face.dyad * r;
        potential += r.dot(&fr) * wf;
        if want_acceleration {
            acceleration += fr * wf;
        }
    }

    FieldSample {
        potential: 0.5 * potential,
        acceleration: want_acceleration.then_some(acceleration),
    }
}

/// Edge log term `L_e = ln((r1 + r2 + L) / (r1 + r2 - L))`.
///
/// Zero when the field point is on the edge segment.
fn edge_log_term(edge: &EdgeDyad, cache: &DisplacementCache, params: &GravityParams) -> f64 {
    let r1 = cache.at(edge.vertices.0).magnitude;
    let r2 = cache.at(edge.vertices.1).magnitude;
    let sum = r1 + r2;

    if (sum - edge.length).abs() < params.collinear_tolerance {
        return 0.0;
    }

    ((sum + edge.length) / (sum - edge.length)).ln()
}

/// Signed solid angle `ω_f` of a face, via the spherical-excess formula.
fn face_solid_angle(face: &FaceDyad, cache: &DisplacementCache, params: &GravityParams) -> f64 {
    let [a, b, c] = face.vertices;
    let d1 = cache.at(a);
    let d2 = cache.at(b);
    let d3 = cache.at(c);

    let mut numerator = d1.r.dot(&d2.r.cross(&d3.r));
    let denominator = d1.magnitude * d2.magnitude * d3.magnitude
        + d1.magnitude * d2.r.dot(&d3.r)
        + d2.magnitude * d3.r.dot(&d1.r)
        + d3.magnitude * d1.r.dot(&d2.r);

    // On the face plane: pick the -0.0 branch of atan2 consistently.
    if numerator.abs() < params.coplanar_tolerance {
        numerator = -0.0;
    }

    2.0 * numerator.atan2(denominator)
}
