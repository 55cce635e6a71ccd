//! A mesh bundled with its topology.

use mesh_types::PlateModel;
use nalgebra::{Point3, Vector3};

use crate::error::GravityResult;
use crate::field::{self, CONTAINMENT_THRESHOLD, DisplacementCache, FieldSample};
use crate::params::GravityParams;
use crate::topology::Topology;

/// Gravity field of a closed plate model.
///
/// Owns the mesh and the topology built from it, so every query is
/// guaranteed to pair them correctly and cannot fail. The struct is
/// immutable after construction; share it across threads freely.
///
/// # Example
///
/// ```
/// use mesh_gravity::PolyhedronGravity;
/// use mesh_types::{unit_cube, Point3};
///
/// let gravity = PolyhedronGravity::new(unit_cube()).unwrap();
///
/// let sample = gravity.evaluate(&Point3::new(0.5, 0.5, 4.0), true);
/// assert!(sample.potential < 0.0);
/// assert!(gravity.is_inside(&Point3::new(0.5, 0.5, 0.5)));
/// ```
#[derive(Debug, Clone)]
pub struct PolyhedronGravity<M> {
    mesh: M,
    topology: Topology,
}

impl<M: PlateModel> PolyhedronGravity<M> {
    /// Build the topology of `mesh` with default tolerances.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh is empty or references missing vertices.
    pub fn new(mesh: M) -> GravityResult<Self> {
        Self::with_params(mesh, &GravityParams::default())
    }

    /// Build the topology of `mesh` with custom tolerances.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerances are invalid, the mesh is empty, or
    /// a face references a missing vertex.
    pub fn with_params(mesh: M, params: &GravityParams) -> GravityResult<Self> {
        let topology = Topology::build_with_params(&mesh, params)?;
        Ok(Self { mesh, topology })
    }

    /// The underlying mesh.
    #[must_use]
    pub const fn mesh(&self) -> &M {
        &self.mesh
    }

    /// The edge and face dyads.
    #[must_use]
    pub const fn topology(&self) -> &Topology {
        &self.topology
    }

    /// A scratch cache sized for this mesh.
    #[must_use]
    pub fn new_cache(&self) -> DisplacementCache {
        DisplacementCache::with_capacity(self.mesh.vertex_count())
    }

    /// Potential and optional acceleration at a field point.
    #[must_use]
    pub fn evaluate(&self, field_point: &Point3<f64>, want_acceleration: bool) -> FieldSample {
        let mut cache = self.new_cache();
        self.evaluate_with_cache(field_point, want_acceleration, &mut cache)
    }

    /// [`evaluate`](Self::evaluate) with a caller-owned scratch cache.
    #[must_use]
    pub fn evaluate_with_cache(
        &self,
        field_point: &Point3<f64>,
        want_acceleration: bool,
        cache: &mut DisplacementCache,
    ) -> FieldSample {
        cache.refresh(&self.mesh, field_point);
        field::accumulate(&self.topology, cache, want_acceleration)
    }

    /// Potential only.
    #[must_use]
    pub fn potential(&self, field_point: &Point3<f64>) -> f64 {
        self.evaluate(field_point, false).potential
    }

    /// Acceleration only.
    #[must_use]
    pub fn acceleration(&self, field_point: &Point3<f64>) -> Vector3<f64> {
        self.evaluate(field_point, true)
            .acceleration
            .unwrap_or_else(Vector3::zeros)
    }

    /// Sum of the signed face solid angles (`4π` inside, `0` outside).
    #[must_use]
    pub fn solid_angle_sum(&self, field_point: &Point3<f64>) -> f64 {
        let mut cache = self.new_cache();
        self.solid_angle_sum_with_cache(field_point, &mut cache)
    }

    /// [`solid_angle_sum`](Self::solid_angle_sum) with a caller-owned cache.
    #[must_use]
    pub fn solid_angle_sum_with_cache(
        &self,
        field_point: &Point3<f64>,
        cache: &mut DisplacementCache,
    ) -> f64 {
        // The topology was built from this mesh, so the check cannot fail.
        field::solid_angle_sum_with_cache(&self.topology, &self.mesh, field_point, cache)
            .unwrap_or(0.0)
    }

    /// Check whether a field point lies inside the polyhedron.
    #[must_use]
    pub fn is_inside(&self, field_point: &Point3<f64>) -> bool {
        self.solid_angle_sum(field_point) >= CONTAINMENT_THRESHOLD
    }
}
