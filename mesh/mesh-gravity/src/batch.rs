//! Parallel evaluation over many field points.

use mesh_types::PlateModel;
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::gravity::PolyhedronGravity;

/// Where to evaluate the field.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationSites {
    /// At every mesh vertex.
    Vertices,
    /// At the centroid of every face.
    FaceCenters,
    /// At caller-supplied points.
    Points(Vec<Point3<f64>>),
}

impl EvaluationSites {
    /// Resolve the sites to concrete points for a mesh.
    #[must_use]
    pub fn points<M: PlateModel + ?Sized>(&self, mesh: &M) -> Vec<Point3<f64>> {
        match self {
            Self::Vertices => (0..mesh.vertex_count())
                .map(|v| mesh.vertex_position(v))
                .collect(),
            Self::FaceCenters => (0..mesh.face_count()).map(|f| mesh.face_center(f)).collect(),
            Self::Points(points) => points.clone(),
        }
    }
}

/// Field values at one evaluation site.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GravitySample {
    /// Site index (vertex, face, or point index).
    pub index: usize,
    /// Field point.
    pub position: Point3<f64>,
    /// Potential at the field point.
    pub potential: f64,
    /// Acceleration at the field point.
    pub acceleration: Vector3<f64>,
}

/// Evaluate potential and acceleration at every site, in parallel.
///
/// Each worker thread reuses one scratch cache. Results are returned in
/// site order and are identical to evaluating the sites one by one.
///
/// # Example
///
/// ```
/// use mesh_gravity::{evaluate_sites, EvaluationSites, PolyhedronGravity};
/// use mesh_types::unit_cube;
///
/// let gravity = PolyhedronGravity::new(unit_cube()).unwrap();
/// let samples = evaluate_sites(&gravity, &EvaluationSites::FaceCenters);
/// assert_eq!(samples.len(), 12);
/// ```
#[must_use]
pub fn evaluate_sites<M: PlateModel + Sync>(
    gravity: &PolyhedronGravity<M>,
    sites: &EvaluationSites,
) -> Vec<GravitySample> {
    let points = sites.points(gravity.mesh());

    info!(
        sites = points.len(),
        faces = gravity.topology().faces().len(),
        "Evaluating polyhedral gravity"
    );

    let samples: Vec<GravitySample> = points
        .par_iter()
        .enumerate()
        .map_init(
            || gravity.new_cache(),
            |cache, (index, position)| {
                let sample = gravity.evaluate_with_cache(position, true, cache);
                GravitySample {
                    index,
                    position: *position,
                    potential: sample.potential,
                    acceleration: sample.acceleration.unwrap_or_else(Vector3::zeros),
                }
            },
        )
        .collect();

    debug!(samples = samples.len(), "Gravity evaluation complete");
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{icosphere, unit_tetrahedron};

    #[test]
    fn site_points_resolve() {
        let mesh = unit_tetrahedron();
        assert_eq!(EvaluationSites::Vertices.points(&mesh), mesh.vertices);
        assert_eq!(EvaluationSites::FaceCenters.points(&mesh).len(), 4);

        let custom = vec![Point3::new(1.0, 2.0, 3.0)];
        assert_eq!(EvaluationSites::Points(custom.clone()).points(&mesh), custom);
    }

    #[test]
    fn parallel_matches_sequential() {
        let gravity = PolyhedronGravity::new(icosphere(1.0, 2)).unwrap();
        let samples = evaluate_sites(&gravity, &EvaluationSites::FaceCenters);

        assert_eq!(samples.len(), 320);
        for (i, sample) in samples.iter().enumerate() {
            assert_eq!(sample.index, i);
            let expected = gravity.evaluate(&sample.position, true);
            assert_eq!(sample.potential.to_bits(), expected.potential.to_bits());
            assert_eq!(Some(sample.acceleration), expected.acceleration);
        }
    }

    #[test]
    fn surface_acceleration_points_inward() {
        let gravity = PolyhedronGravity::new(icosphere(1.0, 2)).unwrap();
        for sample in evaluate_sites(&gravity, &EvaluationSites::Vertices) {
            assert!(sample.acceleration.dot(&sample.position.coords) < 0.0);
            assert!(sample.potential.is_finite());
        }
    }
}
