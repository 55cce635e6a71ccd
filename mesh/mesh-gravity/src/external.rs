//! Tidal perturbation from an external point mass.

use nalgebra::{Point3, Vector3};
use tracing::info;

use crate::batch::GravitySample;

/// Add the tidal field of an external point mass to self-gravity samples.
///
/// Samples are expressed in the body-fixed frame with the body's center of
/// mass at the origin, and must already be in physical units. `gm` is the
/// perturber's gravitational parameter and `body_position` its location, in
/// the same units as the samples.
///
/// The perturber's potential and acceleration at the origin are subtracted,
/// leaving the tidal (differential) part:
///
/// - potential: `U + (-GM/d) - (-GM/R)`
/// - acceleration: `g + a(p) - a(0)` with `a(x) = GM (b - x) / |b - x|³`
///
/// where `d = |p - b|` and `R = |b|`.
///
/// # Example
///
/// ```
/// use mesh_gravity::{add_external_body, GravitySample};
/// use nalgebra::{Point3, Vector3};
///
/// let at_origin = GravitySample {
///     index: 0,
///     position: Point3::origin(),
///     potential: -1.0,
///     acceleration: Vector3::zeros(),
/// };
/// let perturbed = add_external_body(&[at_origin], 10.0, &Point3::new(100.0, 0.0, 0.0));
///
/// // No tidal effect at the origin itself.
/// assert!((perturbed[0].potential + 1.0).abs() < 1e-12);
/// assert!(perturbed[0].acceleration.norm() < 1e-12);
/// ```
#[must_use]
pub fn add_external_body(
    samples: &[GravitySample],
    gm: f64,
    body_position: &Point3<f64>,
) -> Vec<GravitySample> {
    let range = body_position.coords.norm();

    info!(
        gm,
        x = body_position.x,
        y = body_position.y,
        z = body_position.z,
        range,
        samples = samples.len(),
        "Adding contribution from external body"
    );

    let origin_potential = -gm / range;
    let origin_acceleration = point_mass_acceleration(gm, body_position, &Point3::origin());

    samples
        .iter()
        .map(|sample| {
            let distance = (sample.position - body_position).norm();
            let potential = sample.potential - gm / distance - origin_potential;
            let acceleration = sample.acceleration
                + point_mass_acceleration(gm, body_position, &sample.position)
                - origin_acceleration;

            GravitySample {
                potential,
                acceleration,
                ..*sample
            }
        })
        .collect()
}

/// Acceleration at `at` toward a point mass at `body`.
fn point_mass_acceleration(gm: f64, body: &Point3<f64>, at: &Point3<f64>) -> Vector3<f64> {
    let to_body = body - at;
    let distance = to_body.norm();
    to_body * (gm / (distance * distance * distance))
}
