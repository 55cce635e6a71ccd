//! Polyhedral gravity for closed triangle meshes.
//!
//! This crate evaluates the gravitational potential and acceleration of a
//! uniform-density body bounded by a closed triangular mesh, using the exact
//! polyhedral method of Werner and Scheeres. The same per-face solid angle
//! also answers point-in-polyhedron queries.
//!
//! # Algorithm
//!
//! 1. [`Topology`] is built once per mesh. Every undirected edge gets a
//!    combined 3×3 dyad from its two adjacent faces, and every face gets the
//!    dyad `n ⊗ n` of its outward normal.
//! 2. For each field point, the displacement from the point to every vertex
//!    is cached, then the edge log terms and face solid angles are summed.
//!
//! Results are dimensionless geometric kernels: multiply by `G * density`
//! to get physical units.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies** and no I/O.
//!
//! # Preconditions
//!
//! The mesh must be closed, 2-manifold, and consistently wound with outward
//! normals. This is not validated; a malformed mesh produces wrong numbers,
//! never a panic.
//!
//! # Example
//!
//! ```
//! use mesh_gravity::PolyhedronGravity;
//! use mesh_types::{unit_tetrahedron, Point3};
//!
//! let gravity = PolyhedronGravity::new(unit_tetrahedron()).unwrap();
//!
//! // Far away the body looks like a point mass of volume 1/6.
//! let r = 1000.0;
//! let u = gravity.potential(&Point3::new(0.25 + r, 0.25, 0.25));
//! assert!((u + 1.0 / 6.0 / r).abs() / (1.0 / 6.0 / r) < 1e-3);
//!
//! assert!(gravity.is_inside(&Point3::new(0.25, 0.25, 0.25)));
//! ```
//!
//! # Concurrency
//!
//! [`Topology`] and [`PolyhedronGravity`] are immutable and `Sync`. Per-query
//! state lives in a [`DisplacementCache`] owned by the caller, so any number
//! of threads can evaluate against one topology. [`evaluate_sites`] does this
//! with rayon.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod batch;
mod error;
mod external;
mod field;
mod gravity;
mod params;
mod topology;

pub use batch::{EvaluationSites, GravitySample, evaluate_sites};
pub use error::{GravityError, GravityResult};
pub use external::add_external_body;
pub use field::{
    CONTAINMENT_THRESHOLD, Displacement, DisplacementCache, FieldSample, evaluate,
    evaluate_with_cache, is_inside, is_inside_with_cache, solid_angle_sum,
    solid_angle_sum_with_cache,
};
pub use gravity::PolyhedronGravity;
pub use params::GravityParams;
pub use topology::{EdgeDyad, FaceDyad, Topology, build_topology};
