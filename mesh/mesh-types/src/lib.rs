//! Plate model types for polyhedral shape models.
//!
//! This crate provides the shape-model layer consumed by the gravity kernel:
//!
//! - [`PlateModel`] - The vertex/face interface a closed shape model exposes
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`unit_tetrahedron`], [`unit_cube`], [`icosphere`] - Closed reference solids
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies** and no file I/O.
//! Shape model loading lives in the surrounding tooling.
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Winding
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//! Normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{unit_tetrahedron, PlateModel};
//!
//! let tetra = unit_tetrahedron();
//! assert_eq!(tetra.vertex_count(), 4);
//! assert_eq!(tetra.face_count(), 4);
//! assert!((tetra.volume() - 1.0 / 6.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod mesh;
mod primitives;
mod traits;

pub use mesh::IndexedMesh;
pub use primitives::{icosphere, unit_cube, unit_tetrahedron};
pub use traits::PlateModel;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
