//! The shape model interface.

use nalgebra::{Point3, Vector3};

/// Read-only view of a closed triangular shape model.
///
/// This is the minimal interface polyhedral algorithms need: vertex
/// positions by index, faces as vertex index triples, and outward unit
/// normals per face. Implementations own the vertex storage; consumers
/// only read it.
///
/// Indices passed to the lookup methods must be below [`vertex_count`]
/// or [`face_count`]. Implementations may panic otherwise.
///
/// [`vertex_count`]: PlateModel::vertex_count
/// [`face_count`]: PlateModel::face_count
pub trait PlateModel {
    /// Get the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Get the number of faces (plates).
    fn face_count(&self) -> usize;

    /// Get the position of a vertex.
    fn vertex_position(&self, vertex: usize) -> Point3<f64>;

    /// Get the vertex indices of a face, in outward (CCW) winding order.
    fn face_vertex_ids(&self, face: usize) -> [u32; 3];

    /// Get the outward unit normal of a face.
    fn face_normal(&self, face: usize) -> Vector3<f64>;

    /// Check if the model has no vertices or no faces.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Get the centroid of a face.
    fn face_center(&self, face: usize) -> Point3<f64> {
        let [a, b, c] = self.face_vertex_ids(face);
        let (a, b, c) = (
            self.vertex_position(a as usize),
            self.vertex_position(b as usize),
            self.vertex_position(c as usize),
        );
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Get the area of a face.
    fn face_area(&self, face: usize) -> f64 {
        let [a, b, c] = self.face_vertex_ids(face);
        let a = self.vertex_position(a as usize);
        let b = self.vertex_position(b as usize);
        let c = self.vertex_position(c as usize);
        (b - a).cross(&(c - a)).norm() * 0.5
    }
}
