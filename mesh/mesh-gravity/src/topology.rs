//! Per-edge and per-face dyads of a closed plate model.
//!
//! The dyads depend only on mesh connectivity and geometry, so they are
//! computed once and reused for every field point.

// Mesh processing uses u32 indices; casts are safe for practical mesh sizes.
#![allow(clippy::cast_possible_truncation)]

use hashbrown::HashMap;
use mesh_types::PlateModel;
use nalgebra::Matrix3;
use tracing::{debug, info, warn};

use crate::error::{GravityError, GravityResult};
use crate::params::GravityParams;

/// An undirected edge with its combined dyad.
///
/// Endpoints are stored in canonical order (`v0 < v1`). The dyad is the sum
/// of `outer(n_face, n_edge)` from both adjacent faces, where `n_edge` is the
/// in-plane edge normal computed with each face's own traversal direction.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeDyad {
    /// Canonical endpoints, smaller index first.
    pub vertices: (u32, u32),
    /// Combined edge dyad `E`.
    pub dyad: Matrix3<f64>,
    /// Distance between the two endpoints.
    pub length: f64,
}

/// A face with its normal dyad `F = outer(n, n)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceDyad {
    /// Vertex indices in the mesh's winding order.
    pub vertices: [u32; 3],
    /// Face dyad `F`.
    pub dyad: Matrix3<f64>,
}

/// Immutable edge and face dyads of a closed plate model.
///
/// Built once per mesh and shared by any number of evaluations, from any
/// number of threads.
///
/// # Example
///
/// ```
/// use mesh_gravity::Topology;
/// use mesh_types::unit_cube;
///
/// let topology = Topology::build(&unit_cube()).unwrap();
/// assert_eq!(topology.faces().len(), 12);
/// assert_eq!(topology.edges().len(), 18);
/// ```
#[derive(Debug, Clone)]
pub struct Topology {
    edges: Vec<EdgeDyad>,
    faces: Vec<FaceDyad>,
    vertex_count: usize,
    params: GravityParams,
}

impl Topology {
    /// Build the topology of a mesh with default tolerances.
    ///
    /// # Errors
    ///
    /// See [`Topology::build_with_params`].
    pub fn build<M: PlateModel + ?Sized>(mesh: &M) -> GravityResult<Self> {
        Self::build_with_params(mesh, &GravityParams::default())
    }

    /// Build the topology of a mesh.
    ///
    /// The mesh must be closed, 2-manifold and consistently oriented. That is
    /// not checked; a mesh that violates it yields a topology that evaluates
    /// to meaningless numbers. An edge count other than `3F/2` is logged.
    ///
    /// # Errors
    ///
    /// - [`GravityError::InvalidParams`] if the tolerances are invalid
    /// - [`GravityError::EmptyMesh`] if the mesh has no vertices or faces
    /// - [`GravityError::VertexOutOfBounds`] if a face references a missing vertex
    pub fn build_with_params<M: PlateModel + ?Sized>(
        mesh: &M,
        params: &GravityParams,
    ) -> GravityResult<Self> {
        params.validate()?;

        if mesh.is_empty() {
            return Err(GravityError::EmptyMesh);
        }

        let vertex_count = mesh.vertex_count();
        let face_count = mesh.face_count();

        info!(
            vertices = vertex_count,
            faces = face_count,
            "Building polyhedral gravity topology"
        );

        let mut edges: Vec<EdgeDyad> = Vec::with_capacity(face_count * 3 / 2);
        let mut edge_index: HashMap<(u32, u32), usize> = HashMap::with_capacity(face_count * 3 / 2);
        let mut faces = Vec::with_capacity(face_count);

        for face in 0..face_count {
            let ids = mesh.face_vertex_ids(face);
            if let Some(&vertex) = ids.iter().find(|&&v| v as usize >= vertex_count) {
                return Err(GravityError::VertexOutOfBounds {
                    face,
                    vertex,
                    vertex_count,
                });
            }

            let normal = mesh.face_normal(face);
            let [a, b, c] = ids;

            for (p1, p2) in [(a, b), (b, c), (c, a)] {
                // Direction follows this face's winding, never the key order.
                let along = mesh.vertex_position(p2 as usize) - mesh.vertex_position(p1 as usize);
                let length = along.norm();
                let unit = if length > 0.0 { along / length } else { along };
                let edge_normal = unit.cross(&normal);

                let key = canonical_edge(p1, p2);
                let slot = *edge_index.entry(key).or_insert_with(|| {
                    edges.push(EdgeDyad {
                        vertices: key,
                        dyad: Matrix3::zeros(),
                        length: 0.0,
                    });
                    edges.len() - 1
                });

                let edge = &mut edges[slot];
                edge.dyad += normal * edge_normal.transpose();
                edge.length = length;
            }

            faces.push(FaceDyad {
                vertices: ids,
                dyad: normal * normal.transpose(),
            });
        }

        let expected_edges = face_count * 3 / 2;
        if face_count % 2 != 0 || edges.len() != expected_edges {
            warn!(
                edges = edges.len(),
                expected = expected_edges,
                "Edge count does not match a closed manifold; results may be meaningless"
            );
        }

        debug!(edges = edges.len(), faces = faces.len(), "Topology built");

        Ok(Self {
            edges,
            faces,
            vertex_count,
            params: *params,
        })
    }

    /// Edge dyads in first-visit order.
    #[must_use]
    pub fn edges(&self) -> &[EdgeDyad] {
        &self.edges
    }

    /// Face dyads in mesh face order.
    #[must_use]
    pub fn faces(&self) -> &[FaceDyad] {
        &self.faces
    }

    /// Number of vertices of the mesh this topology was built from.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Tolerances used by evaluations against this topology.
    #[must_use]
    pub const fn params(&self) -> &GravityParams {
        &self.params
    }

    /// Look up an edge by its endpoints, in either order.
    #[must_use]
    pub fn edge(&self, a: u32, b: u32) -> Option<&EdgeDyad> {
        let key = canonical_edge(a, b);
        self.edges.iter().find(|e| e.vertices == key)
    }
}

/// Build a topology with default tolerances.
///
/// # Errors
///
/// See [`Topology::build_with_params`].
pub fn build_topology<M: PlateModel + ?Sized>(mesh: &M) -> GravityResult<Topology> {
    Topology::build(mesh)
}

#[inline]
const fn canonical_edge(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hashbrown::HashSet;
    use mesh_types::{IndexedMesh, Point3, icosphere, unit_cube, unit_tetrahedron};

    #[test]
    fn edge_count_is_three_halves_faces() {
        for mesh in [unit_tetrahedron(), unit_cube(), icosphere(1.0, 2)] {
            let topology = Topology::build(&mesh).unwrap();
            assert_eq!(topology.edges().len(), mesh.faces.len() * 3 / 2);
            assert_eq!(topology.faces().len(), mesh.faces.len());
        }
    }

    #[test]
    fn edge_keys_are_unique_and_canonical() {
        let topology = Topology::build(&icosphere(1.0, 1)).unwrap();
        let keys: HashSet<(u32, u32)> = topology.edges().iter().map(|e| e.vertices).collect();
        assert_eq!(keys.len(), topology.edges().len());
        assert!(topology.edges().iter().all(|e| e.vertices.0 < e.vertices.1));
    }

    #[test]
    fn edge_lengths_match_geometry() {
        let mesh = unit_tetrahedron();
        let topology = Topology::build(&mesh).unwrap();

        let edge = topology.edge(2, 1).unwrap();
        assert_eq!(edge.vertices, (1, 2));
        assert_relative_eq!(edge.length, 2.0_f64.sqrt(), epsilon = 1e-12);

        for edge in topology.edges() {
            let (a, b) = edge.vertices;
            let expected = (mesh.vertices[a as usize] - mesh.vertices[b as usize]).norm();
            assert_relative_eq!(edge.length, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn coplanar_faces_cancel_edge_dyad() {
        // Each cube side is split along a diagonal. Both triangles share a
        // normal and traverse the diagonal in opposite directions, so their
        // contributions cancel exactly.
        let topology = Topology::build(&unit_cube()).unwrap();
        let diagonals = [(0, 2), (4, 6), (0, 5), (3, 6), (0, 7), (1, 6)];
        for (a, b) in diagonals {
            let edge = topology.edge(a, b).unwrap();
            assert_relative_eq!(edge.dyad, Matrix3::zeros(), epsilon = 1e-12);
        }
    }

    #[test]
    fn cube_edge_dyad_combines_both_faces() {
        // Edge 0-1 joins the bottom (-Z) and front (-Y) sides. Outward edge
        // normals are -Y on the bottom and -Z on the front.
        let topology = Topology::build(&unit_cube()).unwrap();
        let edge = topology.edge(0, 1).unwrap();

        let mut expected = Matrix3::zeros();
        expected[(2, 1)] = 1.0; // (-Z) ⊗ (-Y)
        expected[(1, 2)] = 1.0; // (-Y) ⊗ (-Z)
        assert_relative_eq!(edge.dyad, expected, epsilon = 1e-12);
    }

    #[test]
    fn face_dyads_have_unit_trace() {
        let topology = Topology::build(&icosphere(2.0, 1)).unwrap();
        for face in topology.faces() {
            assert_relative_eq!(face.dyad.trace(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(face.dyad, face.dyad.transpose(), epsilon = 1e-15);
        }
    }

    #[test]
    fn face_order_is_preserved() {
        let mesh = unit_tetrahedron();
        let topology = Topology::build(&mesh).unwrap();
        for (face, dyad) in mesh.faces.iter().zip(topology.faces()) {
            assert_eq!(*face, dyad.vertices);
        }
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let err = Topology::build(&IndexedMesh::new()).unwrap_err();
        assert_eq!(err, GravityError::EmptyMesh);
    }

    #[test]
    fn out_of_range_vertex_is_rejected() {
        let mesh = IndexedMesh::from_parts(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
            vec![[0, 1, 2], [0, 2, 7]],
        );
        let err = Topology::build(&mesh).unwrap_err();
        assert_eq!(
            err,
            GravityError::VertexOutOfBounds {
                face: 1,
                vertex: 7,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn invalid_params_are_rejected() {
        let params = GravityParams::new().coplanar_tolerance(-1.0);
        let err = Topology::build_with_params(&unit_cube(), &params).unwrap_err();
        assert!(matches!(err, GravityError::InvalidParams(_)));
    }

    #[test]
    fn open_mesh_still_builds() {
        let mesh = IndexedMesh::from_parts(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
            vec![[0, 1, 2]],
        );
        let topology = Topology::build(&mesh).unwrap();
        assert_eq!(topology.edges().len(), 3);
    }
}
