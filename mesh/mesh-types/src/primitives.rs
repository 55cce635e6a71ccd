//! Closed reference solids.
//!
//! All primitives are closed 2-manifolds with outward (CCW) winding.

use crate::IndexedMesh;
use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};

/// The corner tetrahedron with vertices at the origin and the three unit
/// axis points. Volume is `1/6`.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_tetrahedron, PlateModel};
///
/// let tetra = unit_tetrahedron();
/// assert_eq!(tetra.face_count(), 4);
/// ```
#[must_use]
pub fn unit_tetrahedron() -> IndexedMesh {
    IndexedMesh::from_parts(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ],
        vec![
            [0, 2, 1], // z = 0, normal -Z
            [0, 1, 3], // y = 0, normal -Y
            [0, 3, 2], // x = 0, normal -X
            [1, 2, 3], // slanted, normal (1,1,1)/sqrt(3)
        ],
    )
}

/// Cube from (0,0,0) to (1,1,1), two triangles per side.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, PlateModel};
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 12);
/// ```
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    let mut mesh = IndexedMesh::with_capacity(8, 12);

    mesh.vertices.push(Point3::new(0.0, 0.0, 0.0)); // 0
    mesh.vertices.push(Point3::new(1.0, 0.0, 0.0)); // 1
    mesh.vertices.push(Point3::new(1.0, 1.0, 0.0)); // 2
    mesh.vertices.push(Point3::new(0.0, 1.0, 0.0)); // 3
    mesh.vertices.push(Point3::new(0.0, 0.0, 1.0)); // 4
    mesh.vertices.push(Point3::new(1.0, 0.0, 1.0)); // 5
    mesh.vertices.push(Point3::new(1.0, 1.0, 1.0)); // 6
    mesh.vertices.push(Point3::new(0.0, 1.0, 1.0)); // 7

    // Bottom (z=0), -Z
    mesh.faces.push([0, 2, 1]);
    mesh.faces.push([0, 3, 2]);
    // Top (z=1), +Z
    mesh.faces.push([4, 5, 6]);
    mesh.faces.push([4, 6, 7]);
    // Front (y=0), -Y
    mesh.faces.push([0, 1, 5]);
    mesh.faces.push([0, 5, 4]);
    // Back (y=1), +Y
    mesh.faces.push([3, 7, 6]);
    mesh.faces.push([3, 6, 2]);
    // Left (x=0), -X
    mesh.faces.push([0, 4, 7]);
    mesh.faces.push([0, 7, 3]);
    // Right (x=1), +X
    mesh.faces.push([1, 2, 6]);
    mesh.faces.push([1, 6, 5]);

    mesh
}

/// Geodesic sphere centered at the origin.
///
/// Starts from an icosahedron (20 faces) and splits every face into four
/// `subdivisions` times, projecting new vertices onto the sphere. The
/// result has `20 * 4^subdivisions` faces.
///
/// # Example
///
/// ```
/// use mesh_types::{icosphere, PlateModel};
///
/// let sphere = icosphere(1.0, 1);
/// assert_eq!(sphere.face_count(), 80);
/// assert!(sphere.signed_volume() > 0.0);
/// ```
#[must_use]
pub fn icosphere(radius: f64, subdivisions: u32) -> IndexedMesh {
    let phi = f64::midpoint(1.0, 5.0_f64.sqrt());
    let a = 1.0;
    let b = 1.0 / phi;

    let ico_verts = [
        [0.0, b, -a],
        [b, a, 0.0],
        [-b, a, 0.0],
        [0.0, b, a],
        [0.0, -b, a],
        [-a, 0.0, b],
        [0.0, -b, -a],
        [a, 0.0, -b],
        [a, 0.0, b],
        [-a, 0.0, -b],
        [b, -a, 0.0],
        [-b, -a, 0.0],
    ];

    let ico_faces: [[u32; 3]; 20] = [
        [0, 2, 1],
        [3, 1, 2],
        [3, 5, 4],
        [3, 4, 8],
        [0, 7, 6],
        [0, 6, 9],
        [4, 11, 10],
        [6, 10, 11],
        [2, 9, 5],
        [11, 5, 9],
        [1, 8, 7],
        [10, 7, 8],
        [3, 2, 5],
        [3, 8, 1],
        [0, 9, 2],
        [0, 1, 7],
        [6, 11, 9],
        [6, 7, 10],
        [4, 5, 11],
        [4, 10, 8],
    ];

    let mut mesh = IndexedMesh::with_capacity(12, 20);
    for [x, y, z] in ico_verts {
        mesh.vertices
            .push(Point3::from(Vector3::new(x, y, z).normalize()));
    }
    mesh.faces.extend_from_slice(&ico_faces);

    for _ in 0..subdivisions {
        mesh = subdivide_sphere(&mesh);
    }

    mesh.scale(radius);
    mesh
}

fn subdivide_sphere(mesh: &IndexedMesh) -> IndexedMesh {
    let mut new_mesh = IndexedMesh::with_capacity(mesh.vertices.len() * 4, mesh.faces.len() * 4);
    new_mesh.vertices.clone_from(&mesh.vertices);

    let mut edge_midpoints: HashMap<(u32, u32), u32> = HashMap::new();

    for &[v0, v1, v2] in &mesh.faces {
        let m01 = midpoint_index(v0, v1, &mut new_mesh.vertices, &mut edge_midpoints);
        let m12 = midpoint_index(v1, v2, &mut new_mesh.vertices, &mut edge_midpoints);
        let m20 = midpoint_index(v2, v0, &mut new_mesh.vertices, &mut edge_midpoints);

        new_mesh.faces.push([v0, m01, m20]);
        new_mesh.faces.push([v1, m12, m01]);
        new_mesh.faces.push([v2, m20, m12]);
        new_mesh.faces.push([m01, m12, m20]);
    }

    new_mesh
}

#[allow(clippy::cast_possible_truncation)]
fn midpoint_index(
    a: u32,
    b: u32,
    vertices: &mut Vec<Point3<f64>>,
    edge_midpoints: &mut HashMap<(u32, u32), u32>,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };

    if let Some(&idx) = edge_midpoints.get(&key) {
        return idx;
    }

    let mid = (vertices[a as usize].coords + vertices[b as usize].coords) * 0.5;
    let idx = vertices.len() as u32;
    vertices.push(Point3::from(mid.normalize()));
    edge_midpoints.insert(key, idx);
    idx
}
