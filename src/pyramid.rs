//! Static pyramid geometry.
//!
//! Every face owns its own vertices so each one can be textured independently; the base quad is
//! split into two triangles.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::abs::Vertex;

#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PyramidVertex {
    pub position: Vec3,
    pub tex_coord: Vec2,
}

impl PyramidVertex {
    const fn new(position: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position: Vec3::from_array(position),
            tex_coord: Vec2::from_array(tex_coord),
        }
    }
}

impl Vertex for PyramidVertex {
    fn vertex_attribs(gl: &glow::Context) {
        use glow::HasContext;

        unsafe {
            let stride = size_of::<PyramidVertex>() as i32;

            // Position attribute
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);

            // Texture coordinate attribute
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(
                1,
                2,
                glow::FLOAT,
                false,
                stride,
                std::mem::offset_of!(PyramidVertex, tex_coord) as i32,
            );
        }
    }
}

const APEX: [f32; 3] = [0.0, 0.5, 0.0];

#[rustfmt::skip]
pub const VERTICES: [PyramidVertex; 16] = [
    // Front
    PyramidVertex::new([-0.5, -0.5,  0.5], [0.0, 0.0]),
    PyramidVertex::new([ 0.5, -0.5,  0.5], [1.0, 0.0]),
    PyramidVertex::new(APEX,               [0.5, 1.0]),
    // Right
    PyramidVertex::new([ 0.5, -0.5,  0.5], [0.0, 0.0]),
    PyramidVertex::new([ 0.5, -0.5, -0.5], [1.0, 0.0]),
    PyramidVertex::new(APEX,               [0.5, 1.0]),
    // Back
    PyramidVertex::new([ 0.5, -0.5, -0.5], [0.0, 0.0]),
    PyramidVertex::new([-0.5, -0.5, -0.5], [1.0, 0.0]),
    PyramidVertex::new(APEX,               [0.5, 1.0]),
    // Left
    PyramidVertex::new([-0.5, -0.5, -0.5], [0.0, 0.0]),
    PyramidVertex::new([-0.5, -0.5,  0.5], [1.0, 0.0]),
    PyramidVertex::new(APEX,               [0.5, 1.0]),
    // Base
    PyramidVertex::new([-0.5, -0.5, -0.5], [0.0, 0.0]),
    PyramidVertex::new([-0.5, -0.5,  0.5], [1.0, 0.0]),
    PyramidVertex::new([ 0.5, -0.5,  0.5], [1.0, 1.0]),
    PyramidVertex::new([ 0.5, -0.5, -0.5], [0.0, 1.0]),
];

#[rustfmt::skip]
pub const INDICES: [u32; 18] = [
    0, 1, 2,
    3, 4, 5,
    6, 7, 8,
    9, 10, 11,
    12, 13, 14,
    14, 15, 12,
];

/// A contiguous run of [`INDICES`] drawn with one texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub name: &'static str,
    pub first_index: usize,
    pub index_count: usize,
}

/// The faces in draw order. Face `i` samples texture unit `i`.
#[rustfmt::skip]
pub const FACES: [Face; 5] = [
    Face { name: "front", first_index: 0, index_count: 3 },
    Face { name: "right", first_index: 3, index_count: 3 },
    Face { name: "back", first_index: 6, index_count: 3 },
    Face { name: "left", first_index: 9, index_count: 3 },
    Face { name: "base", first_index: 12, index_count: 6 },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abs::range_in_bounds;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(size_of::<PyramidVertex>(), 5 * size_of::<f32>());
        assert_eq!(std::mem::offset_of!(PyramidVertex, position), 0);
        assert_eq!(
            std::mem::offset_of!(PyramidVertex, tex_coord),
            3 * size_of::<f32>()
        );
        assert_eq!(bytemuck::cast_slice::<_, f32>(&VERTICES[..]).len(), 16 * 5);
    }

    #[test]
    fn test_face_ranges_in_bounds() {
        for face in FACES {
            assert!(
                range_in_bounds(face.first_index, face.index_count, INDICES.len()),
                "{} face out of bounds",
                face.name
            );
        }
        assert!(INDICES.iter().all(|&i| (i as usize) < VERTICES.len()));
    }

    #[test]
    fn test_faces_cover_indices_exactly() {
        let mut next = 0;
        for face in FACES {
            assert_eq!(face.first_index, next);
            next += face.index_count;
        }
        assert_eq!(next, INDICES.len());
    }

    #[test]
    fn test_only_base_is_a_quad() {
        let quads: Vec<_> = FACES.iter().filter(|f| f.index_count == 6).collect();
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].name, "base");
        assert!(
            FACES
                .iter()
                .filter(|f| f.name != "base")
                .all(|f| f.index_count == 3)
        );
    }

    #[test]
    fn test_faces_use_only_their_own_vertices() {
        for (a, face_a) in FACES.iter().enumerate() {
            let range = face_a.first_index..face_a.first_index + face_a.index_count;
            for face_b in FACES.iter().skip(a + 1) {
                let other = face_b.first_index..face_b.first_index + face_b.index_count;
                for i in &INDICES[range.clone()] {
                    assert!(!INDICES[other.clone()].contains(i));
                }
            }
        }
    }

    #[test]
    fn test_side_faces_meet_at_apex() {
        for face in &FACES[..4] {
            let apex = VERTICES[INDICES[face.first_index + 2] as usize];
            assert_eq!(apex.position, Vec3::from_array(APEX));
            assert_eq!(apex.tex_coord, Vec2::new(0.5, 1.0));
        }
    }
}
