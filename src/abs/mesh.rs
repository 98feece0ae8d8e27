//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing static mesh data on the GPU side.
//! Vertices should implement the [`Vertex`] trait.

use std::sync::Arc;

use glow::HasContext;

/// Trait that defines the necessary methods for a vertex.
pub trait Vertex: bytemuck::Pod {
    /// Sets up the vertex attribute pointers for the vertex.
    fn vertex_attribs(gl: &glow::Context);
}

/// Represents a mesh stored on the GPU side.
pub struct Mesh {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: glow::Buffer,
    index_count: usize,
}

impl Mesh {
    /// Uploads the given vertex and index data once into GPU buffers.
    pub fn new<V: Vertex>(
        gl: &Arc<glow::Context>,
        vertices: &[V],
        indices: &[u32],
        draw_mode: u32,
    ) -> Result<Self, String> {
        unsafe {
            let vao = gl.create_vertex_array()?;
            let vbo = gl.create_buffer()?;
            let ebo = gl.create_buffer()?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STATIC_DRAW,
            );

            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::STATIC_DRAW,
            );

            V::vertex_attribs(gl);

            // The element buffer binding is VAO state, so only unbind it after the VAO.
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            log::debug!(
                "Uploaded mesh with {} vertices and {} indices",
                vertices.len(),
                indices.len()
            );

            Ok(Self {
                gl: Arc::clone(gl),
                draw_mode,
                vao,
                vbo,
                ebo,
                index_count: indices.len(),
            })
        }
    }

    /// Binds the mesh's vertex array for a sequence of [`Mesh::draw_range`] calls.
    pub fn bind(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
        }
    }

    /// Unbinds any vertex array.
    pub fn unbind(&self) {
        unsafe {
            self.gl.bind_vertex_array(None);
        }
    }

    /// Draws `count` indices starting at `first_index`. The mesh must be bound.
    ///
    /// Ranges reaching past the end of the index buffer are refused.
    pub fn draw_range(&self, first_index: usize, count: usize) {
        if !range_in_bounds(first_index, count, self.index_count) {
            log::error!(
                "Refusing to draw indices {first_index}..{} of a mesh with {} indices",
                first_index + count,
                self.index_count
            );
            return;
        }

        unsafe {
            self.gl.draw_elements(
                self.draw_mode,
                count as i32,
                glow::UNSIGNED_INT,
                (first_index * size_of::<u32>()) as i32,
            );
        }
    }

    // Returns the amount of of indices used in the mesh
    pub fn index_count(&self) -> usize {
        self.index_count
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_buffer(self.ebo);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}

/// Whether `first..first + count` lies inside an index buffer of `len` entries.
pub fn range_in_bounds(first: usize, count: usize, len: usize) -> bool {
    first
        .checked_add(count)
        .is_some_and(|end| count > 0 && end <= len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_in_bounds() {
        assert!(range_in_bounds(0, 3, 18));
        assert!(range_in_bounds(12, 6, 18));
        assert!(!range_in_bounds(15, 6, 18));
        assert!(!range_in_bounds(18, 0, 18));
        assert!(!range_in_bounds(usize::MAX, 2, 18));
    }
}
