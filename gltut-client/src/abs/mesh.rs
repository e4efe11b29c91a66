//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing mesh data on the GPU side.
//! Vertices should implement the [`Vertex`] trait, which wires their fields to the attributes of
//! a [`ShaderProgram`] by name.

use std::sync::Arc;

use glow::HasContext;
use gltut_core::{ShaderError, ShaderProgram};

use crate::error::AppError;

/// Trait that defines the necessary methods for a vertex.
pub trait Vertex: Copy {
    /// Sets up the vertex attribute pointers of the bound vertex array for `program`.
    fn vertex_attribs(gl: &glow::Context, program: &ShaderProgram) -> Result<(), ShaderError>;
}

/// Views a slice of plain `#[repr(C)]` data as bytes for uploading.
pub fn as_bytes<T: Copy>(data: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, std::mem::size_of_val(data)) }
}

/// Enables the named attribute and points it at `components` floats starting `offset` bytes
/// into each vertex.
pub fn float_attrib(
    gl: &glow::Context,
    program: &ShaderProgram,
    name: &str,
    components: i32,
    stride: usize,
    offset: usize,
) -> Result<(), ShaderError> {
    let location = program.attrib_location(name)?;
    unsafe {
        gl.enable_vertex_attrib_array(location);
        gl.vertex_attrib_pointer_f32(
            location,
            components,
            glow::FLOAT,
            false,
            stride as i32,
            offset as i32,
        );
    }
    Ok(())
}

/// Deletes a GL object when dropped, unless it was [released](GpuGuard::release) to its
/// long-lived owner first.
pub struct GpuGuard<T: Copy, F: FnMut(T)> {
    object: T,
    delete: F,
    armed: bool,
}

impl<T: Copy, F: FnMut(T)> GpuGuard<T, F> {
    pub fn new(object: T, delete: F) -> Self {
        Self {
            object,
            delete,
            armed: true,
        }
    }

    pub fn get(&self) -> T {
        self.object
    }

    pub fn release(mut self) -> T {
        self.armed = false;
        self.object
    }
}

impl<T: Copy, F: FnMut(T)> Drop for GpuGuard<T, F> {
    fn drop(&mut self) {
        if self.armed {
            (self.delete)(self.object);
        }
    }
}

/// Creates a buffer bound to `target` and fills it with `data`.
pub fn create_buffer<T: Copy>(
    gl: &glow::Context,
    target: u32,
    data: &[T],
) -> Result<glow::Buffer, AppError> {
    unsafe {
        let buffer = gl.create_buffer().map_err(AppError::Gpu)?;
        gl.bind_buffer(target, Some(buffer));
        gl.buffer_data_u8_slice(target, as_bytes(data), glow::STATIC_DRAW);
        Ok(buffer)
    }
}

/// Represents a mesh stored on the GPU side.
pub struct Mesh {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: Option<glow::Buffer>,
    count: usize,
}

impl Mesh {
    /// Creates an indexed mesh drawn with `draw_elements`.
    pub fn new<V: Vertex>(
        gl: &Arc<glow::Context>,
        program: &ShaderProgram,
        vertices: &[V],
        indices: &[u32],
        draw_mode: u32,
    ) -> Result<Self, AppError> {
        Self::build(gl, program, vertices, Some(indices), draw_mode)
    }

    /// Creates a mesh without an element buffer, drawn with `draw_arrays`.
    pub fn new_unindexed<V: Vertex>(
        gl: &Arc<glow::Context>,
        program: &ShaderProgram,
        vertices: &[V],
        draw_mode: u32,
    ) -> Result<Self, AppError> {
        Self::build(gl, program, vertices, None, draw_mode)
    }

    fn build<V: Vertex>(
        gl: &Arc<glow::Context>,
        program: &ShaderProgram,
        vertices: &[V],
        indices: Option<&[u32]>,
        draw_mode: u32,
    ) -> Result<Self, AppError> {
        unsafe {
            let vao = gl.create_vertex_array().map_err(AppError::Gpu)?;
            let vao = GpuGuard::new(vao, |vao| gl.delete_vertex_array(vao));
            gl.bind_vertex_array(Some(vao.get()));

            let delete_buffer = |buffer: glow::Buffer| gl.delete_buffer(buffer);
            let vbo = create_buffer(gl, glow::ARRAY_BUFFER, vertices)?;
            let vbo = GpuGuard::new(vbo, delete_buffer);
            let ebo = indices
                .map(|indices| create_buffer(gl, glow::ELEMENT_ARRAY_BUFFER, indices))
                .transpose()?
                .map(|ebo| GpuGuard::new(ebo, delete_buffer));

            // The mesh owns its GPU objects from here on, so a failed attribute lookup
            // releases them through `Drop`.
            let mesh = Self {
                gl: Arc::clone(gl),
                draw_mode,
                count: indices.map_or(vertices.len(), <[u32]>::len),
                ebo: ebo.map(GpuGuard::release),
                vbo: vbo.release(),
                vao: vao.release(),
            };

            let wired = V::vertex_attribs(gl, program);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            wired?;
            Ok(mesh)
        }
    }

    /// Draws the mesh with whatever program is current.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            if self.ebo.is_some() {
                self.gl
                    .draw_elements(self.draw_mode, self.count as i32, glow::UNSIGNED_INT, 0);
            } else {
                self.gl.draw_arrays(self.draw_mode, 0, self.count as i32);
            }
            self.gl.bind_vertex_array(None);
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            if let Some(ebo) = self.ebo {
                self.gl.delete_buffer(ebo);
            }
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn test_guard_deletes_unless_released() {
        let deleted = RefCell::new(Vec::new());
        let delete = |id: u32| deleted.borrow_mut().push(id);

        let kept = GpuGuard::new(1, delete);
        {
            let _dropped = GpuGuard::new(2, delete);
        }
        assert_eq!(kept.release(), 1);
        assert_eq!(*deleted.borrow(), vec![2]);
    }

    #[test]
    fn test_guard_cleans_up_on_early_return() {
        let deleted = RefCell::new(Vec::new());
        let delete = |id: u32| deleted.borrow_mut().push(id);

        // Mirrors a build step where the second allocation fails.
        let build = || -> Result<(u32, u32), String> {
            let first = GpuGuard::new(10, delete);
            let second = Err::<u32, _>("out of memory".to_string())?;
            Ok((first.release(), second))
        };

        assert!(build().is_err());
        assert_eq!(*deleted.borrow(), vec![10]);
    }

    #[test]
    fn test_as_bytes_covers_whole_slice() {
        let data = [1.0f32, 2.0, 3.0];
        let bytes = as_bytes(&data);
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[4..8], &2.0f32.to_ne_bytes());
    }
}
