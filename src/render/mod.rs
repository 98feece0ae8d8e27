//! Module for anything related to rendering.
//!
//! The [`PyramidRenderer`] owns every GPU object the viewer uses and draws one frame at a time.

use std::{path::PathBuf, sync::Arc};

use glow::HasContext;

use crate::{
    abs::{Mesh, Shader, ShaderProgram, Texture},
    error::AppError,
    input::Rotation,
    pyramid::{FACES, INDICES, VERTICES},
    transform::FrameTransforms,
};

/// Uniform locations of the pyramid shader, looked up once after linking.
struct PyramidUniforms {
    model: glow::UniformLocation,
    view: glow::UniformLocation,
    projection: glow::UniformLocation,
    texture: glow::UniformLocation,
}

impl PyramidUniforms {
    fn locate(program: &ShaderProgram) -> Result<Self, String> {
        Ok(Self {
            model: program.uniform_location("u_model")?,
            view: program.uniform_location("u_view")?,
            projection: program.uniform_location("u_projection")?,
            texture: program.uniform_location("u_texture")?,
        })
    }
}

fn pyramid_program(gl: &Arc<glow::Context>) -> Result<ShaderProgram, String> {
    let vert = Shader::new(
        gl,
        glow::VERTEX_SHADER,
        include_str!("shaders/pyramid/vert.glsl"),
    )?;
    let frag = Shader::new(
        gl,
        glow::FRAGMENT_SHADER,
        include_str!("shaders/pyramid/frag.glsl"),
    )?;
    ShaderProgram::new(gl, &[&vert, &frag])
}

/// Draws the textured pyramid.
pub struct PyramidRenderer {
    gl: Arc<glow::Context>,
    program: ShaderProgram,
    uniforms: PyramidUniforms,
    mesh: Mesh,
    /// One slot per face. `None` when the face's image could not be loaded.
    textures: Vec<Option<Texture>>,
    clear_color: [f32; 4],
}

impl PyramidRenderer {
    /// Builds the shader, uploads the geometry and loads one texture per face.
    ///
    /// Shader and geometry failures are fatal. Texture failures are logged and leave the face
    /// without a texture.
    pub fn new(
        gl: &Arc<glow::Context>,
        texture_paths: &[PathBuf],
        clear_color: [f32; 4],
    ) -> Result<Self, AppError> {
        let program = pyramid_program(gl).map_err(AppError::Shader)?;
        let uniforms = PyramidUniforms::locate(&program).map_err(AppError::Shader)?;
        log::debug!("Linked pyramid shader program");

        let mesh = Mesh::new(gl, &VERTICES, &INDICES, glow::TRIANGLES).map_err(AppError::Mesh)?;

        if texture_paths.len() != FACES.len() {
            log::warn!(
                "Expected {} texture paths, got {}",
                FACES.len(),
                texture_paths.len()
            );
        }
        let textures = FACES
            .iter()
            .enumerate()
            .map(|(i, face)| {
                let path = texture_paths.get(i)?;
                Texture::load(gl, path)
                    .inspect_err(|e| log::error!("No texture for the {} face: {e}", face.name))
                    .ok()
            })
            .collect();

        unsafe {
            gl.enable(glow::DEPTH_TEST);
        }

        Ok(Self {
            gl: Arc::clone(gl),
            program,
            uniforms,
            mesh,
            textures,
            clear_color,
        })
    }

    /// Renders one frame with the given rotation. Does not present it.
    pub fn render(&self, rotation: &Rotation, aspect_ratio: f32) {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let transforms = FrameTransforms::new(rotation, aspect_ratio);

        self.program.use_program();
        self.program.set_uniform(&self.uniforms.model, transforms.model);
        self.program.set_uniform(&self.uniforms.view, transforms.view);
        self.program
            .set_uniform(&self.uniforms.projection, transforms.projection);

        self.mesh.bind();
        for (unit, face) in FACES.iter().enumerate() {
            match &self.textures[unit] {
                Some(texture) => texture.bind(unit as u32),
                None => Texture::unbind(&self.gl, unit as u32),
            }
            self.program.set_uniform(&self.uniforms.texture, unit as i32);
            self.mesh.draw_range(face.first_index, face.index_count);
        }
        self.mesh.unbind();
    }
}

impl Drop for PyramidRenderer {
    fn drop(&mut self) {
        log::info!(
            "Releasing shader program, mesh ({} indices) and {} textures",
            self.mesh.index_count(),
            self.textures.iter().flatten().count()
        );
    }
}
