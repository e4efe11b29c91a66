//! Linked shader programs.
//!
//! This module defines [`ShaderProgram`], a vertex + fragment program whose active uniform and
//! attribute locations are snapshotted once after linking. Setters and lookups go through that
//! snapshot, so a name the shader does not actually use is reported as an error instead of being
//! silently ignored.

use std::{marker::PhantomData, sync::Arc};

use fxhash::FxHashMap;

use crate::{
    driver::{ActiveVariable, Driver, ShaderStage},
    error::ShaderError,
    uniform::Uniform,
};

/// A compiled stage that only lives until the program is linked.
struct Stage<'a, D: Driver> {
    driver: &'a D,
    id: D::Shader,
}

impl<'a, D: Driver> Stage<'a, D> {
    fn compile(driver: &'a D, stage: ShaderStage, source: &str) -> Result<Self, ShaderError> {
        let id = driver
            .create_shader(stage)
            .map_err(ShaderError::ObjectCreation)?;

        if let Err(log) = driver.compile_shader(id, source) {
            driver.delete_shader(id);
            return Err(ShaderError::Compile { stage, log });
        }

        Ok(Self { driver, id })
    }
}

impl<D: Driver> Drop for Stage<'_, D> {
    fn drop(&mut self) {
        self.driver.delete_shader(self.id);
    }
}

/// Resolves a location for every active variable, skipping the ones the driver reports without
/// one.
fn snapshot<L>(
    kind: &str,
    variables: Vec<ActiveVariable>,
    mut resolve: impl FnMut(&str) -> Option<L>,
) -> FxHashMap<String, L>
where
    L: std::fmt::Debug,
{
    log::debug!("Active {kind}s: {}", variables.len());

    let mut locations = FxHashMap::default();
    for (index, variable) in variables.into_iter().enumerate() {
        match resolve(&variable.name) {
            Some(location) => {
                log::debug!(
                    "{index} {}\t{location:?}\tsize {}\ttype {:#06x}",
                    variable.name,
                    variable.size,
                    variable.gl_type
                );
                locations.insert(variable.name, location);
            }
            None => log::debug!("{index} {}\thas no location, not cached", variable.name),
        }
    }
    locations
}

/// A linked GPU program with cached uniform and attribute locations.
///
/// The program is tied to the thread that owns the GL context, so it is neither `Send` nor
/// `Sync`. Dropping a program that was never [disposed](ShaderProgram::dispose) deletes it.
pub struct ShaderProgram<D: Driver = glow::Context> {
    driver: Arc<D>,
    handle: Option<D::Program>,
    uniform_locations: FxHashMap<String, D::UniformLocation>,
    attrib_locations: FxHashMap<String, u32>,
    _context_thread: PhantomData<*const ()>,
}

impl<D: Driver> ShaderProgram<D> {
    /// Compiles both stages, links them and snapshots the active variable locations.
    ///
    /// On error nothing created here is left alive on the driver.
    pub fn new(
        driver: &Arc<D>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let gl = driver.as_ref();
        let vertex = Stage::compile(gl, ShaderStage::Vertex, vertex_source)?;
        let fragment = Stage::compile(gl, ShaderStage::Fragment, fragment_source)?;

        let program = gl.create_program().map_err(ShaderError::ObjectCreation)?;
        let stages = [&vertex, &fragment];

        for stage in stages {
            gl.attach_shader(program, stage.id);
        }

        let linked = gl.link_program(program);

        for stage in stages {
            gl.detach_shader(program, stage.id);
        }

        if let Err(log) = linked {
            gl.delete_program(program);
            return Err(ShaderError::Link { log });
        }

        let attrib_locations = snapshot("attribute", gl.active_attributes(program), |name| {
            gl.attrib_location(program, name)
        });
        let uniform_locations = snapshot("uniform", gl.active_uniforms(program), |name| {
            gl.uniform_location(program, name)
        });

        Ok(Self {
            driver: Arc::clone(driver),
            handle: Some(program),
            uniform_locations,
            attrib_locations,
            _context_thread: PhantomData,
        })
    }

    fn live_handle(&self) -> Result<D::Program, ShaderError> {
        self.handle.ok_or(ShaderError::UseAfterDispose)
    }

    /// The driver handle, or `None` once disposed.
    pub fn handle(&self) -> Option<D::Program> {
        self.handle
    }

    pub fn is_disposed(&self) -> bool {
        self.handle.is_none()
    }

    /// Makes this program the current one for subsequent draw calls.
    pub fn use_program(&self) -> Result<(), ShaderError> {
        let handle = self.live_handle()?;
        self.driver.use_program(Some(handle));
        Ok(())
    }

    /// Returns the location of an active vertex attribute.
    ///
    /// Attributes the driver optimized out are not active and produce
    /// [`ShaderError::UnknownAttribute`].
    pub fn attrib_location(&self, name: &str) -> Result<u32, ShaderError> {
        self.live_handle()?;
        self.attrib_locations
            .get(name)
            .copied()
            .ok_or_else(|| ShaderError::UnknownAttribute(name.to_string()))
    }

    /// Sets a uniform variable in the shader program.
    ///
    /// The program is made current before the write, so callers do not have to call
    /// [`use_program`](Self::use_program) first. An unknown name makes no driver call at all.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) -> Result<(), ShaderError> {
        let handle = self.live_handle()?;
        let location = self
            .uniform_locations
            .get(name)
            .ok_or_else(|| ShaderError::UnknownUniform(name.to_string()))?;

        self.driver.use_program(Some(handle));
        self.driver.write_uniform(location, &value.uniform_value());
        Ok(())
    }

    /// Connects the named attribute of the currently bound vertex array to vertex-buffer binding
    /// slot `slot` (separate attribute format, OpenGL 4.3+).
    pub fn bind_attrib_to_vertex_buffer_slot(
        &self,
        name: &str,
        slot: u32,
    ) -> Result<(), ShaderError> {
        let handle = self.live_handle()?;
        let location = self.attrib_location(name)?;

        self.driver.use_program(Some(handle));
        self.driver.vertex_attrib_binding(location, slot);
        Ok(())
    }

    /// Releases the program. Every later call, including a second `dispose`, fails with
    /// [`ShaderError::UseAfterDispose`].
    pub fn dispose(&mut self) -> Result<(), ShaderError> {
        let handle = self.handle.take().ok_or(ShaderError::UseAfterDispose)?;
        self.driver.delete_program(handle);
        Ok(())
    }

    pub fn has_uniform(&self, name: &str) -> bool {
        self.uniform_locations.contains_key(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attrib_locations.contains_key(name)
    }

    pub fn uniform_names(&self) -> impl Iterator<Item = &str> {
        self.uniform_locations.keys().map(String::as_str)
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attrib_locations.keys().map(String::as_str)
    }
}

impl<D: Driver> Drop for ShaderProgram<D> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.driver.delete_program(handle);
        }
    }
}
