//! A recording driver used by the unit tests.
//!
//! It understands just enough GLSL to behave like a real driver for the lesson shaders:
//! `in`/`out`/`uniform` declarations (with an optional `layout(location = N)`), unbalanced
//! braces or a missing `main` fail compilation, a fragment `in` without a matching vertex `out`
//! fails linking, and a variable only counts as active when its name is used outside its
//! declaration.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use crate::driver::{ActiveVariable, Driver, ShaderStage};
use crate::uniform::UniformValue;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    UseProgram(Option<u32>),
    WriteUniform(i32, UniformValue),
    VertexAttribBinding(u32, u32),
}

#[derive(Debug, Clone)]
struct Declaration {
    qualifier: String,
    ty: String,
    name: String,
    array: bool,
    location: Option<u32>,
}

#[derive(Debug, Default)]
struct ShaderObject {
    stage: Option<ShaderStage>,
    source: String,
    compiled: bool,
}

#[derive(Debug, Default)]
struct ProgramObject {
    attached: BTreeSet<u32>,
    uniforms: Vec<(ActiveVariable, Option<i32>)>,
    attributes: Vec<(ActiveVariable, Option<u32>)>,
}

#[derive(Default)]
pub struct FakeDriver {
    next_id: Cell<u32>,
    shaders: RefCell<BTreeMap<u32, ShaderObject>>,
    programs: RefCell<BTreeMap<u32, ProgramObject>>,
    current_program: Cell<Option<u32>>,
    uniform_values: RefCell<BTreeMap<(u32, i32), UniformValue>>,
    attrib_bindings: RefCell<BTreeMap<u32, u32>>,
    calls: RefCell<Vec<Call>>,
    pub refuse_programs: Cell<bool>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            ..Default::default()
        }
    }

    pub fn live_programs(&self) -> usize {
        self.programs.borrow().len()
    }

    pub fn live_shaders(&self) -> usize {
        self.shaders.borrow().len()
    }

    pub fn current_program(&self) -> Option<u32> {
        self.current_program.get()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn uniform_value(&self, program: u32, location: i32) -> Option<UniformValue> {
        self.uniform_values.borrow().get(&(program, location)).copied()
    }

    pub fn attrib_binding(&self, attrib: u32) -> Option<u32> {
        self.attrib_bindings.borrow().get(&attrib).copied()
    }

    /// Observable driver state, used to compare call sequences.
    pub fn snapshot(&self) -> (Option<u32>, Vec<((u32, i32), UniformValue)>) {
        let values = self
            .uniform_values
            .borrow()
            .iter()
            .map(|(key, value)| (*key, *value))
            .collect();
        (self.current_program.get(), values)
    }

    fn allocate(&self) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

fn parse_declarations(source: &str) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    for line in source.lines() {
        let mut line = line.trim();
        let mut location = None;
        if line.starts_with("layout")
            && let Some(close) = line.find(')')
        {
            location = line[..close]
                .split('=')
                .nth(1)
                .and_then(|n| n.trim().parse().ok());
            line = line[close + 1..].trim();
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [qualifier, ty, name] = tokens.as_slice() else {
            continue;
        };
        if !matches!(*qualifier, "in" | "out" | "uniform") || !name.ends_with(';') {
            continue;
        }
        let name = name.trim_end_matches(';');
        let (name, array) = match name.find('[') {
            Some(bracket) => (&name[..bracket], true),
            None => (name, false),
        };
        declarations.push(Declaration {
            qualifier: qualifier.to_string(),
            ty: ty.to_string(),
            name: name.to_string(),
            array,
            location,
        });
    }
    declarations
}

fn is_used(source: &str, name: &str) -> bool {
    source
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| *token == name)
        .count()
        > 1
}

fn gl_type(ty: &str) -> u32 {
    match ty {
        "float" => glow::FLOAT,
        "int" => glow::INT,
        "bool" => glow::BOOL,
        "vec2" => glow::FLOAT_VEC2,
        "vec3" => glow::FLOAT_VEC3,
        "vec4" => glow::FLOAT_VEC4,
        "mat4" => glow::FLOAT_MAT4,
        "sampler2D" => glow::SAMPLER_2D,
        _ => 0,
    }
}

impl Driver for FakeDriver {
    type Shader = u32;
    type Program = u32;
    type UniformLocation = i32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let id = self.allocate();
        self.shaders.borrow_mut().insert(
            id,
            ShaderObject {
                stage: Some(stage),
                ..Default::default()
            },
        );
        Ok(id)
    }

    fn compile_shader(&self, shader: u32, source: &str) -> Result<(), String> {
        let mut shaders = self.shaders.borrow_mut();
        let object = shaders
            .get_mut(&shader)
            .ok_or_else(|| format!("invalid shader {shader}"))?;
        object.source = source.to_string();

        let opened = source.matches('{').count();
        let closed = source.matches('}').count();
        if opened != closed {
            return Err("0:1(1): error: syntax error, unbalanced braces".to_string());
        }
        if !source.contains("void main") {
            return Err("0:1(1): error: no definition of main()".to_string());
        }
        object.compiled = true;
        Ok(())
    }

    fn delete_shader(&self, shader: u32) {
        self.shaders.borrow_mut().remove(&shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        if self.refuse_programs.get() {
            return Err("out of program objects".to_string());
        }
        let id = self.allocate();
        self.programs
            .borrow_mut()
            .insert(id, ProgramObject::default());
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        if let Some(object) = self.programs.borrow_mut().get_mut(&program) {
            object.attached.insert(shader);
        }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        if let Some(object) = self.programs.borrow_mut().get_mut(&program) {
            object.attached.remove(&shader);
        }
    }

    fn link_program(&self, program: u32) -> Result<(), String> {
        let shaders = self.shaders.borrow();
        let mut programs = self.programs.borrow_mut();
        let object = programs
            .get_mut(&program)
            .ok_or_else(|| format!("invalid program {program}"))?;

        let stage_source = |stage: ShaderStage| {
            object
                .attached
                .iter()
                .filter_map(|id| shaders.get(id))
                .find(|s| s.stage == Some(stage) && s.compiled)
                .map(|s| s.source.clone())
        };
        let vertex = stage_source(ShaderStage::Vertex)
            .ok_or_else(|| "error: no compiled vertex shader attached".to_string())?;
        let fragment = stage_source(ShaderStage::Fragment)
            .ok_or_else(|| "error: no compiled fragment shader attached".to_string())?;

        let vertex_decls = parse_declarations(&vertex);
        let fragment_decls = parse_declarations(&fragment);

        for input in fragment_decls.iter().filter(|d| d.qualifier == "in") {
            let written = vertex_decls
                .iter()
                .any(|d| d.qualifier == "out" && d.name == input.name && d.ty == input.ty);
            if !written {
                return Err(format!(
                    "error: fragment shader input `{}` has no matching vertex shader output",
                    input.name
                ));
            }
        }

        let mut attributes = Vec::new();
        let mut next_attrib = 0;
        for decl in vertex_decls.iter().filter(|d| d.qualifier == "in") {
            if !is_used(&vertex, &decl.name) {
                continue;
            }
            let location = decl.location.unwrap_or(next_attrib);
            next_attrib = location + 1;
            attributes.push((
                ActiveVariable {
                    name: decl.name.clone(),
                    size: 1,
                    gl_type: gl_type(&decl.ty),
                },
                Some(location),
            ));
        }
        if vertex.contains("gl_VertexID") {
            attributes.push((
                ActiveVariable {
                    name: "gl_VertexID".to_string(),
                    size: 1,
                    gl_type: glow::INT,
                },
                None,
            ));
        }

        let mut uniforms: Vec<(ActiveVariable, Option<i32>)> = Vec::new();
        for (source, decls) in [(&vertex, &vertex_decls), (&fragment, &fragment_decls)] {
            for decl in decls.iter().filter(|d| d.qualifier == "uniform") {
                if !is_used(source, &decl.name) {
                    continue;
                }
                let name = if decl.array {
                    format!("{}[0]", decl.name)
                } else {
                    decl.name.clone()
                };
                if uniforms.iter().any(|(u, _)| u.name == name) {
                    continue;
                }
                let location = uniforms.len() as i32;
                uniforms.push((
                    ActiveVariable {
                        name,
                        size: 1,
                        gl_type: gl_type(&decl.ty),
                    },
                    Some(location),
                ));
            }
        }

        object.attributes = attributes;
        object.uniforms = uniforms;
        Ok(())
    }

    fn delete_program(&self, program: u32) {
        self.programs.borrow_mut().remove(&program);
        if self.current_program.get() == Some(program) {
            self.current_program.set(None);
        }
    }

    fn active_uniforms(&self, program: u32) -> Vec<ActiveVariable> {
        self.programs
            .borrow()
            .get(&program)
            .map(|p| p.uniforms.iter().map(|(v, _)| v.clone()).collect())
            .unwrap_or_default()
    }

    fn active_attributes(&self, program: u32) -> Vec<ActiveVariable> {
        self.programs
            .borrow()
            .get(&program)
            .map(|p| p.attributes.iter().map(|(v, _)| v.clone()).collect())
            .unwrap_or_default()
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<i32> {
        self.programs
            .borrow()
            .get(&program)?
            .uniforms
            .iter()
            .find(|(v, _)| v.name == name)
            .and_then(|(_, location)| *location)
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        self.programs
            .borrow()
            .get(&program)?
            .attributes
            .iter()
            .find(|(v, _)| v.name == name)
            .and_then(|(_, location)| *location)
    }

    fn use_program(&self, program: Option<u32>) {
        self.calls.borrow_mut().push(Call::UseProgram(program));
        self.current_program.set(program);
    }

    fn write_uniform(&self, location: &i32, value: &UniformValue) {
        self.calls
            .borrow_mut()
            .push(Call::WriteUniform(*location, *value));
        if let Some(program) = self.current_program.get() {
            self.uniform_values
                .borrow_mut()
                .insert((program, *location), *value);
        }
    }

    fn vertex_attrib_binding(&self, attrib: u32, slot: u32) {
        self.calls
            .borrow_mut()
            .push(Call::VertexAttribBinding(attrib, slot));
        self.attrib_bindings.borrow_mut().insert(attrib, slot);
    }
}
