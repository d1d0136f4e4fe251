//! Materialized templates: parse once, render many times.

use indexmap::IndexMap;

use jadevdom_core::ITERATION_HELPER_NAME;

use super::ast::Program;
use super::error::{MaterializeError, RuntimeError};
use super::eval::{FuelLimits, Interpreter};
use super::parser::{ParseLimits, parse_program};
use super::scope::Scope;
use super::trace::{NoopTracer, Tracer};
use super::value::{Function, Value};
use super::vnode::VNode;

/// A generated body, parsed and ready to render.
///
/// Immutable after materialization; every render builds its own scope chain.
#[derive(Debug, Clone)]
pub struct Template {
    program: Program,
}

impl Template {
    /// Parse a generated body with default limits.
    pub fn materialize(source: &str) -> Result<Self, MaterializeError> {
        Self::materialize_with(source, ParseLimits::default())
    }

    pub fn materialize_with(source: &str, limits: ParseLimits) -> Result<Self, MaterializeError> {
        let program = parse_program(source, limits)?;
        Ok(Self { program })
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn uses_iteration_helper(&self) -> bool {
        self.program.uses_iteration_helper
    }

    /// Render against `locals` with default limits and no tracing.
    pub fn render(&self, locals: &serde_json::Value) -> Result<VNode, RuntimeError> {
        self.render_with(locals, FuelLimits::default(), &mut NoopTracer)
    }

    /// Render against `locals` (a JSON object, or null for none).
    pub fn render_with<T: Tracer>(
        &self,
        locals: &serde_json::Value,
        limits: FuelLimits,
        tracer: &mut T,
    ) -> Result<VNode, RuntimeError> {
        let scope = Scope::root(self.bindings(locals)?);
        let mut interpreter = Interpreter::new(limits, tracer);
        let node = interpreter.eval(&self.program.body, &scope).and_then(|value| {
            interpreter.tracer().trace_result(&value);
            VNode::from_value(&value)
        });
        interpreter.release_frames();
        node
    }

    /// Top-scope bindings: the locals, plus the helper when the body declares it.
    fn bindings(&self, locals: &serde_json::Value) -> Result<IndexMap<String, Value>, RuntimeError> {
        let mut vars: IndexMap<String, Value> = match locals {
            serde_json::Value::Object(fields) => fields
                .iter()
                .map(|(k, v)| (k.clone(), Value::from_json(v)))
                .collect(),
            serde_json::Value::Null => IndexMap::new(),
            _ => return Err(RuntimeError::InvalidLocals),
        };
        if self.program.uses_iteration_helper {
            vars.insert(
                ITERATION_HELPER_NAME.to_owned(),
                Value::Function(Function::IterationHelper),
            );
        }
        Ok(vars)
    }
}
