//! Tree-walking interpreter for materialized bodies.

use std::cmp::Ordering;
use std::rc::Rc;

use indexmap::IndexMap;

use super::ast::{BinaryOp, Expr, LogicalOp, UnaryOp};
use super::error::RuntimeError;
use super::scope::{CapturedFrames, Scope};
use super::stack;
use super::trace::Tracer;
use super::value::{BoundMethod, Closure, Function, Method, Value, join};

type EvalResult = Result<Value, RuntimeError>;

/// Runtime limits for one render.
#[derive(Clone, Copy, Debug)]
pub struct FuelLimits {
    /// Maximum evaluation steps (default: 1,000,000).
    pub(crate) exec_fuel: u32,
    /// Maximum function call depth (default: 1,024).
    pub(crate) recursion_limit: u32,
}

impl Default for FuelLimits {
    fn default() -> Self {
        Self {
            exec_fuel: 1_000_000,
            recursion_limit: 1024,
        }
    }
}

impl FuelLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = fuel;
        self
    }

    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_exec_fuel(&self) -> u32 {
        self.exec_fuel
    }

    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}

/// Per-render evaluation state.
pub(crate) struct Interpreter<'t, T: Tracer> {
    fuel: u32,
    depth: u32,
    recursion_limit: u32,
    captured: CapturedFrames,
    tracer: &'t mut T,
}

impl<'t, T: Tracer> Interpreter<'t, T> {
    pub(crate) fn new(limits: FuelLimits, tracer: &'t mut T) -> Self {
        Self {
            fuel: limits.exec_fuel,
            depth: 0,
            recursion_limit: limits.recursion_limit,
            captured: CapturedFrames::default(),
            tracer,
        }
    }

    /// Empty every frame a closure captured during this render.
    ///
    /// A closure stored into its own defining frame forms an `Rc` cycle; the
    /// render's values are dead once the result is converted, so clearing
    /// the frames frees the chain.
    pub(crate) fn release_frames(&mut self) {
        self.captured.release();
    }

    pub(crate) fn tracer(&mut self) -> &mut T {
        &mut *self.tracer
    }

    fn consume_fuel(&mut self) -> Result<(), RuntimeError> {
        if self.fuel == 0 {
            return Err(RuntimeError::ExecFuelExhausted);
        }
        self.fuel -= 1;
        Ok(())
    }

    pub(crate) fn eval(&mut self, expr: &Expr, scope: &Scope) -> EvalResult {
        stack::grow(|| self.eval_expr(expr, scope))
    }

    fn eval_expr(&mut self, expr: &Expr, scope: &Scope) -> EvalResult {
        self.consume_fuel()?;

        let value = match expr {
            Expr::Undefined => Value::Undefined,
            Expr::Null => Value::Null,
            Expr::Bool(b) => Value::Bool(*b),
            Expr::Number(n) => Value::Number(*n),
            Expr::String(s) => Value::String(s.clone()),
            // Free identifiers the locals do not bind read as `undefined`.
            Expr::Ident(name) => scope.lookup(name).unwrap_or(Value::Undefined),
            Expr::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval(item, scope)?);
                }
                Value::from(values)
            }
            Expr::Object(props) => {
                let mut fields = IndexMap::with_capacity(props.len());
                for (key, value) in props {
                    let value = self.eval(value, scope)?;
                    fields.insert(key.clone(), value);
                }
                Value::Object(Rc::new(fields))
            }
            Expr::Function(func) => {
                self.captured.record(scope);
                Value::Function(Function::Closure(Rc::new(Closure {
                    func: func.clone(),
                    scope: scope.clone(),
                })))
            }
            Expr::Member { object, property } => {
                let target = self.eval(object, scope)?;
                get_property(&target, property, || object.describe())?
            }
            Expr::Index { object, index } => {
                let target = self.eval(object, scope)?;
                let key = self.eval(index, scope)?.to_display_string();
                get_property(&target, &key, || object.describe())?
            }
            Expr::Call { callee, args } => {
                let func = self.eval(callee, scope)?;
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg, scope)?);
                }
                let Value::Function(func) = func else {
                    return Err(RuntimeError::TypeError(format!(
                        "{} is not a function",
                        callee.describe()
                    )));
                };
                self.call(&func, values)?
            }
            Expr::Unary { op, operand } => {
                let value = self.eval(operand, scope)?;
                match op {
                    UnaryOp::Not => Value::Bool(!value.truthy()),
                    UnaryOp::Neg => Value::Number(-value.to_number()),
                    UnaryOp::Plus => Value::Number(value.to_number()),
                    UnaryOp::Typeof => Value::from(value.type_of()),
                }
            }
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.eval(lhs, scope)?;
                let rhs = self.eval(rhs, scope)?;
                binary(*op, &lhs, &rhs)
            }
            Expr::Logical { op, lhs, rhs } => {
                let lhs = self.eval(lhs, scope)?;
                match (op, lhs.truthy()) {
                    (LogicalOp::And, true) | (LogicalOp::Or, false) => self.eval(rhs, scope)?,
                    _ => lhs,
                }
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                let taken = self.eval(test, scope)?.truthy();
                self.tracer.trace_branch(taken);
                if taken {
                    self.eval(consequent, scope)?
                } else {
                    self.eval(alternate, scope)?
                }
            }
            Expr::Assign { name, value } => {
                let value = self.eval(value, scope)?;
                scope.assign(name, value.clone());
                self.tracer.trace_assign(name, &value);
                value
            }
            Expr::Sequence(items) => {
                let mut last = Value::Undefined;
                for item in items {
                    last = self.eval(item, scope)?;
                }
                last
            }
        };
        Ok(value)
    }

    pub(crate) fn call(&mut self, func: &Function, args: Vec<Value>) -> EvalResult {
        if self.depth >= self.recursion_limit {
            return Err(RuntimeError::RecursionLimitExceeded);
        }
        self.tracer.trace_call(func.name());

        self.depth += 1;
        let result = match func {
            Function::Closure(closure) => self.call_closure(func, closure, args),
            Function::IterationHelper => self.iterate(args),
            Function::Method(bound) => call_method(bound, &args),
        };
        self.depth -= 1;
        result
    }

    fn call_closure(&mut self, func: &Function, closure: &Closure, args: Vec<Value>) -> EvalResult {
        let frame = closure.scope.child();
        if let Some(name) = &closure.func.name {
            frame.define(name.clone(), Value::Function(func.clone()));
        }
        let mut args = args.into_iter();
        for param in &closure.func.params {
            frame.define(param.clone(), args.next().unwrap_or(Value::Undefined));
        }
        self.eval(&closure.func.body, &frame)
    }

    /// The iteration helper: positional over array-likes, by key otherwise.
    fn iterate(&mut self, args: Vec<Value>) -> EvalResult {
        let mut args = args.into_iter();
        let collection = args.next().unwrap_or(Value::Undefined);
        let callback = match args.next() {
            Some(Value::Function(func)) => func,
            _ => {
                return Err(RuntimeError::TypeError(
                    "iteration callback is not a function".to_owned(),
                ));
            }
        };

        let entries = self.iteration_entries(&collection)?;
        self.tracer.trace_iterate(entries.len());

        let mut results = Vec::with_capacity(entries.len());
        for (item, key) in entries {
            self.tracer.trace_item(&key);
            results.push(self.call(&callback, vec![item, key])?);
        }
        Ok(Value::from(results))
    }

    /// `(value, index-or-key)` pairs the iteration helper visits.
    fn iteration_entries(&mut self, collection: &Value) -> Result<Vec<(Value, Value)>, RuntimeError> {
        let length = get_property(collection, "length", || "collection".to_owned())?;
        if let Value::Number(length) = length {
            let len = if length.is_nan() || length <= 0.0 {
                0
            } else {
                length.min(u32::MAX as f64) as usize
            };
            let mut entries = Vec::new();
            for i in 0..len {
                self.consume_fuel()?;
                let item = get_property(collection, &i.to_string(), || "collection".to_owned())?;
                entries.push((item, Value::Number(i as f64)));
            }
            return Ok(entries);
        }

        let Value::Object(fields) = collection else {
            return Ok(Vec::new());
        };
        Ok(own_keys(fields)
            .into_iter()
            .map(|key| (fields.get(key).cloned().unwrap_or(Value::Undefined), Value::from(key)))
            .collect())
    }
}

/// Object key order: array-index keys ascending, then the rest in insertion order.
fn own_keys(fields: &IndexMap<String, Value>) -> Vec<&str> {
    let (mut indices, names): (Vec<_>, Vec<_>) = fields
        .keys()
        .map(String::as_str)
        .partition(|key| array_index(key).is_some());
    indices.sort_by_key(|key| array_index(key));
    indices.extend(names);
    indices
}

/// Canonical array index: `0`, `1`, ... without sign or leading zeros.
fn array_index(key: &str) -> Option<u32> {
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

fn get_property(
    target: &Value,
    key: &str,
    describe: impl FnOnce() -> String,
) -> Result<Value, RuntimeError> {
    let bind = |method: Method| {
        Value::Function(Function::Method(Rc::new(BoundMethod {
            receiver: target.clone(),
            method,
        })))
    };

    let value = match target {
        Value::Undefined | Value::Null => {
            return Err(RuntimeError::TypeError(format!(
                "cannot read property `{key}` of {} ({})",
                target.to_display_string(),
                describe()
            )));
        }
        Value::Array(items) => match key {
            "length" => Value::Number(items.len() as f64),
            _ => match array_index(key) {
                Some(i) => items.get(i as usize).cloned().unwrap_or(Value::Undefined),
                None => Method::for_array(key).map_or(Value::Undefined, bind),
            },
        },
        Value::String(s) => match key {
            "length" => Value::Number(s.chars().count() as f64),
            _ => match array_index(key) {
                Some(i) => s
                    .chars()
                    .nth(i as usize)
                    .map_or(Value::Undefined, |c| Value::String(c.to_string())),
                None => Method::for_string(key).map_or(Value::Undefined, bind),
            },
        },
        Value::Object(fields) => fields.get(key).cloned().unwrap_or(Value::Undefined),
        Value::Bool(_) | Value::Number(_) | Value::Function(_) => Value::Undefined,
    };
    Ok(value)
}

fn binary(op: BinaryOp, lhs: &Value, rhs: &Value) -> Value {
    let arith = |f: fn(f64, f64) -> f64| Value::Number(f(lhs.to_number(), rhs.to_number()));
    let ordered = |accept: fn(Ordering) -> bool| Value::Bool(lhs.compare(rhs).is_some_and(accept));

    match op {
        BinaryOp::Add => lhs.add(rhs),
        BinaryOp::Sub => arith(|a, b| a - b),
        BinaryOp::Mul => arith(|a, b| a * b),
        BinaryOp::Div => arith(|a, b| a / b),
        BinaryOp::Rem => arith(|a, b| a % b),
        BinaryOp::Eq => Value::Bool(lhs.loose_eq(rhs)),
        BinaryOp::NotEq => Value::Bool(!lhs.loose_eq(rhs)),
        BinaryOp::StrictEq => Value::Bool(lhs.strict_eq(rhs)),
        BinaryOp::StrictNotEq => Value::Bool(!lhs.strict_eq(rhs)),
        BinaryOp::Lt => ordered(Ordering::is_lt),
        BinaryOp::LtEq => ordered(Ordering::is_le),
        BinaryOp::Gt => ordered(Ordering::is_gt),
        BinaryOp::GtEq => ordered(Ordering::is_ge),
    }
}

fn call_method(bound: &BoundMethod, args: &[Value]) -> EvalResult {
    let arg = |i: usize| args.get(i).cloned().unwrap_or(Value::Undefined);

    let value = match (&bound.receiver, bound.method) {
        (Value::Array(items), Method::Concat) => {
            let mut out = items.as_ref().clone();
            for value in args {
                match value {
                    Value::Array(more) => out.extend(more.iter().cloned()),
                    other => out.push(other.clone()),
                }
            }
            Value::from(out)
        }
        (Value::Array(items), Method::Join) => {
            let separator = match arg(0) {
                Value::Undefined => ",".to_owned(),
                sep => sep.to_display_string(),
            };
            Value::String(join(items, &separator))
        }
        (Value::Array(items), Method::IndexOf) => {
            let needle = arg(0);
            let found = items.iter().position(|item| item.strict_eq(&needle));
            Value::Number(found.map_or(-1.0, |i| i as f64))
        }
        (Value::Array(items), Method::Slice) => {
            let (start, end) = slice_bounds(items.len(), &arg(0), &arg(1));
            Value::from(items[start..end].to_vec())
        }
        (Value::String(s), Method::Concat) => {
            let mut out = s.clone();
            for value in args {
                out.push_str(&value.to_display_string());
            }
            Value::String(out)
        }
        (Value::String(s), Method::IndexOf) => {
            let chars: Vec<char> = s.chars().collect();
            let needle: Vec<char> = arg(0).to_display_string().chars().collect();
            let from = relative_index(chars.len(), &arg(1), 0).min(chars.len());
            let found = (from..=chars.len().saturating_sub(needle.len()))
                .find(|&i| chars.len() >= needle.len() && chars[i..i + needle.len()] == needle[..]);
            Value::Number(found.map_or(-1.0, |i| i as f64))
        }
        (Value::String(s), Method::Slice) => {
            let chars: Vec<char> = s.chars().collect();
            let (start, end) = slice_bounds(chars.len(), &arg(0), &arg(1));
            Value::String(chars[start..end].iter().collect())
        }
        (Value::String(s), Method::ToUpperCase) => Value::String(s.to_uppercase()),
        (Value::String(s), Method::ToLowerCase) => Value::String(s.to_lowercase()),
        (Value::String(s), Method::Trim) => Value::String(s.trim().to_owned()),
        (receiver, method) => {
            return Err(RuntimeError::TypeError(format!(
                "{} has no method `{}`",
                receiver.type_of(),
                method.name()
            )));
        }
    };
    Ok(value)
}

/// Resolve `slice(start, end)` arguments against `len`.
fn slice_bounds(len: usize, start: &Value, end: &Value) -> (usize, usize) {
    let start = relative_index(len, start, 0);
    let end = relative_index(len, end, len);
    (start, end.max(start))
}

/// Negative positions count from the end; `undefined` takes `default`.
fn relative_index(len: usize, value: &Value, default: usize) -> usize {
    if matches!(value, Value::Undefined) {
        return default;
    }
    let n = value.to_number();
    if n.is_nan() {
        return 0;
    }
    let n = n.trunc();
    if n < 0.0 {
        (len as f64 + n).max(0.0) as usize
    } else {
        n.min(len as f64) as usize
    }
}
