//! Runtime values and the host-language coercions the generated code relies on.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use super::ast::FunctionExpr;
use super::scope::Scope;

/// A value produced while evaluating a template body.
///
/// Arrays and objects are immutable once built and shared by reference, so
/// `===` on them is identity.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Rc<Vec<Value>>),
    Object(Rc<IndexMap<String, Value>>),
    Function(Function),
}

/// Callable values.
#[derive(Clone)]
pub enum Function {
    Closure(Rc<Closure>),
    /// The natively bound iteration helper.
    IterationHelper,
    /// A builtin method already bound to its receiver.
    Method(Rc<BoundMethod>),
}

pub struct Closure {
    pub(crate) func: Arc<FunctionExpr>,
    pub(crate) scope: Scope,
}

pub struct BoundMethod {
    pub(crate) receiver: Value,
    pub(crate) method: Method,
}

/// Builtin methods on arrays and strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Concat,
    Join,
    IndexOf,
    Slice,
    ToUpperCase,
    ToLowerCase,
    Trim,
}

impl Method {
    pub fn name(self) -> &'static str {
        match self {
            Method::Concat => "concat",
            Method::Join => "join",
            Method::IndexOf => "indexOf",
            Method::Slice => "slice",
            Method::ToUpperCase => "toUpperCase",
            Method::ToLowerCase => "toLowerCase",
            Method::Trim => "trim",
        }
    }

    pub(crate) fn for_array(name: &str) -> Option<Self> {
        match name {
            "concat" => Some(Method::Concat),
            "join" => Some(Method::Join),
            "indexOf" => Some(Method::IndexOf),
            "slice" => Some(Method::Slice),
            _ => None,
        }
    }

    pub(crate) fn for_string(name: &str) -> Option<Self> {
        match name {
            "concat" => Some(Method::Concat),
            "indexOf" => Some(Method::IndexOf),
            "slice" => Some(Method::Slice),
            "toUpperCase" => Some(Method::ToUpperCase),
            "toLowerCase" => Some(Method::ToLowerCase),
            "trim" => Some(Method::Trim),
            _ => None,
        }
    }
}

impl Function {
    /// Name shown in traces and error messages.
    pub fn name(&self) -> &str {
        match self {
            Function::Closure(closure) => closure.func.name.as_deref().unwrap_or("<anonymous>"),
            Function::IterationHelper => jadevdom_core::ITERATION_HELPER_NAME,
            Function::Method(bound) => bound.method.name(),
        }
    }

    fn same(&self, other: &Function) -> bool {
        match (self, other) {
            (Function::Closure(a), Function::Closure(b)) => Rc::ptr_eq(a, b),
            (Function::IterationHelper, Function::IterationHelper) => true,
            (Function::Method(a), Function::Method(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function: {}]", self.name())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => f.write_str(&number_to_string(*n)),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Array(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Object(fields) => f.debug_map().entries(fields.iter()).finish(),
            Value::Function(func) => fmt::Debug::fmt(func, f),
        }
    }
}

/// Structural equality, for tests and assertions. Not `===`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.same(b),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(items))
    }
}

impl Value {
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => {
                Value::Array(Rc::new(items.iter().map(Value::from_json).collect()))
            }
            serde_json::Value::Object(fields) => Value::Object(Rc::new(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            )),
        }
    }

    /// JSON rendering with `JSON.stringify` rules.
    ///
    /// `undefined` and functions are dropped from objects and become `null`
    /// inside arrays; integral numbers serialize as integers.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Undefined | Value::Null | Value::Function(_) => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => json_number(*n),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Object(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .filter(|(_, v)| !v.is_omitted_in_json())
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    fn is_omitted_in_json(&self) -> bool {
        matches!(self, Value::Undefined | Value::Function(_))
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) | Value::Function(_) => true,
        }
    }

    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null | Value::Array(_) | Value::Object(_) => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Function(_) => "function",
        }
    }

    /// ToString.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_owned(),
            Value::Null => "null".to_owned(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => number_to_string(*n),
            Value::String(s) => s.clone(),
            Value::Array(items) => join(items, ","),
            Value::Object(_) => "[object Object]".to_owned(),
            Value::Function(func) => format!("function {}() {{ [native code] }}", func.name()),
        }
    }

    /// ToNumber.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::String(s) => string_to_number(s),
            Value::Array(_) => string_to_number(&self.to_display_string()),
            Value::Object(_) | Value::Function(_) => f64::NAN,
        }
    }

    /// Objects and arrays collapse to their string form; primitives pass through.
    fn to_primitive(&self) -> Value {
        match self {
            Value::Array(_) | Value::Object(_) | Value::Function(_) => {
                Value::String(self.to_display_string())
            }
            other => other.clone(),
        }
    }

    /// `===`
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => self == other,
        }
    }

    /// `==`
    pub fn loose_eq(&self, other: &Value) -> bool {
        use Value::*;
        match (self, other) {
            (Undefined | Null, Undefined | Null) => true,
            (Undefined | Null, _) | (_, Undefined | Null) => false,
            (Number(a), String(_)) => *a == other.to_number(),
            (String(_), Number(b)) => self.to_number() == *b,
            (Bool(_), _) => Number(self.to_number()).loose_eq(other),
            (_, Bool(_)) => self.loose_eq(&Number(other.to_number())),
            (Array(_) | Object(_) | Function(_), Number(_) | String(_)) => {
                self.to_primitive().loose_eq(other)
            }
            (Number(_) | String(_), Array(_) | Object(_) | Function(_)) => {
                self.loose_eq(&other.to_primitive())
            }
            _ => self.strict_eq(other),
        }
    }

    /// Binary `+`: concatenation when either side is string-like, addition otherwise.
    pub fn add(&self, other: &Value) -> Value {
        let (lhs, rhs) = (self.to_primitive(), other.to_primitive());
        if matches!(lhs, Value::String(_)) || matches!(rhs, Value::String(_)) {
            let mut out = lhs.to_display_string();
            out.push_str(&rhs.to_display_string());
            return Value::String(out);
        }
        Value::Number(lhs.to_number() + rhs.to_number())
    }

    /// Abstract relational comparison; `None` when either side is NaN.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        let (lhs, rhs) = (self.to_primitive(), other.to_primitive());
        if let (Value::String(a), Value::String(b)) = (&lhs, &rhs) {
            return Some(a.cmp(b));
        }
        lhs.to_number().partial_cmp(&rhs.to_number())
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

/// `Array.prototype.join` element rules: nullish entries print empty.
pub(crate) fn join(items: &[Value], separator: &str) -> String {
    items
        .iter()
        .map(|item| {
            if item.is_nullish() {
                String::new()
            } else {
                item.to_display_string()
            }
        })
        .collect::<Vec<_>>()
        .join(separator)
}

/// Number to string the way the host language prints it.
pub(crate) fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n == 0.0 {
        return "0".to_owned();
    }

    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        if n.fract() == 0.0 {
            return format!("{n:.0}");
        }
        return format!("{n}");
    }

    // Exponent form: `1e+21`, `1.5e-7`.
    let formatted = format!("{n:e}");
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => formatted,
    }
}

fn string_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).map_or(f64::NAN, |n| n as f64);
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let numeric = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !numeric {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}

fn json_number(n: f64) -> serde_json::Value {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE {
        return serde_json::Value::from(n as i64);
    }
    serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
}
