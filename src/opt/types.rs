//! Option types: how a token becomes a [`Value`] and whether one must follow.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::CliError;
use crate::opt::{Value, ValueKind};

type ParseFn = dyn Fn(&str) -> Result<Value, CliError>;

/// The type of an option.
///
/// The four builtins cover the common cases; [`OptType::Func`] lets callers
/// plug in their own parsing.
#[derive(Clone)]
pub enum OptType {
    Bool,
    Int,
    Float,
    String,
    Func(FuncType),
}

impl OptType {
    /// Custom type backed by `parse`, requiring an argument.
    pub fn func(
        name: impl Into<String>,
        parse: impl Fn(&str) -> Result<Value, CliError> + 'static,
    ) -> Self {
        OptType::Func(FuncType::new(name, parse))
    }

    /// Parses option text into a value of this type.
    pub fn parse(&self, text: &str) -> Result<Value, CliError> {
        match self {
            OptType::Bool => parse_bool(text).map(Value::Bool),
            OptType::Int => text
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| invalid("int", text, e)),
            OptType::Float => text
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| invalid("float", text, e)),
            OptType::String => Ok(Value::Str(text.to_string())),
            OptType::Func(f) => (f.parse)(text),
        }
    }

    /// Whether the option consumes a following argument token.
    pub fn arg_required(&self) -> bool {
        match self {
            OptType::Bool => false,
            OptType::Func(f) => f.arg_required,
            _ => true,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            OptType::Bool => "bool",
            OptType::Int => "int",
            OptType::Float => "float",
            OptType::String => "string",
            OptType::Func(f) => &f.name,
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, OptType::Bool)
    }

    /// Storage kind a value of this type is written to.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            OptType::Bool => ValueKind::Bool,
            OptType::Int => ValueKind::Int,
            OptType::Float => ValueKind::Float,
            OptType::String => ValueKind::Str,
            OptType::Func(_) => ValueKind::Any,
        }
    }
}

impl fmt::Debug for OptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptType::Func(func) => f.debug_tuple("Func").field(&func.name).finish(),
            other => f.write_str(other.name()),
        }
    }
}

impl PartialEq for OptType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (OptType::Func(a), OptType::Func(b)) => Rc::ptr_eq(&a.parse, &b.parse),
            (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
        }
    }
}

/// Caller-supplied option type.
#[derive(Clone)]
pub struct FuncType {
    name: String,
    parse: Rc<ParseFn>,
    arg_required: bool,
}

impl FuncType {
    pub fn new(
        name: impl Into<String>,
        parse: impl Fn(&str) -> Result<Value, CliError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            parse: Rc::new(parse),
            arg_required: true,
        }
    }

    /// Makes the option a bare switch. Parsing stores [`Value::Marker`]
    /// instead of calling the parse function.
    pub fn without_arg(mut self) -> Self {
        self.arg_required = false;
        self
    }
}

/// Option types addressable by name from tag strings.
///
/// Always holds `bool`, `int`, `float` and `string`; custom types are added
/// with [`TypeRegistry::with_type`].
#[derive(Clone)]
pub struct TypeRegistry {
    custom: HashMap<String, OptType>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            custom: HashMap::new(),
        }
    }

    /// Registers `ty` under `name`. Builtin names cannot be replaced.
    pub fn with_type(mut self, name: impl Into<String>, ty: OptType) -> Self {
        let name = name.into();
        if builtin(&name).is_some() {
            tracing::warn!(name = %name, "Ignoring custom type that shadows a builtin");
            return self;
        }
        self.custom.insert(name, ty);
        self
    }

    pub fn get(&self, name: &str) -> Option<OptType> {
        builtin(name).or_else(|| self.custom.get(name).cloned())
    }
}

fn builtin(name: &str) -> Option<OptType> {
    match name {
        "bool" => Some(OptType::Bool),
        "int" => Some(OptType::Int),
        "float" => Some(OptType::Float),
        "string" => Some(OptType::String),
        _ => None,
    }
}

fn parse_bool(text: &str) -> Result<bool, CliError> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CliError::InvalidValue {
            type_name: "bool",
            input: text.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

fn invalid(type_name: &'static str, text: &str, err: impl fmt::Display) -> CliError {
    CliError::InvalidValue {
        type_name,
        input: text.to_string(),
        reason: err.to_string(),
    }
}
