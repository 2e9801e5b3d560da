//! Options: named, typed values attached to a command.

mod binding;
mod types;

use std::cell::RefCell;
use std::fmt;

use serde::Serialize;

use crate::command::CommandId;
use crate::error::TagError;

pub use binding::{BindTarget, Binding};
pub use types::{FuncType, OptType, TypeRegistry};

/// A parsed option value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Result of a custom type that only has side effects.
    Unit,
    /// Set by a zero-argument, non-bool option; holds the option's name.
    Marker(String),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Unit => f.write_str("<none>"),
            Value::Marker(name) => write!(f, "-{name}"),
        }
    }
}

/// Static kind of the storage behind a [`Binding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Str,
    /// A [`Value`] slot; accepts every option type.
    Any,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "string",
            ValueKind::Any => "any",
        }
    }

    /// Whether storage of this kind can hold values of `ty`.
    pub fn accepts(self, ty: &OptType) -> bool {
        self == ValueKind::Any || self == ty.value_kind()
    }
}

/// A named, typed option.
///
/// The current value lives in a `RefCell` because parsing assigns through a
/// shared tree; see [`Opt::set_value`].
#[derive(Debug)]
pub struct Opt {
    name: String,
    aliases: Vec<String>,
    description: String,
    parent: Option<CommandId>,
    opt_type: OptType,
    default: Option<Value>,
    value: RefCell<Option<Value>>,
    binding: Option<Binding>,
}

impl Opt {
    pub fn new(name: impl Into<String>, opt_type: OptType) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: String::new(),
            parent: None,
            opt_type,
            default: None,
            value: RefCell::new(None),
            binding: None,
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Records a default. The current value is left untouched.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Attaches write-through storage, rejecting storage of the wrong kind.
    pub fn with_binding(mut self, binding: Binding) -> Result<Self, TagError> {
        if !binding.kind().accepts(&self.opt_type) {
            return Err(TagError::BindingMismatch {
                option: self.name,
                option_type: self.opt_type.name().to_string(),
                target: binding.kind().name(),
            });
        }
        self.binding = Some(binding);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn opt_type(&self) -> &OptType {
        &self.opt_type
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Command owning this option, once it is part of a tree.
    pub fn parent(&self) -> Option<CommandId> {
        self.parent
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Value assigned by parsing (or by a tag default), if any.
    pub fn value(&self) -> Option<Value> {
        self.value.borrow().clone()
    }

    /// Current value, falling back to the default.
    pub fn effective(&self) -> Option<Value> {
        self.value().or_else(|| self.default.clone())
    }

    /// Assigns `value`, writing through the binding first when present.
    pub fn set_value(&self, value: Value) {
        if let Some(binding) = &self.binding {
            binding.write(&value);
        }
        *self.value.borrow_mut() = Some(value);
    }

    /// `-name, -alias, ...` as shown in usage output.
    pub fn format_flag(&self) -> String {
        let mut flag = format!("-{}", self.name);
        for alias in &self.aliases {
            flag.push_str(", -");
            flag.push_str(alias);
        }
        flag
    }

    pub(crate) fn set_default(&mut self, value: Value) {
        self.default = Some(value);
    }

    pub(crate) fn attach(&mut self, parent: CommandId) {
        self.parent = Some(parent);
    }
}
