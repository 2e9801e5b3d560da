//! Tagged fields: options declared on a record and bound to its fields.
//!
//! A record describes its fields through [`Tagged`]. Each field carries an
//! accessor and, optionally, a tag string:
//!
//! ```
//! use clitree::tags::{Field, Tagged};
//!
//! #[derive(Default)]
//! struct Config {
//!     debug: bool,
//!     level: i64,
//! }
//!
//! impl Tagged for Config {
//!     fn fields() -> Vec<Field<Self>> {
//!         vec![
//!             Field::bool("debug", |c: &mut Config| &mut c.debug)
//!                 .tag("name=debug desc='turn on debugging'"),
//!             Field::int("level", |c: &mut Config| &mut c.level)
//!                 .tag(r"name=level aliases=l default=2 desc='A\'s level'"),
//!         ]
//!     }
//! }
//! ```
//!
//! [`tagged_opts`] turns those fields into [`Opt`]s whose assignments write
//! straight into a shared `Rc<RefCell<Config>>`. Tag keys are `name`,
//! `type`, `aliases`, `desc` and `default`; see [`lexer`] for the grammar.

pub mod lexer;

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::TagError;
use crate::opt::{BindTarget, Binding, Opt, OptType, TypeRegistry, Value};

pub use lexer::parse_tag;

type Accessor<S, T> = Rc<dyn Fn(&mut S) -> &mut T>;

/// A record whose fields can be compiled into options.
pub trait Tagged: Sized + 'static {
    fn fields() -> Vec<Field<Self>>;
}

enum Slot<S> {
    Bool(Accessor<S, bool>),
    Int(Accessor<S, i64>),
    Float(Accessor<S, f64>),
    String(Accessor<S, String>),
    Any(Accessor<S, Value>),
    Embedded,
}

/// One field of a [`Tagged`] record.
pub struct Field<S> {
    name: &'static str,
    tag: Option<&'static str>,
    slot: Slot<S>,
}

impl<S: 'static> Field<S> {
    pub fn bool(name: &'static str, access: impl Fn(&mut S) -> &mut bool + 'static) -> Self {
        Self::with_slot(name, Slot::Bool(Rc::new(access)))
    }

    pub fn int(name: &'static str, access: impl Fn(&mut S) -> &mut i64 + 'static) -> Self {
        Self::with_slot(name, Slot::Int(Rc::new(access)))
    }

    pub fn float(name: &'static str, access: impl Fn(&mut S) -> &mut f64 + 'static) -> Self {
        Self::with_slot(name, Slot::Float(Rc::new(access)))
    }

    pub fn string(name: &'static str, access: impl Fn(&mut S) -> &mut String + 'static) -> Self {
        Self::with_slot(name, Slot::String(Rc::new(access)))
    }

    /// A field holding any [`Value`]; its tag must name a `type`.
    pub fn any(name: &'static str, access: impl Fn(&mut S) -> &mut Value + 'static) -> Self {
        Self::with_slot(name, Slot::Any(Rc::new(access)))
    }

    /// An embedded field. Never turned into an option, even when tagged.
    pub fn embedded(name: &'static str) -> Self {
        Self::with_slot(name, Slot::Embedded)
    }

    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn with_slot(name: &'static str, slot: Slot<S>) -> Self {
        Self {
            name,
            tag: None,
            slot,
        }
    }

    fn inferred_type(&self) -> Option<OptType> {
        match self.slot {
            Slot::Bool(_) => Some(OptType::Bool),
            Slot::Int(_) => Some(OptType::Int),
            Slot::Float(_) => Some(OptType::Float),
            Slot::String(_) => Some(OptType::String),
            Slot::Any(_) | Slot::Embedded => None,
        }
    }

    fn binding(&self, record: &Rc<RefCell<S>>) -> Option<Binding> {
        match &self.slot {
            Slot::Bool(access) => Some(bind(record, access)),
            Slot::Int(access) => Some(bind(record, access)),
            Slot::Float(access) => Some(bind(record, access)),
            Slot::String(access) => Some(bind(record, access)),
            Slot::Any(access) => Some(bind(record, access)),
            Slot::Embedded => None,
        }
    }
}

/// Options for every tagged field of `record`, using the builtin types only.
pub fn tagged_opts<S: Tagged>(record: &Rc<RefCell<S>>) -> Result<Vec<Opt>, TagError> {
    tagged_opts_with_types(record, &TypeRegistry::new())
}

/// Like [`tagged_opts`], resolving `type=` against `types` as well.
///
/// Defaults are written into `record` before this returns, and only once
/// every field has compiled; on error the record is untouched. The record
/// must not be borrowed while arguments are parsed into the returned options.
pub fn tagged_opts_with_types<S: Tagged>(
    record: &Rc<RefCell<S>>,
    types: &TypeRegistry,
) -> Result<Vec<Opt>, TagError> {
    let mut opts = Vec::new();
    for field in S::fields() {
        if let Some(opt) = compile_field(&field, record, types)? {
            opts.push(opt);
        }
    }
    for opt in &opts {
        if let Some(value) = opt.default().cloned() {
            opt.set_value(value);
        }
    }
    Ok(opts)
}

fn compile_field<S: 'static>(
    field: &Field<S>,
    record: &Rc<RefCell<S>>,
    types: &TypeRegistry,
) -> Result<Option<Opt>, TagError> {
    let Some(tag) = field.tag else {
        return Ok(None);
    };
    let Some(binding) = field.binding(record) else {
        return Ok(None);
    };

    let inferred = field.inferred_type();
    let mut opt_type = inferred.clone();
    let mut name = None;
    let mut aliases = Vec::new();
    let mut desc = String::new();
    let mut default = None;

    for (key, value) in parse_tag(tag)? {
        match key.as_str() {
            "name" => {
                if value.is_empty() {
                    return Err(TagError::EmptyName {
                        field: field.name.to_string(),
                    });
                }
                name = Some(value);
            }
            "type" => {
                if let Some(inferred) = &inferred {
                    return Err(TagError::TypeConflict {
                        field: field.name.to_string(),
                        declared: value,
                        inferred: inferred.value_kind().name(),
                    });
                }
                opt_type = Some(types.get(&value).ok_or(TagError::UnknownType(value))?);
            }
            "aliases" => aliases.extend(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .map(str::to_string),
            ),
            "desc" => desc = value,
            "default" => {
                let Some(ty) = &opt_type else {
                    return Err(TagError::DefaultBeforeType {
                        field: field.name.to_string(),
                    });
                };
                let parsed = ty.parse(&value).map_err(|e| TagError::InvalidDefault {
                    field: field.name.to_string(),
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
                default = Some(parsed);
            }
            _ => return Err(TagError::UnknownKey(key)),
        }
    }

    let Some(opt_type) = opt_type else {
        return Err(TagError::MissingType {
            field: field.name.to_string(),
        });
    };
    let mut opt = Opt::new(name.unwrap_or_else(|| field.name.to_string()), opt_type)
        .with_aliases(aliases)
        .with_description(desc)
        .with_binding(binding)?;
    if let Some(value) = default {
        opt.set_default(value);
    }
    tracing::debug!(field = field.name, option = %opt.name(), "Compiled tagged field");
    Ok(Some(opt))
}

fn bind<S: 'static, T: BindTarget>(record: &Rc<RefCell<S>>, access: &Accessor<S, T>) -> Binding {
    let record = Rc::clone(record);
    let access = Rc::clone(access);
    Binding::new(move |value: T| {
        let mut rec = record.borrow_mut();
        *access(&mut *rec) = value;
    })
}
