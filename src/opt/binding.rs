//! Write-through bindings from options into caller-owned storage.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::opt::{Value, ValueKind};

/// Rust types an option value can be written into.
pub trait BindTarget: Sized + 'static {
    const KIND: ValueKind;

    fn from_value(value: &Value) -> Option<Self>;
}

impl BindTarget for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl BindTarget for i64 {
    const KIND: ValueKind = ValueKind::Int;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_int()
    }
}

impl BindTarget for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_float()
    }
}

impl BindTarget for String {
    const KIND: ValueKind = ValueKind::Str;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl BindTarget for Value {
    const KIND: ValueKind = ValueKind::Any;

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

/// A typed setter an [`Opt`](crate::Opt) writes every assigned value through.
pub struct Binding {
    kind: ValueKind,
    write: RefCell<Box<dyn FnMut(&Value)>>,
}

impl Binding {
    /// Binding backed by an arbitrary setter.
    pub fn new<T: BindTarget>(mut set: impl FnMut(T) + 'static) -> Self {
        let write = move |value: &Value| match T::from_value(value) {
            Some(v) => set(v),
            None => panic!(
                "option binding invariant violated: {:?} written to {} storage",
                value,
                T::KIND.name()
            ),
        };
        Self {
            kind: T::KIND,
            write: RefCell::new(Box::new(write)),
        }
    }

    /// Binding that stores into a shared cell.
    pub fn cell<T: BindTarget>(slot: Rc<RefCell<T>>) -> Self {
        Self::new(move |v: T| *slot.borrow_mut() = v)
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub(crate) fn write(&self, value: &Value) {
        let mut write = self.write.borrow_mut();
        (*write)(value);
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding").field("kind", &self.kind).finish()
    }
}
