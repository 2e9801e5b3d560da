//! Shared test utilities.

#![allow(dead_code)]

use std::io;

use clitree::{Context, SharedBuffer};

/// A context over in-memory streams, plus handles to read them back.
pub struct Captured {
    pub ctx: Context,
    pub out: SharedBuffer,
    pub err: SharedBuffer,
}

pub fn captured() -> Captured {
    let out = SharedBuffer::new();
    let err = SharedBuffer::new();
    Captured {
        ctx: Context::new(io::empty(), out.clone(), err.clone()),
        out,
        err,
    }
}

pub fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
