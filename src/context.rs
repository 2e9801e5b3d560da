//! Execution context handed to every hook: streams, environment and cancellation.

use std::cell::RefCell;
use std::io::{self, Read, Write};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::command::CommandId;

/// The input, output, error output, environment and cancellation state of
/// one CLI invocation.
pub struct Context {
    pub input: Box<dyn Read>,
    pub out: Box<dyn Write>,
    pub err: Box<dyn Write>,
    pub env: Vec<(String, String)>,
    pub cancel: CancelHandle,
    /// Command most recently entered by dispatch.
    pub(crate) current: Option<CommandId>,
}

impl Context {
    /// Context over the given streams with an empty environment.
    pub fn new(
        input: impl Read + 'static,
        out: impl Write + 'static,
        err: impl Write + 'static,
    ) -> Self {
        Self {
            input: Box::new(input),
            out: Box::new(out),
            err: Box::new(err),
            env: Vec::new(),
            cancel: CancelHandle::new(),
            current: None,
        }
    }

    /// Stdin, stdout, stderr and a snapshot of the process environment.
    pub fn default_context() -> Self {
        Self::new(io::stdin(), io::stdout(), io::stderr()).with_env(std::env::vars())
    }

    pub fn with_env<K, V>(mut self, env: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env = env.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub fn with_cancel(mut self, cancel: CancelHandle) -> Self {
        self.cancel = cancel;
        self
    }

    /// Last value recorded for `key` in the environment snapshot.
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Cancellation flag plus optional deadline.
///
/// Clones share the flag, so a handle kept by the embedding application can
/// cancel an invocation that is already running. Nothing in the parser or
/// dispatcher checks it; run hooks do.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Signal cancellation to every clone of this handle.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            tracing::debug!("Invocation cancelled");
        }
    }

    /// True once cancelled or past the deadline.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Time left before the deadline, if one is set.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }
}

/// In-memory writer whose clones share one buffer.
///
/// Hand one clone to a [`Context`] and keep another to read what was written.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
