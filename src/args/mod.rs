//! Argument parsing for one command level.
//!
//! ```text
//! raw token → classify → lookup in resolved options → assign / collect positional
//! ```
//!
//! Each stage is a pure function over the token stream; the only side
//! effect is assigning option values.

mod classifier;
mod parser;

pub use classifier::{classify, Flag, Token};
pub use parser::{parse_args, ParseMode, Parsed};
