//! Parser — token stream + resolved options → option values and positionals.

use crate::args::classifier::{classify, Token};
use crate::command::OptMap;
use crate::error::{CliError, ParseErrors};
use crate::opt::{Opt, Value};

/// How far into the token stream options are recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Options may appear anywhere, interleaved with positionals (leaf commands).
    Exhaustive,
    /// Everything from the first positional on is left verbatim for a
    /// subcommand (branch commands).
    StopAtPositional,
}

/// Positionals left after parsing, plus every error found on the way.
#[derive(Debug, Default)]
pub struct Parsed {
    pub args: Vec<String>,
    pub errors: ParseErrors,
}

impl Parsed {
    /// A successful parse leaving `args`.
    pub fn ok(args: Vec<String>) -> Self {
        Self {
            args,
            errors: ParseErrors::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The positionals, or the combined error if anything went wrong.
    pub fn into_result(self) -> Result<Vec<String>, CliError> {
        match self.errors.into_error() {
            None => Ok(self.args),
            Some(err) => Err(err),
        }
    }
}

/// Parse `args` against `opts`, assigning values as options are found.
///
/// Errors do not stop the scan: unknown options, missing values and bad
/// values are all collected so the user sees every mistake at once.
pub fn parse_args(opts: &OptMap<'_>, args: &[String], mode: ParseMode) -> Parsed {
    let mut parsed = Parsed::default();
    let mut pass_through = false;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if pass_through || (mode == ParseMode::StopAtPositional && !parsed.args.is_empty()) {
            parsed.args.push(arg.clone());
            continue;
        }
        let flag = match classify(arg) {
            Token::Positional => {
                parsed.args.push(arg.clone());
                continue;
            }
            Token::DoubleDash => {
                pass_through = true;
                parsed.args.push(arg.clone());
                continue;
            }
            Token::Flag(flag) => flag,
        };

        if let Some(value) = flag.value {
            match opts.get(flag.name) {
                Some(opt) => assign(opt, value, &mut parsed.errors),
                None => parsed
                    .errors
                    .push(CliError::UnknownOption(flag.name.to_string())),
            }
            continue;
        }

        let Some((opt, negated)) = lookup(opts, flag.text) else {
            parsed
                .errors
                .push(CliError::UnknownOption(flag.text.to_string()));
            continue;
        };
        tracing::trace!(option = %opt.name(), negated, "Matched option");

        if opt.opt_type().is_bool() {
            opt.set_value(Value::Bool(!negated));
        } else if opt.opt_type().arg_required() {
            match iter.next() {
                Some(next) => assign(opt, next, &mut parsed.errors),
                None => parsed
                    .errors
                    .push(CliError::OptionRequiresValue(opt.name().to_string())),
            }
        } else {
            opt.set_value(Value::Marker(opt.name().to_string()));
        }
    }

    tracing::debug!(
        positionals = parsed.args.len(),
        errors = parsed.errors.len(),
        ?mode,
        "Parsed arguments"
    );
    parsed
}

// `no-x` falls back to `x` and reports the negation. Only bools act on it.
fn lookup<'a>(opts: &OptMap<'a>, text: &str) -> Option<(&'a Opt, bool)> {
    if let Some(opt) = opts.get(text) {
        return Some((*opt, false));
    }
    let base = text.strip_prefix("no-")?;
    opts.get(base).map(|opt| (*opt, true))
}

fn assign(opt: &Opt, text: &str, errors: &mut ParseErrors) {
    match opt.opt_type().parse(text) {
        Ok(value) => opt.set_value(value),
        Err(err) => errors.push(CliError::InvalidOptionValue {
            option: opt.name().to_string(),
            source: Box::new(err),
        }),
    }
}
