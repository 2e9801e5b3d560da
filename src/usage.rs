//! Default help output.

use std::io::{self, Write};

use crate::command::CommandRef;
use crate::context::Context;
use crate::error::CliError;
use crate::opt::Opt;

impl CommandRef<'_> {
    /// Shows help for this command, explaining `err` when given.
    ///
    /// Uses the usage hook when one is set, otherwise [`render_usage`] to
    /// `ctx.out`, or to `ctx.err` when there is an error.
    pub fn usage(&self, ctx: &mut Context, err: Option<&CliError>) -> io::Result<()> {
        if let Some(hook) = &self.node().hooks.usage {
            hook(*self, ctx, err);
            return Ok(());
        }
        let w = if err.is_some() { &mut ctx.err } else { &mut ctx.out };
        render_usage(*self, w.as_mut(), err)?;
        w.flush()
    }
}

/// Writes the synopsis, description, subcommands and visible options of
/// `cmd`. The messages of a usage-class `err` are appended.
pub fn render_usage(
    cmd: CommandRef<'_>,
    w: &mut dyn Write,
    err: Option<&CliError>,
) -> io::Result<()> {
    writeln!(w, "synopsis: {}", cmd.synopsis())?;
    if !cmd.description().is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", cmd.description())?;
    }

    let children: Vec<_> = cmd.children().collect();
    if !children.is_empty() {
        writeln!(w)?;
        writeln!(w, "commands:")?;
        let width = children.iter().map(|c| c.name().len()).max().unwrap_or(0);
        for child in children {
            let line = format!("  {:<width$}  {}", child.name(), child.synopsis());
            writeln!(w, "{}", line.trim_end())?;
        }
    }

    let visible = cmd.all_opts();
    for section in cmd.path() {
        let opts: Vec<&Opt> = section
            .opts()
            .iter()
            .filter(|opt| visible.values().any(|v| std::ptr::eq(*v, *opt)))
            .collect();

        writeln!(w)?;
        if section == cmd {
            if section.parent().is_none() {
                write!(w, "options:")?;
            } else {
                write!(w, "{} options:", section.name())?;
            }
        } else {
            write!(w, "available {} options:", section.name())?;
        }
        if opts.is_empty() {
            writeln!(w, " (none)")?;
            continue;
        }
        writeln!(w)?;
        write_opt_rows(w, &opts)?;
    }

    if let Some(err) = err.filter(|e| e.is_usage()) {
        writeln!(w)?;
        for e in err.iter() {
            writeln!(w, "{e}")?;
        }
    }
    Ok(())
}

fn write_opt_rows(w: &mut dyn Write, opts: &[&Opt]) -> io::Result<()> {
    let rows: Vec<[String; 4]> = opts
        .iter()
        .map(|opt| {
            [
                opt.format_flag(),
                opt.description().to_string(),
                opt.default()
                    .map(|d| format!("(default {d})"))
                    .unwrap_or_default(),
                opt.opt_type().name().to_string(),
            ]
        })
        .collect();

    let mut widths = [0usize; 4];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    for row in &rows {
        let mut line = String::from(" ");
        for (cell, width) in row.iter().zip(widths) {
            if width == 0 {
                continue;
            }
            line.push(' ');
            line.push_str(&format!("{cell:<width$} "));
        }
        writeln!(w, "{}", line.trim_end())?;
    }
    Ok(())
}
