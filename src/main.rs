//! CLI entry point for the `cscan` tool.
//!
//! Reads one C buffer from stdin and writes one line per unit:
//! `line kind name [pre] [post]`, with nested units indented. Scan errors are
//! reported on stderr with their line and column and exit with status 1.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use cscan::{Unit, line_col, parse};

fn write_units(out: &mut impl Write, units: &[Unit], depth: usize) -> io::Result<()> {
    for unit in units {
        write!(
            out,
            "{:indent$}{} {} {}",
            "",
            unit.line(),
            unit.kind(),
            unit.name().unwrap_or("-"),
            indent = depth * 2
        )?;
        if unit.pre_comment().is_some() {
            write!(out, " pre")?;
        }
        if unit.post_comment().is_some() {
            write!(out, " post")?;
        }
        writeln!(out)?;
        write_units(out, unit.nested_units(), depth + 1)?;
    }
    Ok(())
}

/// Scan `src`, listing units on `out` or the error on `err`. Returns whether
/// the scan succeeded.
fn run(src: &str, out: &mut impl Write, err: &mut impl Write) -> io::Result<bool> {
    match parse(src) {
        Ok(parsed) => {
            write_units(out, parsed.units(), 0)?;
            out.flush()?;
            Ok(true)
        }
        Err(e) => {
            match line_col(src, e.offset()) {
                Some((line, column)) => writeln!(err, "cscan: {line}:{column}: {e}")?,
                None => writeln!(err, "cscan: {e}")?,
            }
            Ok(false)
        }
    }
}

fn main() -> ExitCode {
    let mut src = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut src) {
        let _ = writeln!(io::stderr(), "cscan: cannot read stdin: {e}");
        return ExitCode::FAILURE;
    }
    let stdout = io::stdout();
    let stderr = io::stderr();
    match run(&src, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            let _ = writeln!(io::stderr(), "cscan: {e}");
            ExitCode::FAILURE
        }
    }
}
