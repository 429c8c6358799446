//! Colored terminal output for the CLI.

use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Writes progress, success, warning and error lines to the terminal.
///
/// Errors and warnings go to stderr, everything else to stdout. Colors are
/// disabled automatically when the stream is not a terminal.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    stdout_color: ColorChoice,
    stderr_color: ColorChoice,
}

/// Colors only for streams attached to a terminal.
fn color_choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

impl OutputManager {
    /// Creates a new output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            stdout_color: color_choice(io::stdout().is_terminal()),
            stderr_color: color_choice(io::stderr().is_terminal()),
        }
    }

    fn stdout(&self) -> StandardStream {
        StandardStream::stdout(self.stdout_color)
    }

    fn stderr(&self) -> StandardStream {
        StandardStream::stderr(self.stderr_color)
    }

    fn write_tagged(
        stream: &mut StandardStream,
        color: Color,
        tag: &str,
        message: &str,
    ) -> io::Result<()> {
        stream.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(stream, "{}", tag)?;
        stream.reset()?;
        writeln!(stream, " {}", message)
    }

    /// Progress line, e.g. a discovery step.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        Self::write_tagged(&mut self.stdout(), Color::Cyan, "==>", message)
    }

    /// Success line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        Self::write_tagged(&mut self.stdout(), Color::Green, "✓", message)
    }

    /// Warning line on stderr.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        Self::write_tagged(&mut self.stderr(), Color::Yellow, "WARNING:", message)
    }

    /// Error line on stderr. Never suppressed.
    pub fn error(&self, message: &str) -> io::Result<()> {
        Self::write_tagged(&mut self.stderr(), Color::Red, "ERROR:", message)
    }

    /// Recovery hint following an error line. Never suppressed.
    pub fn hint(&self, message: &str) -> io::Result<()> {
        writeln!(self.stderr(), "  hint: {}", message)
    }

    /// Only printed in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose || self.quiet {
            return Ok(());
        }
        writeln!(self.stdout(), "    {}", message)
    }

    /// Section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut out = self.stdout();
        out.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(out, "{}", title)?;
        out.reset()
    }

    /// Indented detail line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(self.stdout(), "  {}", message)
    }
}
