// Console formatter - writes sessions to the terminal

use std::io;

use console::{Style, Term};

use super::{Color, FormatterOptions, OutputSink, pad_name};
use crate::time;

/// Output sink backed by the process's stdout
pub struct ConsoleFormatter {
    options: FormatterOptions,
    term: Term,
    interactive: bool,
    longest: usize,
    style: Option<Style>,
}

impl ConsoleFormatter {
    /// Create a formatter on stdout, detecting whether it is a terminal
    pub fn new(options: FormatterOptions) -> Self {
        let term = Term::stdout();
        let interactive = term.is_term();
        Self::with_term(options, term, interactive)
    }

    /// Create a formatter on a given terminal with a known capability
    pub fn with_term(options: FormatterOptions, term: Term, interactive: bool) -> Self {
        Self {
            options,
            term,
            interactive,
            longest: 0,
            style: None,
        }
    }

    /// Line up the names of every file about to be reported
    pub fn prepare<'n>(&mut self, names: impl IntoIterator<Item = &'n str>) {
        self.longest = names.into_iter().map(str::len).max().unwrap_or(0);
    }

    fn emit(&self, text: &str, style: Option<&Style>) -> io::Result<()> {
        match style {
            Some(style) => {
                // keep the reset sequence ahead of the newline
                let (body, newline) = match text.strip_suffix('\n') {
                    Some(body) => (body, "\n"),
                    None => (text, ""),
                };
                self.term
                    .write_str(&format!("{}{}", style.apply_to(body), newline))
            }
            None => self.term.write_str(text),
        }
    }
}

fn style_for(colors: &[Color]) -> Style {
    colors
        .iter()
        .fold(Style::new().force_styling(true), |style, color| match color {
            Color::Red => style.red(),
            Color::Yellow => style.yellow(),
            Color::White => style.white(),
            Color::OnBlue => style.on_blue(),
        })
}

impl OutputSink for ConsoleFormatter {
    fn options(&self) -> &FormatterOptions {
        &self.options
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn format_name(&self, name: &str) -> String {
        let padded = pad_name(name, self.longest.max(name.len()));
        if self.options.timer {
            format!("{} {}", time::now_stamp(), padded)
        } else {
            padded
        }
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.emit(text, self.style.as_ref())
    }

    fn write_failure(&mut self, text: &str) -> io::Result<()> {
        if self.options.color {
            self.emit(text, Some(&style_for(&[Color::Red])))
        } else {
            self.emit(text, None)
        }
    }

    fn set_colors(&mut self, colors: &[Color]) -> io::Result<()> {
        if self.options.color {
            self.style = Some(style_for(colors));
        }
        Ok(())
    }

    fn reset_colors(&mut self) -> io::Result<()> {
        self.style = None;
        Ok(())
    }
}
