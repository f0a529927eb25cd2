//! Colors for the `dups` help message
use anstyle::{AnsiColor, Color, Style};
use clap::ValueEnum;
use std::fmt;

/// When to color the help message
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorChoice {
    /// Color if standard output is a terminal that supports it
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl From<ColorChoice> for anstream::ColorChoice {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => anstream::ColorChoice::Auto,
            ColorChoice::Always => anstream::ColorChoice::Always,
            ColorChoice::Never => anstream::ColorChoice::Never,
        }
    }
}

/// The part a piece of help text plays, which determines its style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    AppName,
    Item,
    Title,
}

impl Role {
    const fn style(self) -> Style {
        const GREEN: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));
        match self {
            Role::AppName => GREEN.bold(),
            Role::Item => GREEN,
            Role::Title => Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        }
    }
}

/// Text to be displayed in the style of its `Role`. The escape codes are
/// written by `Display`; `width` ignores them.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Styled<'a> {
    role: Role,
    text: &'a str,
}

pub(crate) fn styled(role: Role, text: &str) -> Styled<'_> {
    Styled { role, text }
}

impl Styled<'_> {
    /// Display width, not counting escape codes
    pub(crate) fn width(&self) -> usize {
        textwrap::core::display_width(self.text)
    }
}

impl fmt::Display for Styled<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.role.style();
        write!(f, "{}{}{}", style.render(), self.text, style.render_reset())
    }
}
