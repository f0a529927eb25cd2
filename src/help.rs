//! The `dups` help message, wrapped to fit the terminal
use crate::styles::{styled, ColorChoice, Role};
use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use std::io::Write;
use terminal_size::{terminal_size, Width};
use textwrap::{wrap, Options};

struct Entry {
    item: &'static str,
    caption: &'static str,
}
struct Section {
    title: &'static str,
    entries: &'static [Entry],
}

const NAME: &str = "dups";
const USAGE_ARGS: &str = " [OPTIONS] <FILE>...";
const ABOUT: &str = "Prints each line that occurs more than once in the given files, with \
    the number of times it occurs and the file each occurrence came from.";
const SECTIONS: &[Section] = &[
    Section {
        title: "Arguments:",
        entries: &[Entry {
            item: "<FILE>...",
            caption: "Files to read, in order. At least one is required. A file that can't be \
                opened is reported on standard error and skipped.",
        }],
    },
    Section {
        title: "Options:",
        entries: &[
            Entry {
                item: "--color <WHEN>",
                caption: "When to color this message: auto, always, or never",
            },
            Entry { item: "-h, --help", caption: "Print help" },
            Entry { item: "-V, --version", caption: "Print version" },
        ],
    },
];
const OUTPUT: &str = "Each output line holds the count, the line itself, and the bracketed \
    list of files, separated by tabs. A file is listed once per occurrence, in the order the \
    occurrences were read. Duplicated lines are reported in no particular order.";

const INDENT: &str = "  ";
const BLANKS: &str = "                                        ";

/// Prints the help message to standard output
pub fn print(color: ColorChoice) -> Result<()> {
    let mut stdout = anstream::AutoStream::new(std::io::stdout().lock(), color.into());
    let text = render(*LINE_WIDTH);
    if let Err(e) = stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush()) {
        bail!("failed printing to stdout: {e}");
    }
    Ok(())
}

/// The version line: the styled program name and the crate version
fn version() -> String {
    format!("{} {}", styled(Role::AppName, NAME), env!("CARGO_PKG_VERSION"))
}

fn render(line_width: usize) -> String {
    let mut help = String::new();
    push_line(&mut help, &version());
    for text in wrap(ABOUT, line_width) {
        push_line(&mut help, &text);
    }
    push_line(&mut help, "");
    let usage =
        format!("{}{}{}", styled(Role::Title, "Usage: "), styled(Role::AppName, NAME), USAGE_ARGS);
    push_line(&mut help, &usage);
    for section in SECTIONS {
        push_line(&mut help, "");
        push_line(&mut help, &styled(Role::Title, section.title).to_string());
        for text in section.lines(line_width) {
            push_line(&mut help, &text);
        }
    }
    push_line(&mut help, "");
    for text in wrap(OUTPUT, line_width) {
        push_line(&mut help, &text);
    }
    help
}

fn push_line(help: &mut String, line: &str) {
    help.push_str(line);
    help.push('\n');
}

impl Section {
    /// Lines for the section's entries. Captions start in a common column if
    /// the items are short enough; a longer item gets its own line, with its
    /// caption on the lines below.
    fn lines(&self, line_width: usize) -> Vec<String> {
        let widest = self.entries.iter().map(|e| e.item.len()).max().unwrap_or(0);
        let column = (INDENT.len() + widest + 2).min(line_width / 2).min(BLANKS.len());
        let hanging = &BLANKS[..column];
        let mut lines = Vec::new();
        for entry in self.entries {
            let item = styled(Role::Item, entry.item);
            if INDENT.len() + item.width() + 2 <= column {
                let pad = &BLANKS[..column - INDENT.len() - item.width()];
                let first = format!("{INDENT}{item}{pad}");
                let options =
                    Options::new(line_width).initial_indent(&first).subsequent_indent(hanging);
                lines.extend(wrap(entry.caption, options).into_iter().map(String::from));
            } else {
                lines.push(format!("{INDENT}{item}"));
                lines.extend(Self::hanging(entry.caption, hanging, line_width));
            }
        }
        lines
    }

    fn hanging(caption: &str, indent: &str, line_width: usize) -> Vec<String> {
        let options = Options::new(line_width).initial_indent(indent).subsequent_indent(indent);
        wrap(caption, options).into_iter().map(String::from).collect()
    }
}

static LINE_WIDTH: Lazy<usize> = Lazy::new(|| {
    fn from_env() -> Option<usize> {
        std::env::var_os("COLUMNS")?.to_str()?.parse::<usize>().ok()
    }
    match terminal_size() {
        Some((Width(width), _)) => usize::from(width),
        None => from_env().unwrap_or(100),
    }
});
