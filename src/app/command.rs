// SPDX-License-Identifier: MPL-2.0
//! Commands of the `metrics-view` binary.

use super::App;
use crate::error::{Error, Result};
use crate::i18n::FluentArgs;
use crate::store::MetricRecord;
use crate::theme::ThemeMode;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum ThemeChange {
    Set(ThemeMode),
    Toggle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the current state.
    Show,
    /// Print the theme, or change it.
    Theme(Option<ThemeChange>),
    /// Select the alignment method.
    Align(String),
    /// Replace a dataset with the records of a JSON file.
    Import { path: PathBuf, shift: bool },
    /// Empty a dataset.
    Clear { shift: bool },
    /// Print a translated message.
    Tr(String),
    /// List registered locales.
    Locales,
}

/// Converts the arguments left after flag parsing, rejecting non-UTF-8 ones.
pub fn free_args(raw: Vec<OsString>) -> Result<Vec<String>> {
    raw.into_iter()
        .map(|arg| {
            arg.into_string().map_err(|arg| {
                Error::Usage(format!(
                    "argument is not valid UTF-8: {}",
                    arg.to_string_lossy()
                ))
            })
        })
        .collect()
}

impl Command {
    /// Parses the free arguments left after flags were consumed.
    pub fn parse(args: &[String]) -> Result<Self> {
        let (name, rest) = match args.split_first() {
            Some((name, rest)) => (name.as_str(), rest),
            None => return Ok(Command::Show),
        };
        let shift = rest.iter().any(|a| a == "--shift");
        let positional: Vec<&str> = rest
            .iter()
            .map(String::as_str)
            .filter(|a| *a != "--shift")
            .collect();

        match (name, positional.as_slice()) {
            ("show", []) => Ok(Command::Show),
            ("theme", []) => Ok(Command::Theme(None)),
            ("theme", ["toggle"]) => Ok(Command::Theme(Some(ThemeChange::Toggle))),
            ("theme", [mode]) => mode
                .parse::<ThemeMode>()
                .map(|mode| Command::Theme(Some(ThemeChange::Set(mode))))
                .map_err(|err| Error::Usage(err.to_string())),
            ("align", [method]) => Ok(Command::Align((*method).to_string())),
            ("import", [path]) => Ok(Command::Import {
                path: PathBuf::from(*path),
                shift,
            }),
            ("clear", []) => Ok(Command::Clear { shift }),
            ("tr", [key]) => Ok(Command::Tr((*key).to_string())),
            ("locales", []) => Ok(Command::Locales),
            _ => Err(Error::Usage(format!(
                "unrecognized command: {}\n\n{}",
                args.join(" "),
                USAGE
            ))),
        }
    }

    pub fn run(&self, app: &App, out: &mut impl Write) -> Result<()> {
        match self {
            Command::Show => show(app, out),
            Command::Theme(None) => {
                writeln!(out, "{}", app.stores.theme.get())?;
                Ok(())
            }
            Command::Theme(Some(change)) => {
                match change {
                    ThemeChange::Set(mode) => app.stores.theme.set(*mode),
                    ThemeChange::Toggle => app.stores.theme.update(|mode| *mode = mode.toggle()),
                }
                writeln!(out, "{}", app.stores.theme.get())?;
                Ok(())
            }
            Command::Align(method) => {
                app.stores.align_method.set(method.clone());
                Ok(())
            }
            Command::Import { path, shift } => {
                app.timer.time_start(Some("import"));
                let records = read_records(path);
                app.timer.time_end(Some("import"));

                let records = records?;
                let count = records.len();
                app.stores.dataset(*shift).set(records);

                writeln!(out, "{}", records_line(app, count))?;
                Ok(())
            }
            Command::Clear { shift } => {
                app.stores.dataset(*shift).set(Vec::new());
                Ok(())
            }
            Command::Tr(key) => {
                writeln!(out, "{}", app.i18n.tr(key))?;
                Ok(())
            }
            Command::Locales => {
                for code in app.i18n.available_locales() {
                    let marker = if code == app.i18n.current_locale() { "*" } else { " " };
                    writeln!(out, "{} {}", marker, code)?;
                }
                Ok(())
            }
        }
    }
}

pub const USAGE: &str = "\
Usage: metrics-view [--lang CODE] [--data-dir DIR] [--config-dir DIR] [--no-storage] <command>

Commands:
  show                      print the current state (default)
  theme [light|dark|toggle] print or change the theme
  align <method>            select the alignment method
  import <file> [--shift]   load a JSON array of records into a dataset
  clear [--shift]           empty a dataset
  tr <key>                  print a translated message
  locales                   list available locales";

fn read_records(path: &Path) -> Result<Vec<MetricRecord>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn records_line(app: &App, count: usize) -> String {
    let mut args = FluentArgs::new();
    args.set("count", count);
    app.i18n.tr_with_args("dataset-records", &args)
}

fn show(app: &App, out: &mut impl Write) -> Result<()> {
    let i18n = &app.i18n;
    let theme = match app.stores.theme.get() {
        ThemeMode::Light => i18n.tr("theme-light"),
        ThemeMode::Dark => i18n.tr("theme-dark"),
    };
    let align = app.stores.align_method.get();
    let align = if align.is_empty() {
        i18n.tr("align-method-none")
    } else {
        align
    };

    writeln!(out, "{}", i18n.tr("app-title"))?;
    writeln!(out, "{}: {}", i18n.tr("theme-label"), theme)?;
    writeln!(out, "{}: {}", i18n.tr("align-method-label"), align)?;
    writeln!(
        out,
        "{}: {}",
        i18n.tr("metrics-data-label"),
        records_line(app, app.stores.metrics_data.with(Vec::len))
    )?;
    writeln!(
        out,
        "{}: {}",
        i18n.tr("metrics-shift-label"),
        records_line(app, app.stores.metrics_data_shift.with(Vec::len))
    )?;
    writeln!(out, "{}: {}", i18n.tr("language-label"), i18n.current_locale())?;
    Ok(())
}
