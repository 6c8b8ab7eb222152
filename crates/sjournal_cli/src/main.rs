//! `sjournal` command-line entry point.
//!
//! # Responsibility
//! - Resolve config, bootstrap logging and open the active journal.
//! - Dispatch one subcommand per process and render its result.
//! - Persist the current journal name for the `load` command.

mod cli;
mod prompt;
mod render;

use clap::Parser;
use cli::{CliArgs, Command};
use log::{error, info, warn};
use sjournal_core::db::open_db;
use sjournal_core::{
    EditRequest, JournalConfig, JournalService, NewNote, Note, Quantity, SearchOptions,
    SqliteNoteRepository,
};
use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn Error>>;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> CliResult<()> {
    let config_path = args.resolve_config_path();
    let mut config = JournalConfig::load(&config_path)?;

    if let Some(Command::Load { journal_name }) = &args.command {
        config = config.with_journal_name(journal_name.as_str())?;
        config.save(&config_path)?;
        println!("Set journal to {}", config.db_path().display());
    }

    config.ensure_journal_dir()?;
    init_cli_logging(&config, &args.resolve_log_level());

    match &args.command {
        Some(Command::Backup { filename }) => {
            let written = sjournal_core::backup(&config, filename.as_deref())?;
            println!(
                "Backed up {} to {}",
                config.db_path().display(),
                written.display()
            );
            return Ok(());
        }
        Some(Command::Restore { filename }) => {
            let source = sjournal_core::restore(&config, filename.as_deref())?;
            println!(
                "Restored {} from {}",
                config.db_path().display(),
                source.display()
            );
            return Ok(());
        }
        _ => {}
    }

    let conn = open_db(config.db_path())?;
    let service = JournalService::new(SqliteNoteRepository::try_new(&conn)?);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        None => {
            let notes = service.list(&Default::default())?;
            print_notes(&mut out, &notes, args.json)?;
        }
        Some(Command::Load { .. }) => {}
        Some(Command::Add {
            content,
            category,
            style,
        }) => {
            let request = if content.is_empty() {
                let stdin = io::stdin();
                match prompt::collect_note(&mut stdin.lock(), &mut out)? {
                    Some(input) => NewNote {
                        content_words: vec![input.content],
                        category: Some(input.category),
                        style: input.style,
                    },
                    None => {
                        writeln!(out, "Cancelled.")?;
                        return Ok(());
                    }
                }
            } else {
                NewNote {
                    content_words: content,
                    category: Some(category),
                    style,
                }
            };
            let note = service.add(request)?;
            writeln!(out, "Added note #{}", note.id)?;
        }
        Some(Command::Edit { id, message }) => {
            let target = service.edit_target(id)?;
            let content = match message {
                Some(message) => message,
                None => {
                    let stdin = io::stdin();
                    prompt::collect_edit(&mut stdin.lock(), &mut out, target.id, &target.content)?
                }
            };
            let note = service.edit(EditRequest {
                id: Some(target.id),
                content,
                category: None,
            })?;
            writeln!(out, "Edited note #{}", note.id)?;
        }
        Some(Command::List { quantity, filter }) => {
            let quantity = (!quantity.is_empty()).then(|| Quantity::List(quantity));
            let notes = service.list(&filter.to_options(quantity))?;
            print_notes(&mut out, &notes, args.json)?;
        }
        Some(Command::Search {
            terms,
            quantity,
            filter,
        }) => {
            let options = SearchOptions {
                term: terms.into_iter().next(),
                list: filter.to_options(quantity.map(Quantity::Scalar)),
            };
            let notes = service.search(&options)?;
            print_notes(&mut out, &notes, args.json)?;
        }
        Some(Command::Delete { criteria }) => {
            let report = service.delete(criteria.as_slice())?;
            for id in &report.removed {
                writeln!(out, "Deleted note #{id}")?;
            }
            for token in &report.skipped {
                writeln!(out, "warning: `{token}` matches no note id or range; skipped")?;
            }
        }
        Some(Command::Erase) => {
            let removed = service.erase()?;
            writeln!(out, "Erased {removed} note(s)")?;
        }
        Some(Command::Backup { .. }) | Some(Command::Restore { .. }) => {}
    }

    Ok(())
}

fn print_notes<W: Write>(out: &mut W, notes: &[Note], json: bool) -> io::Result<()> {
    if json {
        render::write_json(out, notes)
    } else {
        render::write_table(out, notes)
    }
}

/// Logs go to `<journal_dir>/logs`; failure to start logging is not fatal.
fn init_cli_logging(config: &JournalConfig, level: &str) {
    let log_dir = match std::fs::canonicalize(&config.journal_dir) {
        Ok(dir) => dir.join("logs"),
        Err(err) => {
            eprintln!("warning: logging disabled: {err}");
            return;
        }
    };
    match sjournal_core::init_logging(level, &log_dir) {
        Ok(()) => info!(
            "event=cli_start module=cli status=ok journal={}",
            config.journal_name
        ),
        Err(err) => {
            eprintln!("warning: logging disabled: {err}");
            warn!("event=cli_start module=cli status=error error={err}");
        }
    }
}
