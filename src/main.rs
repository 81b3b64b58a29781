//! Headless sandwich-stack runner (default binary).
//!
//! Loads a level container, builds the current level and reads moves from
//! stdin, one per line. Each move lifts a whole stack onto another tile,
//! settles the grid and prints the result. See [`command::HELP`].

mod command;
mod config;
mod logger;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use log::warn;

use sandwich_stack::core::{ItemCatalog, RandomSource, SimpleRng};
use sandwich_stack::engine::{LevelSession, Outcome, SettleReport};

use command::{Command, HELP};
use config::CliConfig;

fn main() -> Result<()> {
    let config = CliConfig::from_env();
    logger::init(config.log_level);

    let levels = config.load_levels()?;
    let mut session = LevelSession::new(levels, ItemCatalog::standard(), SimpleRng::new(config.seed));
    if let Some(store) = config.load_layout_store()? {
        session = session.with_layout_store(store);
    }
    session
        .load(config.level)
        .with_context(|| format!("loading level {}", config.level))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = run(&mut session, stdin.lock(), stdout.lock());

    // Always try to keep the layouts generated so far.
    if let Some(store) = session.layout_store() {
        if let Err(e) = config.write_layout_store(store) {
            warn!("{e:#}");
        }
    }
    result
}

fn run<R: RandomSource>(
    session: &mut LevelSession<R>,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<()> {
    print_level(session, &mut out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match Command::parse(&line) {
            Some(Command::Quit) => break,
            Some(Command::Help) => writeln!(out, "{HELP}")?,
            Some(Command::Json) => writeln!(out, "{}", session.snapshot().to_json()?)?,
            Some(Command::Restart) => match session.restart() {
                Ok(_) => print_level(session, &mut out)?,
                Err(e) => writeln!(out, "error: {e}")?,
            },
            Some(Command::NextLevel) => match session.next_level() {
                Ok(_) => print_level(session, &mut out)?,
                Err(e) => writeln!(out, "error: {e}")?,
            },
            Some(Command::Move { from, to }) => match session.transfer_stack(from, to) {
                Ok(0) => writeln!(out, "nothing to move on {from}")?,
                Ok(_) => {
                    let report = session.on_settled();
                    print_report(session, &report, &mut out)?;
                }
                Err(e) => writeln!(out, "error: {e}")?,
            },
            None => writeln!(out, "unrecognized command {:?} (h for help)", line.trim())?,
        }
        out.flush()?;
    }

    Ok(())
}

fn print_level<R: RandomSource>(session: &LevelSession<R>, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "level {} of {}",
        session.level_index() + 1,
        session.level_count()
    )?;
    write!(out, "{}", session.grid().to_ascii())?;
    Ok(())
}

fn print_report<R: RandomSource>(
    session: &LevelSession<R>,
    report: &SettleReport,
    out: &mut impl Write,
) -> Result<()> {
    write!(out, "{}", session.grid().to_ascii())?;
    for err in &report.overflows {
        writeln!(out, "warning: {err}")?;
    }
    match report.outcome {
        Outcome::InProgress => writeln!(out, "{} stacks left", report.occupied.len())?,
        Outcome::Solved(coord) => writeln!(out, "solved! sandwich on {coord} (n for next level)")?,
        Outcome::Failed(Some(coord)) => writeln!(out, "failed on {coord} (r to restart)")?,
        Outcome::Failed(None) => writeln!(out, "failed (r to restart)")?,
    }
    Ok(())
}
