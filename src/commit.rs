use crate::actions::Workflow;
use crate::changeset::ChangeRecord;
use crate::git::{self, Runner};
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;

/// stage and commit every record the operator accepted
///
/// `extra` is passed through to git commit; progress is reported on `out`
pub fn commit(
    workflow: Workflow,
    records: &[ChangeRecord],
    extra: &[String],
    runner: &mut dyn Runner,
    out: &mut dyn Write,
) -> Result<()> {
    let accept = workflow.accept();
    let files: Vec<&str> = records
        .iter()
        .filter(|record| record.decision == Some(accept))
        .flat_map(ChangeRecord::paths)
        .collect();

    if files.is_empty() {
        writeln!(out, "{}", "Nothing to commit.".green())?;
        return Ok(());
    }

    let count = match files.len() {
        1 => "1 file".to_string(),
        n => format!("{n} files"),
    };

    if let Err(e) = git::stage(runner, &files) {
        writeln!(out, "{}", format!("failed to stage {count}").red())?;
        return Err(e).context("git add failed");
    }
    writeln!(out, "{}", format!("staged {count}").green())?;

    if let Err(e) = git::commit(runner, extra, &files) {
        writeln!(out, "{}", format!("failed to commit {count}").red())?;
        return Err(e).context("git commit failed");
    }
    writeln!(out, "{}", format!("committed {count}").green())?;

    Ok(())
}
