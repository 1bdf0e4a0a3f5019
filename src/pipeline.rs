use crate::actions::{Session, Workflow};
use crate::changeset::ChangeRecord;
use crate::commit;
use crate::config::Config;
use crate::decision::decide;
use crate::git::{self, Runner};
use crate::ui::{KeySource, Terminal};
use crate::warning;
use anyhow::{Context, Result};
use std::io::Write;

/// a resolved workflow ready to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub workflow: Workflow,
    /// command-line tokens after the command word, passed to git commit
    pub args: Vec<String>,
}

/// the outside world a pipeline runs against
pub struct Env<'a> {
    pub terminal: &'a mut dyn Terminal,
    pub keys: &'a mut dyn KeySource,
    pub runner: &'a mut dyn Runner,
    pub out: &'a mut dyn Write,
    pub config: &'a Config,
}

/// raw input mode for as long as this is alive
struct RawMode<'t> {
    terminal: &'t mut dyn Terminal,
}

impl<'t> RawMode<'t> {
    fn enter(terminal: &'t mut dyn Terminal) -> Result<Self> {
        terminal
            .enter_raw()
            .context("this command requires an interactive terminal")?;
        Ok(Self { terminal })
    }
}

impl Drop for RawMode<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.terminal.restore_cooked() {
            warning!("failed to restore terminal mode: {}", e);
        }
    }
}

impl Pipeline {
    pub fn new(workflow: Workflow, args: Vec<String>) -> Self {
        Self { workflow, args }
    }

    /// raw mode, review, cooked mode, then commit
    ///
    /// cooked mode is restored exactly once however the review ends
    pub fn run(&self, env: &mut Env<'_>) -> Result<()> {
        let decided = {
            let _raw = RawMode::enter(&mut *env.terminal)?;
            let mut session = Session {
                workflow: self.workflow,
                config: env.config,
                runner: &mut *env.runner,
                out: &mut *env.out,
            };
            self.review(&mut *env.keys, &mut session)?
        };

        commit::commit(
            self.workflow,
            &decided,
            &self.args,
            &mut *env.runner,
            &mut *env.out,
        )
    }

    fn review(
        &self,
        keys: &mut dyn KeySource,
        session: &mut Session<'_>,
    ) -> Result<Vec<ChangeRecord>> {
        let records = match self.workflow {
            Workflow::Record => git::list_changes(session.runner)?,
            Workflow::Add => git::list_untracked(session.runner)?,
        };
        decide(records, keys, session)
    }
}
