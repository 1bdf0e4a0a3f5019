use crate::changeset::{ChangeRecord, Decision};
use crate::config::Config;
use crate::git::{self, Runner};
use anyhow::{Context, Result};
use std::io::Write;

/// which kind of change the operator is reviewing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    /// unstaged changes to tracked files
    Record,
    /// untracked files
    Add,
}

impl Workflow {
    /// the decision that means "include in the next commit"
    pub fn accept(self) -> Decision {
        match self {
            Self::Record => Decision::Commit,
            Self::Add => Decision::Add,
        }
    }

    pub fn question(self) -> &'static str {
        match self {
            Self::Record => "Record?",
            Self::Add => "Add?",
        }
    }

    pub fn nothing_to_do(self) -> &'static str {
        match self {
            Self::Record => "No changes to record!",
            Self::Add => "No new files; try your .gitignore, maybe?",
        }
    }
}

/// a single-keystroke command offered at the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Accept,
    Reject,
    View,
    Page,
    Edit,
    Done,
    AcceptAll,
    Quit,
    Next,
    Prev,
}

/// prompt order; both workflows offer the same keys
const ACTIONS: [Action; 10] = [
    Action::Accept,
    Action::Reject,
    Action::View,
    Action::Page,
    Action::Edit,
    Action::Done,
    Action::AcceptAll,
    Action::Quit,
    Action::Next,
    Action::Prev,
];

/// the fixed action registry for `workflow`
pub fn actions(_workflow: Workflow) -> &'static [Action] {
    &ACTIONS
}

/// review progress: the records and the index of the one being decided
///
/// `cursor == records.len()` means review is over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub records: Vec<ChangeRecord>,
    pub cursor: usize,
}

impl State {
    pub fn new(records: Vec<ChangeRecord>) -> Self {
        Self { records, cursor: 0 }
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.records.len()
    }
}

/// everything an action may touch besides the review state
pub struct Session<'a> {
    pub workflow: Workflow,
    pub config: &'a Config,
    pub runner: &'a mut dyn Runner,
    pub out: &'a mut dyn Write,
}

impl Action {
    pub fn key(self) -> char {
        match self {
            Self::Accept => 'y',
            Self::Reject => 'n',
            Self::View => 'v',
            Self::Page => 'p',
            Self::Edit => 'e',
            Self::Done => 'd',
            Self::AcceptAll => 'a',
            Self::Quit => 'q',
            Self::Next => 'j',
            Self::Prev => 'k',
        }
    }

    pub fn from_key(workflow: Workflow, key: char) -> Option<Self> {
        actions(workflow).iter().copied().find(|a| a.key() == key)
    }

    pub fn description(self, workflow: Workflow) -> &'static str {
        use Workflow::{Add, Record};

        match (self, workflow) {
            (Self::Accept, Record) => "Yes, commit this change.",
            (Self::Accept, Add) => "Yes, add this file.",
            (Self::Reject, Record) => "No, don't commit this change.",
            (Self::Reject, Add) => "No, don't add this file.",
            (Self::View, Record) => "View this patch.",
            (Self::View, Add) => "View this file.",
            (Self::Page, Record) => "View this patch in a pager.",
            (Self::Page, Add) => "View this file in a pager.",
            (Self::Edit, _) => "Edit this file.",
            (Self::Done, _) => "Done, skip to commit step.",
            (Self::AcceptAll, Record) => "Record all remaining changes.",
            (Self::AcceptAll, Add) => "Add all remaining files.",
            (Self::Quit, _) => "Quit, skip commit step.",
            (Self::Next, Record) => "Jump to next change.",
            (Self::Next, Add) => "Jump to next file.",
            (Self::Prev, Record) => "Go back to previous change.",
            (Self::Prev, Add) => "Go back to previous file.",
        }
    }

    /// run this action against `state`, returning the new state
    pub fn apply(self, state: State, session: &mut Session<'_>) -> Result<State> {
        let State {
            mut records,
            cursor,
        } = state;
        let end = records.len();
        let accept = session.workflow.accept();

        let cursor = match self {
            Self::Accept | Self::Reject => {
                if let Some(record) = records.get_mut(cursor) {
                    record.decision = Some(if self == Self::Accept {
                        accept
                    } else {
                        Decision::Skip
                    });
                }
                (cursor + 1).min(end)
            }
            Self::View | Self::Page | Self::Edit => {
                if let Some(record) = records.get(cursor) {
                    match self {
                        Self::View => view(record, session)?,
                        Self::Page => page(record, session)?,
                        _ => edit(record, session)?,
                    }
                }
                cursor
            }
            Self::Done => end,
            Self::AcceptAll => {
                for record in records.iter_mut().skip(cursor) {
                    record.decision = Some(accept);
                }
                end
            }
            Self::Quit => {
                records.clear();
                0
            }
            Self::Next => (cursor + 1).min(end),
            Self::Prev => cursor.saturating_sub(1),
        };

        Ok(State { records, cursor })
    }
}

/// the diff (record) or file contents (add) shown by view and page
fn content(record: &ChangeRecord, session: &mut Session<'_>) -> Result<String> {
    match session.workflow {
        Workflow::Record => Ok(git::diff(session.runner, &record.filename)?),
        Workflow::Add => {
            let path = session.runner.working_dir().join(&record.filename);
            let bytes = std::fs::read(&path)
                .with_context(|| format!("failed to read {}", record.filename))?;
            if bytes.contains(&0) {
                Ok(format!("(binary file, {} bytes)\n", bytes.len()))
            } else {
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
    }
}

fn view(record: &ChangeRecord, session: &mut Session<'_>) -> Result<()> {
    let text = content(record, session)?;
    write!(session.out, "{text}")?;
    if !text.is_empty() && !text.ends_with('\n') {
        writeln!(session.out)?;
    }
    session.out.flush()?;
    Ok(())
}

fn page(record: &ChangeRecord, session: &mut Session<'_>) -> Result<()> {
    let text = content(record, session)?;
    session.runner.shell(&session.config.pager, Some(&text))?;
    Ok(())
}

fn edit(record: &ChangeRecord, session: &mut Session<'_>) -> Result<()> {
    // run via shell so arguments in the editor variable work
    let quoted = shlex::try_quote(&record.filename)
        .with_context(|| format!("cannot pass {} to the editor", record.filename))?;
    let command = format!("{} {}", session.config.editor, quoted);
    session.runner.shell(&command, None)?;
    Ok(())
}
