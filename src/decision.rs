use crate::actions::{Action, Session, State, actions};
use crate::changeset::ChangeRecord;
use crate::constants::HELP_KEY;
use crate::ui::KeySource;
use anyhow::Result;
use colored::Colorize;

/// walk the operator through `records` one keystroke at a time
///
/// returns the records with their decisions, or an empty list if the operator
/// quit; an empty input returns immediately without reading a key
pub fn decide(
    records: Vec<ChangeRecord>,
    keys: &mut dyn KeySource,
    session: &mut Session<'_>,
) -> Result<Vec<ChangeRecord>> {
    let workflow = session.workflow;
    if records.is_empty() {
        writeln!(session.out, "{}", workflow.nothing_to_do().cyan())?;
        return Ok(records);
    }

    let key_list: String = actions(workflow)
        .iter()
        .map(|a| a.key())
        .chain([HELP_KEY])
        .collect();
    let prompt = format!("{} [{}]: ", workflow.question(), key_list);

    let mut state = State::new(records);
    while !state.is_done() {
        let record = &state.records[state.cursor];
        writeln!(
            session.out,
            "{} ({}/{})",
            record,
            state.cursor + 1,
            state.records.len()
        )?;
        write!(session.out, "{}", prompt.cyan())?;
        session.out.flush()?;

        let key = keys.read_key()?;
        writeln!(session.out, "{key}")?;

        if key == HELP_KEY {
            for action in actions(workflow) {
                let line = format!("  {}: {}", action.key(), action.description(workflow));
                writeln!(session.out, "{}", line.yellow())?;
            }
            continue;
        }

        // the action alone decides where the cursor goes
        match Action::from_key(workflow, key) {
            Some(action) => state = action.apply(state, session)?,
            None => {
                let message = format!("No such action: {key}");
                writeln!(session.out, "{}", message.yellow())?;
            }
        }
    }

    Ok(state.records)
}
