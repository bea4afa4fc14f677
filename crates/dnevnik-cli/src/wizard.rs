//! Five-step entry wizard
//!
//! Drives the session through the steps: situation, thoughts, body
//! sensations, consequences, life without the problem. The first step
//! blocks until situation text is entered; every other step may be left
//! empty. Nothing is persisted until the final confirmation.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::io::{self, Write};

use dnevnik_core::{BodyZone, DraftField, Session};

use crate::commands::entry::resolve_entry_id;
use crate::output::Output;
use crate::prompt::{confirm, prompt_field, read_multiline};

/// Run the wizard to create a new entry
pub fn run_create(session: &mut Session, output: &Output) -> Result<()> {
    session.reset();

    println!();
    println!("New entry. Five short steps; finish each text with an empty line.");

    // Step 1: situation (required)
    let situation = loop {
        step_header(1, "Situation", "What happened?");
        match read_multiline()? {
            Some(text) if !text.trim().is_empty() => break text,
            Some(_) => {
                println!("Situation text is required to continue.");
            }
            None => return cancel(session, output),
        }
    };
    session.update_field(DraftField::Situation(situation));

    // Step 2: thoughts
    step_header(2, "Thoughts", "What went through your mind?");
    match read_multiline()? {
        Some(text) => session.update_field(DraftField::Thoughts(text)),
        None => return cancel(session, output),
    }

    // Step 3: body sensations
    step_header(3, "Body", "What did you feel in your body?");
    match read_multiline()? {
        Some(text) => session.update_field(DraftField::BodyFeelings(text)),
        None => return cancel(session, output),
    }
    let zones = prompt_body_zones(&[])?;
    session.update_field(DraftField::BodyZones(zones));

    // Step 4: consequences
    step_header(4, "Consequences", "What did it lead to?");
    match read_multiline()? {
        Some(text) => session.update_field(DraftField::Consequences(text)),
        None => return cancel(session, output),
    }

    // Step 5: life without the problem
    step_header(5, "Without the problem", "How would this day look without it?");
    match read_multiline()? {
        Some(text) => session.update_field(DraftField::WithoutProblem(text)),
        None => return cancel(session, output),
    }

    if output.should_prompt() && !confirm_save("Save this entry?")? {
        return cancel(session, output);
    }

    let entry = session.commit_new().context("Failed to save entry")?;
    output.success(&format!("Saved entry: {}", entry.id));
    output.print_entry(&entry);

    Ok(())
}

/// Run the wizard over an existing entry
///
/// Each field shows its current value; Enter keeps it, typed text
/// replaces it, and `e` opens $EDITOR pre-filled. `date` is the
/// explicit override for the recorded date/time.
pub fn run_edit(
    session: &mut Session,
    id: String,
    date: Option<DateTime<Utc>>,
    output: &Output,
) -> Result<()> {
    let id = resolve_entry_id(session, &id)?;

    if !session.load_for_editing(&id) {
        anyhow::bail!("Entry not found: {}", id);
    }

    println!();
    println!("Editing entry: {}", id);
    println!("Press Enter to keep a value, type to replace it, or 'e' to open $EDITOR.\n");

    let draft = session.draft().clone();

    if let Some(text) = prompt_field("Situation", &draft.situation)? {
        session.update_field(DraftField::Situation(text));
    }
    if let Some(text) = prompt_field("Thoughts", &draft.thoughts)? {
        session.update_field(DraftField::Thoughts(text));
    }
    if let Some(text) = prompt_field("Body feelings", &draft.body_feelings)? {
        session.update_field(DraftField::BodyFeelings(text));
    }

    let zones = prompt_body_zones(&draft.body_zones)?;
    session.update_field(DraftField::BodyZones(zones));

    if let Some(text) = prompt_field("Consequences", &draft.consequences)? {
        session.update_field(DraftField::Consequences(text));
    }
    if let Some(text) = prompt_field("Without the problem", &draft.without_problem)? {
        session.update_field(DraftField::WithoutProblem(text));
    }

    if session.draft().situation.trim().is_empty() {
        session.reset();
        anyhow::bail!("Situation text cannot be empty.");
    }

    if output.should_prompt() && !confirm_save("Save changes?")? {
        return cancel(session, output);
    }

    match session.commit_update(date).context("Failed to update entry")? {
        Some(entry) => {
            output.success(&format!("Updated entry: {}", entry.id));
            output.print_entry(&entry);
        }
        None => {
            session.reset();
            output.message("Entry no longer exists; nothing was updated.");
        }
    }

    Ok(())
}

/// Final save gate: declining save requires confirming the discard
///
/// Returns true once the user agrees to save; false once they confirm
/// throwing the draft away.
fn confirm_save(prompt: &str) -> Result<bool> {
    // Piped input cannot answer prompts; save what was entered
    if !atty::is(atty::Stream::Stdin) {
        return Ok(true);
    }

    loop {
        if confirm(prompt)? {
            return Ok(true);
        }
        if confirm("Discard unsaved changes?")? {
            return Ok(false);
        }
    }
}

/// Discard the draft and report cancellation
fn cancel(session: &mut Session, output: &Output) -> Result<()> {
    session.reset();
    output.message("Cancelled.");
    Ok(())
}

fn step_header(number: usize, title: &str, hint: &str) {
    println!();
    println!("Step {}/5: {}", number, title);
    println!("({})", hint);
}

/// Prompt for body zone selection
///
/// Shows the fixed zone list with numbers; the user enters numbers
/// separated by spaces or commas. Empty input keeps the current
/// selection.
fn prompt_body_zones(current: &[BodyZone]) -> Result<Vec<BodyZone>> {
    println!("Body zones:");
    for (i, zone) in BodyZone::ALL.iter().enumerate() {
        let marker = if current.contains(zone) { "x" } else { " " };
        println!("  [{}] {}. {}", marker, i + 1, zone.label());
    }
    print!("Select numbers (e.g. 1 3), Enter to keep: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() {
        return Ok(current.to_vec());
    }

    let mut zones = Vec::new();
    for token in input.split([' ', ',']).filter(|t| !t.is_empty()) {
        match token.parse::<usize>() {
            Ok(n) if (1..=BodyZone::ALL.len()).contains(&n) => {
                let zone = BodyZone::ALL[n - 1];
                if !zones.contains(&zone) {
                    zones.push(zone);
                }
            }
            _ => println!("Ignoring '{}': not a zone number.", token),
        }
    }

    Ok(zones)
}
