//! Entry command handlers

use anyhow::{bail, Context, Result};

use dnevnik_core::{query, Entry, Session};

use crate::output::Output;
use crate::prompt::confirm;

/// List entries grouped by day, optionally filtered by tag
pub fn list(session: &Session, tag: Option<String>, output: &Output) -> Result<()> {
    let entries: Vec<&Entry> = match &tag {
        Some(t) => session
            .entries()
            .iter()
            .filter(|entry| entry.tags.iter().any(|name| name == t))
            .collect(),
        None => session.entries().iter().collect(),
    };

    output.print_grouped(&entries);
    Ok(())
}

/// Show a single entry
pub fn show(session: &Session, id: String, output: &Output) -> Result<()> {
    let id = resolve_entry_id(session, &id)?;

    let entry = session
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Entry not found: {}", id))?;

    output.print_entry(entry);
    Ok(())
}

/// Delete an entry
pub fn delete(session: &mut Session, id: String, output: &Output) -> Result<()> {
    let id = resolve_entry_id(session, &id)?;

    let entry = session
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Entry not found: {}", id))?;

    // Confirm deletion
    if output.should_prompt() {
        println!("Delete entry: {} {}", entry.emoji, entry.title);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    session.delete(&id).context("Failed to delete entry")?;

    output.success(&format!("Deleted entry: {}", id));

    Ok(())
}

/// Search entries by substring query
pub fn search(session: &Session, query_text: String, output: &Output) -> Result<()> {
    let matches = query::search(session.entries(), &query_text);

    if matches.is_empty() && output.should_prompt() {
        println!("Nothing found for '{}'.", query_text);
        return Ok(());
    }

    output.print_grouped(&matches);
    Ok(())
}

/// Resolve an entry id, accepting a unique prefix
pub fn resolve_entry_id(session: &Session, id: &str) -> Result<String> {
    // Exact match first
    if session.get(id).is_some() {
        return Ok(id.to_string());
    }

    // Try prefix match
    let matches: Vec<&Entry> = session
        .entries()
        .iter()
        .filter(|entry| entry.id.starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No entry found matching: {}", id),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple entries match '{}':", id);
            for entry in &matches {
                eprintln!("  {} - {}", entry.id, entry.title);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}
