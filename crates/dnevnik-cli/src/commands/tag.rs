//! Tag command handlers

use anyhow::Result;

use dnevnik_core::{query, Session};

use crate::output::Output;

/// List all tags with usage counts
pub fn list(session: &Session, output: &Output) -> Result<()> {
    let tags = query::tags_with_counts(session.entries());
    output.print_tags(&tags);
    Ok(())
}
