//! General notes command

use ruralaudit::config::Config;
use ruralaudit::output::{NotesResult, OutputMode};

use super::session::Session;

/// Show the general notes, or replace them when `text` is given
pub async fn notes(config: &Config, text: Option<String>, mode: OutputMode) -> anyhow::Result<bool> {
    let mut session = Session::open(config).await;

    if let Some(text) = text {
        session.store.set_general_notes(text);
    }

    let result = NotesResult {
        general_notes: session.store.state().general_notes.clone(),
    };
    session.finish(&result, mode).await;
    Ok(true)
}
