//! Status command - overall audit progress

use ruralaudit::config::Config;
use ruralaudit::core::services::summarize;
use ruralaudit::output::{OutputMode, StatusReport};

use super::session::Session;

/// Show progress across properties and parties
pub async fn status(config: &Config, mode: OutputMode) -> anyhow::Result<bool> {
    let session = Session::open(config).await;
    let state = session.store.state();

    let report = StatusReport {
        offline: session.offline,
        summary: summarize(state),
        active_property: session.store.active_property_id().cloned(),
        general_notes: state.general_notes.clone(),
    };

    session.finish(&report, mode).await;
    Ok(true)
}
