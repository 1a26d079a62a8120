//! Risk analysis command

use ruralaudit::adapters;
use ruralaudit::config::Config;
use ruralaudit::output::{AnalysisReport, OutputMode};

use super::session::Session;

/// Ask the AI service for a verdict on the loaded audit
///
/// Succeeds even when the fallback verdict is used; the session's alert
/// notification says so.
pub async fn analyze(config: &Config, mode: OutputMode) -> anyhow::Result<bool> {
    let mut session = Session::open(config).await;
    let analyzer = adapters::analyzer_from_config(config);

    let outcome = session.store.analyze(&analyzer).await;
    let report = AnalysisReport {
        result: outcome.result,
        degraded: outcome.degraded,
    };
    session.finish(&report, mode).await;
    Ok(true)
}
