//! Write a starting config file

use std::path::Path;

use ruralaudit::config::Config;
use ruralaudit::output::{OperationResult, OutputMode, Report};

/// Write the config template to `path`
pub fn init(path: &Path, force: bool, mode: OutputMode) -> anyhow::Result<bool> {
    if path.exists() && !force {
        let result = OperationResult::failed(format!(
            "Config already exists at {}. Use --force to overwrite.",
            path.display()
        ));
        Report::new(&result, &[]).render(mode);
        return Ok(false);
    }

    Config::write_template(path)?;
    let result = OperationResult::ok(format!("Created {}", path.display()));
    Report::new(&result, &[]).render(mode);
    Ok(true)
}
