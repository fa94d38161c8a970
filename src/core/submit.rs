use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::error::{PbsDoError, Result};

/// Hand one script file to the scheduler's submission command.
///
/// Runs `<submit_command> <script>` in `dir` and waits for it to finish.
pub fn submit(script: &str, submit_command: &str, dir: &Path) -> Result<()> {
    info!("Submitting {} with {}", script, submit_command);
    let status = Command::new(submit_command)
        .arg(script)
        .current_dir(dir)
        .status()?;

    if !status.success() {
        return Err(PbsDoError::SubmitFailed {
            command: format!("{} {}", submit_command, script),
            status: status.code().unwrap_or(-1),
        });
    }
    Ok(())
}
