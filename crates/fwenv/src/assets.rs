//! Asset-generation step invocation.
//!
//! The asset pipeline itself is opaque to this tool; it is configured as a
//! program plus arguments in the settings file and run as a blocking
//! subprocess before definitions are computed. Its exit code is logged but
//! never fails the build, matching how the firmware projects this tool
//! serves have always treated it.

use std::path::Path;
use std::process::Command;
use tracing::{info, warn};

/// Run the configured asset command in the project directory, if any.
pub fn run(dir: &Path, command: &[String]) {
    let Some((program, args)) = command.split_first() else {
        return;
    };

    info!("running asset step: {}", command.join(" "));
    match Command::new(program).args(args).current_dir(dir).status() {
        Ok(status) if status.success() => {}
        Ok(status) => {
            warn!("asset step exited with {}, continuing", status);
        }
        Err(err) => {
            warn!("asset step failed to start: {}, continuing", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &[]);
    }

    #[test]
    fn test_failing_command_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        run(
            dir.path(),
            &["sh".to_string(), "-c".to_string(), "exit 3".to_string()],
        );
    }

    #[test]
    fn test_missing_program_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["definitely-not-a-real-program".to_string()]);
    }
}
