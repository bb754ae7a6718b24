use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use log::{debug, info};
use crate::error::{PluginError, Result};

/// Looks a program up on `PATH`. Absolute paths are checked directly.
pub fn resolve(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}

/// Spawns `command[0]` with the rest as arguments and does not wait for it.
/// The child gets its own process group and null stdio so it outlives the launcher.
pub fn run_detached(command: &[String]) -> Result<()> {
    let Some((program, args)) = command.split_first() else {
        return Err(PluginError::EmptyCommand);
    };

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .process_group(0);

    let child = cmd.spawn().map_err(|source| PluginError::Spawn {
        program: program.clone(),
        source,
    })?;
    info!("Spawned {} (pid {})", program, child.id());
    debug!("Arguments: {:?}", args);
    Ok(())
}
