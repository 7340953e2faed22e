use crate::error::{Result, WifiError};
use std::process::Command;

/// Run an external tool and return its stdout as lossily decoded UTF-8.
///
/// A tool that exits non-zero still returns whatever it printed; the
/// line-oriented parsers downstream are tolerant of partial output.
/// Only a failure to launch the process at all is an error.
pub fn run(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program).args(args).output().map_err(|e| {
        log::warn!("failed to run {} {}: {}", program, args.join(" "), e);
        WifiError::command_failed(format!("{}: {}", program, e))
    })?;

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Like [`run`], but also captures stderr. The macOS keychain tool reports
/// "not found" on stderr with a zero-length stdout, so callers there need
/// both streams to tell "unknown SSID" from "known but empty key".
pub fn run_with_stderr(program: &str, args: &[&str]) -> Result<(String, String)> {
    let output = Command::new(program).args(args).output().map_err(|e| {
        log::warn!("failed to run {} {}: {}", program, args.join(" "), e);
        WifiError::command_failed(format!("{}: {}", program, e))
    })?;

    Ok((
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    ))
}
