//! Share sink: hands a finished share message to the system clipboard.

use crate::error::{Result, TaptalkError};
use std::io::Write;
use std::process::{Command, Stdio};

/// Copies text to the system clipboard in an OS-specific way.
/// - macOS: uses pbcopy
/// - Linux: uses wl-copy, xclip or xsel
/// - Windows: uses clip.exe
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    for &(program, args) in clipboard_commands() {
        match Command::new(program).args(args).stdin(Stdio::piped()).spawn() {
            Ok(child) => return feed(program, child, text),
            Err(e) => tracing::debug!(program, error = %e, "clipboard helper unavailable"),
        }
    }
    Err(TaptalkError::Share(
        "No clipboard helper found (install wl-clipboard, xclip or xsel)".to_string(),
    ))
}

type Helper = (&'static str, &'static [&'static str]);

const MACOS_HELPERS: &[Helper] = &[("pbcopy", &[])];
const WINDOWS_HELPERS: &[Helper] = &[("clip", &[])];
const UNIX_HELPERS: &[Helper] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

fn clipboard_commands() -> &'static [Helper] {
    if cfg!(target_os = "macos") {
        MACOS_HELPERS
    } else if cfg!(target_os = "windows") {
        WINDOWS_HELPERS
    } else {
        UNIX_HELPERS
    }
}

fn feed(program: &str, mut child: std::process::Child, text: &str) -> Result<()> {
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| TaptalkError::Share(format!("Failed to write to {}: {}", program, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| TaptalkError::Share(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(TaptalkError::Share(format!("{} exited with error", program)))
    }
}
