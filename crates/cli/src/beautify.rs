//! Beautification through an external formatter such as `js-beautify -`.

use graphsniper_pipeline::Beautify;
use std::io::Write;
use std::process::{Command, Stdio};

/// Pipes each document through a command's stdin and reads stdout back.
///
/// Any failure (spawn error, non-zero exit, empty or non-UTF-8 output)
/// leaves the document as it was.
#[derive(Debug, Clone)]
pub struct CommandBeautifier {
    program: String,
    args: Vec<String>,
}

impl CommandBeautifier {
    /// Build from `[program, args...]`; `None` for an empty command.
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl Beautify for CommandBeautifier {
    fn beautify(&self, text: &str) -> Option<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| tracing::debug!(program = %self.program, error = %e, "Beautifier unavailable"))
            .ok()?;
        let mut stdin = child.stdin.take()?;

        // Feed stdin from another thread so a full stdout pipe cannot deadlock us.
        let output = std::thread::scope(|scope| {
            scope.spawn(move || {
                let _ = stdin.write_all(text.as_bytes());
            });
            child.wait_with_output()
        })
        .ok()?;

        if !output.status.success() {
            tracing::debug!(program = %self.program, status = %output.status, "Beautifier failed");
            return None;
        }
        String::from_utf8(output.stdout)
            .ok()
            .filter(|beautified| !beautified.trim().is_empty())
    }
}
