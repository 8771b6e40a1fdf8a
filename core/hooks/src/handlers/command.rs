//! Command handler: executes an external process.
//!
//! The command receives the full `HookContext` as JSON on stdin and is
//! expected to return a JSON `HookResult` on stdout, e.g.:
//!
//! ```json
//! { "action": "continue" }
//! { "action": "reject", "reason": "..." }
//! ```
//!
//! Environment variables set for the command:
//! - `CLAUDE_PROJECT_DIR` - working directory
//! - `CLAUDE_SESSION_ID` - current session ID
//! - `HOOK_EVENT` - event type name (e.g. "pre_compact")
//! - `HOOK_TOOL_NAME` - tool name, if applicable
//!
//! Exit code semantics:
//! - 0: success, parse stdout for a `HookResult`
//! - 2: block the action, stderr becomes the rejection reason
//! - anything else: error, logged but not blocking, returns `Continue`

use tracing::debug;
use tracing::warn;

use crate::context::HookContext;
use crate::result::HookResult;

/// Executes an external command as a hook handler.
pub struct CommandHandler;

impl CommandHandler {
    pub async fn execute(command: &str, args: &[String], ctx: &HookContext) -> HookResult {
        let ctx_json = match serde_json::to_string(ctx) {
            Ok(j) => j,
            Err(e) => {
                warn!("Failed to serialize hook context: {e}");
                return HookResult::Continue;
            }
        };

        debug!(command, ?args, event_type = %ctx.event_type.as_str(), "Executing command hook");

        let result = tokio::process::Command::new(command)
            .args(args)
            .current_dir(&ctx.working_dir)
            .env("CLAUDE_PROJECT_DIR", ctx.working_dir.to_string_lossy().as_ref())
            .env("CLAUDE_SESSION_ID", &ctx.session_id)
            .env("HOOK_EVENT", ctx.event_type.as_str())
            .env("HOOK_TOOL_NAME", ctx.tool_name.as_deref().unwrap_or(""))
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn();

        let mut child = match result {
            Ok(c) => c,
            Err(e) => {
                warn!("Failed to spawn hook command '{command}': {e}");
                return HookResult::Continue;
            }
        };

        if let Some(mut stdin) = child.stdin.take() {
            use tokio::io::AsyncWriteExt;
            if let Err(e) = stdin.write_all(ctx_json.as_bytes()).await {
                warn!("Failed to write to hook command stdin: {e}");
            }
            drop(stdin);
        }

        let output = match child.wait_with_output().await {
            Ok(o) => o,
            Err(e) => {
                warn!("Failed to wait for hook command: {e}");
                return HookResult::Continue;
            }
        };

        if !output.status.success() {
            let exit_code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr);

            if exit_code == 2 {
                let reason = if stderr.trim().is_empty() {
                    "Hook blocked execution (exit code 2)".to_string()
                } else {
                    stderr.trim().to_string()
                };
                debug!(command, %reason, "Hook command blocked action (exit code 2)");
                return HookResult::Reject { reason };
            }

            warn!(command, exit_code, stderr = %stderr, "Hook command exited with error");
            return HookResult::Continue;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            return HookResult::Continue;
        }

        match serde_json::from_str::<HookResult>(stdout.trim()) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Failed to parse hook command output as HookResult");
                HookResult::Continue
            }
        }
    }
}

#[cfg(test)]
#[path = "command.test.rs"]
mod tests;
