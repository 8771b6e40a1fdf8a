//! The rolling window of turns sent to the model, plus compaction state
//! once that window has been summarized down.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Message, TokenUsage, ToolResultContent, TrackedMessage, TrackedToolCall, Turn};

/// Tool-result content longer than this many characters is a micro-compaction
/// candidate (see `MessageHistory::micro_compact`).
const MICRO_COMPACT_THRESHOLD_CHARS: usize = 2000;

/// Tunables controlling when and how a [`MessageHistory`] compacts itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub context_window: i32,
    pub compaction_threshold: f32,
    pub max_turns: usize,
    pub auto_compact: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { context_window: 200_000, compaction_threshold: 0.8, max_turns: 100, auto_compact: true }
    }
}

/// Record of the most recent compaction applied to a history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompactionBoundary {
    pub turn_id: String,
    pub turn_number: i32,
    pub turns_compacted: i32,
    pub tokens_saved: i32,
    pub timestamp_ms: i64,
}

/// Builds a [`MessageHistory`] with non-default configuration.
#[derive(Debug, Default)]
pub struct HistoryBuilder {
    config: HistoryConfig,
    system_message: Option<String>,
}

impl HistoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context_window(mut self, context_window: i32) -> Self {
        self.config.context_window = context_window;
        self
    }

    pub fn compaction_threshold(mut self, compaction_threshold: f32) -> Self {
        self.config.compaction_threshold = compaction_threshold;
        self
    }

    pub fn max_turns(mut self, max_turns: usize) -> Self {
        self.config.max_turns = max_turns;
        self
    }

    pub fn system_message(mut self, system_message: impl Into<String>) -> Self {
        self.system_message = Some(system_message.into());
        self
    }

    pub fn build(self) -> MessageHistory {
        let mut history = MessageHistory::with_config(self.config);
        if let Some(system_message) = self.system_message {
            history.set_system_message(TrackedMessage::system(system_message, "system"));
        }
        history
    }
}

/// The turn history a session keeps, compacted down as it grows.
#[derive(Debug)]
pub struct MessageHistory {
    pub config: HistoryConfig,
    pub system_message: Option<TrackedMessage>,
    turns: Vec<Turn>,
    compacted_summary: Option<String>,
    compaction_boundary: Option<CompactionBoundary>,
}

impl MessageHistory {
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default())
    }

    pub fn with_config(config: HistoryConfig) -> Self {
        Self { config, system_message: None, turns: Vec::new(), compacted_summary: None, compaction_boundary: None }
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn current_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn current_turn_mut(&mut self) -> Option<&mut Turn> {
        self.turns.last_mut()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn add_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn set_system_message(&mut self, message: TrackedMessage) {
        self.system_message = Some(message);
    }

    /// Flatten the current turns into the message list sent to the model:
    /// the system message (if any), the compacted summary (if any), then
    /// each turn's user/assistant/tool-result messages in order.
    pub fn messages_for_api(&self) -> Vec<Message> {
        let mut out = Vec::new();

        if let Some(system) = &self.system_message {
            out.push(system.inner.clone());
        }
        if let Some(summary) = &self.compacted_summary {
            out.push(Message::user(format!("<compaction_summary>\n{summary}\n</compaction_summary>")));
        }
        for turn in &self.turns {
            out.push(turn.user_message.inner.clone());
            if let Some(assistant) = &turn.assistant_message {
                out.push(assistant.inner.clone());
            }
            for tool_call in &turn.tool_calls {
                if let Some(message) = tool_call.to_message() {
                    out.push(message);
                }
            }
        }

        out
    }

    /// Rough token estimate for the flattened API-facing message list.
    pub fn estimate_tokens(&self) -> i32 {
        crate::normalization::estimate_tokens(&self.messages_for_api())
    }

    /// Replace oversized tool-result output in turns older than the most
    /// recent `keep_last_n`, without touching turn structure or dropping the
    /// turns themselves. Returns how many tool results were replaced.
    pub fn micro_compact(&mut self, keep_last_n: i32) -> i32 {
        let keep_last_n = keep_last_n.max(0) as usize;
        if keep_last_n >= self.turns.len() {
            return 0;
        }
        let boundary = self.turns.len() - keep_last_n;
        let mut removed = 0;

        for turn in &mut self.turns[..boundary] {
            for tool_call in &mut turn.tool_calls {
                let Some(output) = &tool_call.output else { continue };
                let len = match output {
                    ToolResultContent::Text(text) => text.len(),
                    ToolResultContent::Structured(value) => value.to_string().len(),
                };
                if len > MICRO_COMPACT_THRESHOLD_CHARS {
                    tool_call.output =
                        Some(ToolResultContent::Text("[tool result omitted by micro-compaction]".to_string()));
                    removed += 1;
                }
            }
        }

        removed
    }

    /// Record the outcome of a tool call in the current turn, creating the
    /// tracked tool call if the turn never saw it started (e.g. it completed
    /// so quickly that no separate start event was recorded).
    pub fn add_tool_result(&mut self, call_id: &str, name: &str, output: ToolResultContent, is_error: bool) {
        let Some(turn) = self.turns.last_mut() else { return };

        if turn.get_tool_call_mut(call_id).is_none() {
            turn.add_tool_call(TrackedToolCall::from_parts(call_id, name, Value::Null));
        }
        let tool_call = turn.get_tool_call_mut(call_id).expect("just inserted above");

        if is_error {
            let message = match output {
                ToolResultContent::Text(text) => text,
                ToolResultContent::Structured(value) => value.to_string(),
            };
            tool_call.fail(message);
        } else {
            tool_call.complete(output);
        }
    }

    pub fn total_usage(&self) -> TokenUsage {
        let mut total = TokenUsage::new(0, 0);
        for turn in &self.turns {
            total.input_tokens += turn.usage.input_tokens;
            total.output_tokens += turn.usage.output_tokens;
        }
        total
    }

    /// Replace the oldest `turns.len() - keep_last_n` turns with a summary,
    /// recording where the cut happened so replay/debugging can find it.
    pub fn apply_compaction(
        &mut self,
        summary: String,
        keep_last_n: i32,
        turn_id: impl Into<String>,
        tokens_saved: i32,
    ) {
        let keep_last_n = keep_last_n.max(0) as usize;
        let turn_number = self.turns.last().map(|turn| turn.number).unwrap_or(0);
        let turns_compacted = self.turns.len().saturating_sub(keep_last_n) as i32;

        if keep_last_n < self.turns.len() {
            self.turns.drain(0..self.turns.len() - keep_last_n);
        }

        self.compacted_summary = Some(summary);
        self.compaction_boundary = Some(CompactionBoundary {
            turn_id: turn_id.into(),
            turn_number,
            turns_compacted,
            tokens_saved,
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        });
    }

    pub fn compacted_summary(&self) -> Option<&str> {
        self.compacted_summary.as_deref()
    }

    pub fn compaction_boundary(&self) -> Option<&CompactionBoundary> {
        self.compaction_boundary.as_ref()
    }

    pub fn needs_compaction(&self) -> bool {
        if !self.config.auto_compact {
            return false;
        }
        if self.turns.len() > self.config.max_turns {
            return true;
        }
        if self.config.context_window <= 0 {
            return false;
        }
        let threshold_tokens =
            (self.config.context_window as f32 * self.config.compaction_threshold) as i64;
        self.total_usage().total() >= threshold_tokens
    }

    pub fn clear(&mut self) {
        self.turns.clear();
        self.compacted_summary = None;
        self.compaction_boundary = None;
    }
}

impl Default for MessageHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "history.test.rs"]
mod tests;
