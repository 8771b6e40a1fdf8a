//! Policy for truncating oversized tool output before it reaches the model.

use serde::Deserialize;
use serde::Serialize;

/// Where to cut an oversized tool result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationMode {
    /// Drop content from the end, keep the head.
    #[default]
    Head,
    /// Drop content from the start, keep the tail.
    Tail,
    /// Keep head and tail, drop the middle.
    Middle,
}

/// Per-model or per-tool truncation limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TruncationPolicyConfig {
    /// Maximum characters kept before truncation applies.
    pub max_chars: usize,
    pub mode: TruncationMode,
}

impl Default for TruncationPolicyConfig {
    fn default() -> Self {
        Self {
            max_chars: 30_000,
            mode: TruncationMode::default(),
        }
    }
}

impl TruncationPolicyConfig {
    pub fn truncate(&self, content: &str) -> std::borrow::Cow<'_, str> {
        if content.len() <= self.max_chars {
            return std::borrow::Cow::Borrowed(content);
        }
        match self.mode {
            TruncationMode::Head => std::borrow::Cow::Borrowed(&content[..self.max_chars]),
            TruncationMode::Tail => {
                std::borrow::Cow::Borrowed(&content[content.len() - self.max_chars..])
            }
            TruncationMode::Middle => {
                let half = self.max_chars / 2;
                let mut out = String::with_capacity(self.max_chars + 16);
                out.push_str(&content[..half]);
                out.push_str("\n... truncated ...\n");
                out.push_str(&content[content.len() - half..]);
                std::borrow::Cow::Owned(out)
            }
        }
    }
}
