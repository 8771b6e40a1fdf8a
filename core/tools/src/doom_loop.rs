//! Detects tool-call loops.
//!
//! Tracks a ring buffer of call signatures (tool name + canonicalized
//! input) per executor and reports a hit the instant the trailing
//! `THRESHOLD` signatures are all identical — the same contract as the
//! doom-loop guard this is ported from: fire once, on exactly three
//! repeats in a row, not on every repeat past the first three.

use std::sync::Mutex;

use serde_json::Value;

const THRESHOLD: usize = 3;
const WINDOW: usize = 50;

/// Repeated-call signature tracker for one tool executor.
pub struct DoomLoopDetector {
    signatures: Mutex<Vec<String>>,
}

impl DoomLoopDetector {
    pub fn new() -> Self {
        Self {
            signatures: Mutex::new(Vec::new()),
        }
    }

    /// Record a call signature and report whether it just completed three
    /// identical trailing signatures. Only the exact rollover to three
    /// matches reports `true` — a fourth, fifth, etc. identical call in the
    /// same run does not re-fire until a different signature breaks the
    /// streak first.
    pub fn observe(&self, tool_name: &str, input: &Value) -> bool {
        let signature = format!("{tool_name}:{}", canonical_json(input));

        let mut signatures = self.signatures.lock().unwrap_or_else(|e| e.into_inner());
        signatures.push(signature);
        if signatures.len() > WINDOW {
            let excess = signatures.len() - WINDOW;
            signatures.drain(..excess);
        }

        if signatures.len() < THRESHOLD {
            return false;
        }

        let recent = &signatures[signatures.len() - THRESHOLD..];
        let all_same = recent.windows(2).all(|pair| pair[0] == pair[1]);
        if !all_same {
            return false;
        }

        // Only fire on the exact rollover: if the signature before the
        // trailing window also matches, this streak already fired.
        if signatures.len() > THRESHOLD {
            let prior = &signatures[signatures.len() - THRESHOLD - 1];
            if prior == &recent[0] {
                return false;
            }
        }

        true
    }
}

impl Default for DoomLoopDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Sorted-key JSON rendering so object field order never defeats signature
/// matching.
fn canonical_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let rendered: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("{k:?}:{}", canonical_json(v)))
                .collect();
            format!("{{{}}}", rendered.join(","))
        }
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(canonical_json).collect();
            format!("[{}]", rendered.join(","))
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "doom_loop.test.rs"]
mod tests;
