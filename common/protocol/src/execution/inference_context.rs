//! Everything an inference call needs to know about itself: identity, the
//! model it resolved to, and any per-call overrides.

use super::AgentKind;
use super::ExecutionIdentity;
use crate::ThinkingLevel;
use crate::model::ModelInfo;
use crate::model::ModelSpec;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;

/// Resolved context for a single inference call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceContext {
    pub call_id: String,
    pub session_id: String,
    pub turn_number: u64,
    pub model_spec: ModelSpec,
    pub model_info: ModelInfo,
    pub agent_kind: AgentKind,
    /// Identity this call was originally dispatched under, before role
    /// resolution; preserved for telemetry and child-context inheritance.
    pub original_identity: ExecutionIdentity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking_level: Option<ThinkingLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_options: Option<HashMap<String, serde_json::Value>>,
}

impl InferenceContext {
    pub fn new(
        call_id: impl Into<String>,
        session_id: impl Into<String>,
        turn_number: u64,
        model_spec: ModelSpec,
        model_info: ModelInfo,
        agent_kind: AgentKind,
        original_identity: ExecutionIdentity,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            session_id: session_id.into(),
            turn_number,
            model_spec,
            model_info,
            agent_kind,
            original_identity,
            thinking_level: None,
            request_options: None,
        }
    }

    pub fn provider(&self) -> &str {
        &self.model_spec.provider
    }

    pub fn model(&self) -> &str {
        &self.model_spec.model
    }

    pub fn context_window(&self) -> Option<i64> {
        self.model_info.context_window
    }

    pub fn max_output_tokens(&self) -> Option<i64> {
        self.model_info.max_output_tokens
    }

    pub fn temperature(&self) -> Option<f64> {
        self.model_info.temperature
    }

    pub fn with_thinking_level(mut self, level: ThinkingLevel) -> Self {
        self.thinking_level = Some(level);
        self
    }

    pub fn with_request_options(mut self, options: HashMap<String, serde_json::Value>) -> Self {
        self.request_options = Some(options);
        self
    }

    pub fn get_request_option(&self, key: &str) -> Option<&serde_json::Value> {
        self.request_options.as_ref().and_then(|opts| opts.get(key))
    }

    /// Explicit override if set, otherwise the model's configured default.
    pub fn effective_thinking_level(&self) -> Option<ThinkingLevel> {
        self.thinking_level
            .or(self.model_info.default_thinking_level)
    }

    pub fn is_thinking_enabled(&self) -> bool {
        self.effective_thinking_level()
            .is_some_and(|level| level.is_enabled())
    }

    pub fn is_main(&self) -> bool {
        self.agent_kind.is_main()
    }

    pub fn is_subagent(&self) -> bool {
        self.agent_kind.is_subagent()
    }

    pub fn is_compaction(&self) -> bool {
        self.agent_kind.is_compaction()
    }

    /// Derive a context for a subagent spawned by this call. Inherits model
    /// configuration and session, but gets its own call id and identity.
    pub fn child_context(
        &self,
        call_id: impl Into<String>,
        agent_type: impl Into<String>,
        identity: ExecutionIdentity,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            session_id: self.session_id.clone(),
            turn_number: self.turn_number,
            model_spec: self.model_spec.clone(),
            model_info: self.model_info.clone(),
            agent_kind: AgentKind::subagent(self.session_id.clone(), agent_type),
            original_identity: identity,
            thinking_level: self.thinking_level,
            request_options: self.request_options.clone(),
        }
    }
}

#[cfg(test)]
#[path = "inference_context.test.rs"]
mod tests;
