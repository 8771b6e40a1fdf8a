//! Permission decisions, approval requests and risk classification shared
//! between the tool executor and the permission/question workflow.

use serde::Deserialize;
use serde::Serialize;

/// Session-wide permission posture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionMode {
    /// Ask before any write or destructive action.
    Default,
    /// Ask before write actions; used while drafting a plan.
    Plan,
    /// Writes are auto-approved; everything else still asks.
    AcceptEdits,
    /// Nothing asks.
    Bypass,
}

impl Default for PermissionMode {
    fn default() -> Self {
        Self::Default
    }
}

impl PermissionMode {
    /// Whether a write/edit tool call needs approval under this mode.
    pub fn requires_write_approval(&self) -> bool {
        matches!(self, Self::Default | Self::Plan)
    }

    /// Whether edits are auto-accepted without asking.
    pub fn auto_accept_edits(&self) -> bool {
        matches!(self, Self::AcceptEdits | Self::Bypass)
    }

    /// Whether this mode skips all approval checks.
    pub fn is_bypass(&self) -> bool {
        matches!(self, Self::Bypass)
    }
}

/// Resolved behavior for a single permission rule match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionBehavior {
    /// Proceed without asking.
    Allow,
    /// Prompt the user.
    Ask,
    /// Refuse outright.
    Deny,
}

impl Default for PermissionBehavior {
    fn default() -> Self {
        Self::Ask
    }
}

impl PermissionBehavior {
    /// True for [`Self::Allow`].
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// True for [`Self::Ask`].
    pub fn requires_approval(&self) -> bool {
        matches!(self, Self::Ask)
    }

    /// True for [`Self::Deny`].
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Deny)
    }
}

/// Severity of a risk flagged on a proposed tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskSeverity {
    /// Whether this severity is at least as high as `other`.
    pub fn at_least(&self, other: Self) -> bool {
        *self >= other
    }
}

/// Category of risk a security scan attached to a tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskType {
    /// May delete or overwrite data irreversibly.
    Destructive,
    /// Reads or exfiltrates sensitive data.
    SensitiveRead,
    /// Touches network resources.
    Network,
    /// Escalates privileges or bypasses sandboxing.
    PrivilegeEscalation,
    /// Anything else worth flagging.
    Other,
}

/// A single flagged risk with a human-readable explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityRisk {
    pub risk_type: RiskType,
    pub severity: RiskSeverity,
    pub message: String,
}

/// Request sent to the user when a tool call needs explicit approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub request_id: String,
    pub tool_name: String,
    pub description: String,
    pub risks: Vec<SecurityRisk>,
    pub allow_remember: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposed_prefix_pattern: Option<String>,
}

/// The user's answer to an [`ApprovalRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "kebab-case")]
pub enum ApprovalDecision {
    Approved,
    ApprovedWithPrefix { prefix_pattern: String },
    Denied,
}

/// Outcome of checking a proposed tool call against the permission engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PermissionResult {
    /// Proceed without asking.
    Allowed,
    /// Refused; `reason` is shown to the model.
    Denied { reason: String },
    /// The caller must prompt the user and resume with an [`ApprovalDecision`].
    NeedsApproval { request: ApprovalRequest },
    /// No rule matched; the caller should fall back to its own default.
    Passthrough,
}

impl PermissionResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied { .. })
    }

    pub fn needs_approval(&self) -> bool {
        matches!(self, Self::NeedsApproval { .. })
    }

    pub fn is_passthrough(&self) -> bool {
        matches!(self, Self::Passthrough)
    }
}

/// Where a matched permission rule came from; also its priority (lower wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleSource {
    Session,
    Command,
    Cli,
    Flag,
    Local,
    Project,
    Policy,
    User,
}

/// Explained outcome of evaluating the permission rule set once, before
/// falling back to interactive approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionDecision {
    pub allowed: bool,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<RuleSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_pattern: Option<String>,
}

impl PermissionDecision {
    pub fn allowed(reason: impl Into<String>) -> Self {
        Self {
            allowed: true,
            reason: reason.into(),
            source: None,
            matched_pattern: None,
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: reason.into(),
            source: None,
            matched_pattern: None,
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    pub fn with_source(mut self, source: RuleSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.matched_pattern = Some(pattern.into());
        self
    }
}

#[cfg(test)]
#[path = "permission.test.rs"]
mod tests;
