//! Filesystem sandbox mode for tool execution.

use serde::Deserialize;
use serde::Serialize;

/// Filesystem access level granted to tool execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SandboxMode {
    /// No writes anywhere; reads are unrestricted.
    ReadOnly,
    /// Writes allowed under configured writable roots only.
    WorkspaceWrite,
    /// No restrictions.
    FullAccess,
}

impl Default for SandboxMode {
    fn default() -> Self {
        Self::ReadOnly
    }
}

impl SandboxMode {
    /// Whether this mode permits any write at all.
    pub fn allows_write(&self) -> bool {
        !matches!(self, Self::ReadOnly)
    }

    /// Whether this mode bypasses writable-root checks entirely.
    pub fn is_full_access(&self) -> bool {
        matches!(self, Self::FullAccess)
    }

    /// Canonical kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadOnly => "read-only",
            Self::WorkspaceWrite => "workspace-write",
            Self::FullAccess => "full-access",
        }
    }
}

impl std::fmt::Display for SandboxMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SandboxMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read-only" | "readonly" | "read_only" => Ok(Self::ReadOnly),
            "workspace-write" | "workspacewrite" | "workspace_write" => Ok(Self::WorkspaceWrite),
            "full-access" | "fullaccess" | "full_access" => Ok(Self::FullAccess),
            other => Err(format!("unknown sandbox mode: {other}")),
        }
    }
}

#[cfg(test)]
#[path = "sandbox.test.rs"]
mod tests;
