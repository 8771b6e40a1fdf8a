//! Shared protocol types for the conduit runtime: model/provider metadata,
//! permission and sandbox types, loop events, and the session-facing config
//! structs (`ToolConfig`, `CompactConfig`, `PlanModeConfig`, ...).

pub mod execution;
pub mod model;

mod agent_status;
mod attachment_config;
mod compact_config;
mod correlation;
mod features;
mod loop_config;
mod loop_event;
mod mcp_config;
mod path_config;
mod permission;
mod plan_config;
mod provider;
mod queue;
mod sandbox;
mod thinking;
mod tool_config;
mod tool_definition;
mod tool_types;
mod tracking;
mod web_fetch_config;
mod web_search_config;

pub use agent_status::AgentStatus;
pub use attachment_config::AttachmentConfig;
pub use compact_config::CompactConfig;
pub use correlation::CorrelatedEvent;
pub use correlation::SubmissionId;
pub use features::Feature;
pub use features::FeatureSpec;
pub use features::Features;
pub use features::Stage;
pub use features::all_features;
pub use features::feature_for_key;
pub use features::is_known_feature_key;
pub use loop_config::CacheBreakpoint;
pub use loop_config::CacheType;
pub use loop_config::FileRestorationPriority;
pub use loop_config::LoopConfig;
pub use loop_config::PromptCachingConfig;
pub use loop_config::SessionMemoryConfig;
pub use loop_config::StallDetectionConfig;
pub use loop_config::StallRecovery;
pub use loop_event::AbortReason;
pub use loop_event::AgentProgress;
pub use loop_event::ApiErrorInfo;
pub use loop_event::AttachmentType;
pub use loop_event::CompactBoundaryMetadata;
pub use loop_event::CompactTelemetry;
pub use loop_event::CompactTrigger;
pub use loop_event::HookAdditionalContext;
pub use loop_event::HookEventType;
pub use loop_event::LoopError;
pub use loop_event::LoopEvent;
pub use loop_event::McpServerInfo;
pub use loop_event::McpStartupStatus;
pub use loop_event::MemoryAttachment;
pub use loop_event::PersistedToolResult;
pub use loop_event::RawStreamEvent;
pub use loop_event::RetryInfo;
pub use loop_event::TaskProgress;
pub use loop_event::TaskType;
pub use loop_event::TokenBreakdown;
pub use loop_event::TokenUsage;
pub use loop_event::TombstonedMessage;
pub use loop_event::ToolProgressInfo;
pub use loop_event::ToolResultContent;
pub use mcp_config::McpAutoSearchConfig;
pub use mcp_config::McpConfig;
pub use mcp_config::McpToolCacheConfig;
pub use path_config::PathConfig;
pub use permission::ApprovalDecision;
pub use permission::ApprovalRequest;
pub use permission::PermissionBehavior;
pub use permission::PermissionDecision;
pub use permission::PermissionMode;
pub use permission::PermissionResult;
pub use permission::RiskSeverity;
pub use permission::RiskType;
pub use permission::RuleSource;
pub use permission::SecurityRisk;
pub use plan_config::PlanModeConfig;
pub use provider::ProviderInfo;
pub use provider::ProviderModel;
pub use provider::ProviderType;
pub use provider::WireApi;
pub use queue::SteeringAttachment;
pub use queue::SteeringSource;
pub use queue::UserQueuedCommand;
pub use sandbox::SandboxMode;
pub use thinking::ThinkingLevel;
pub use tool_config::ApplyPatchToolType;
pub use tool_config::ToolConfig;
pub use tool_definition::ToolCall;
pub use tool_definition::ToolDefinition;
pub use tool_types::ConcurrencySafety;
pub use tool_types::ContextModifier;
pub use tool_types::ToolOutput;
pub use tool_types::ValidationError;
pub use tool_types::ValidationResult;
pub use tracking::AutoCompactTracking;
pub use tracking::FileChange;
pub use tracking::FileChangeType;
pub use tracking::FileReadInfo;
pub use tracking::QueryTracking;
pub use web_fetch_config::WebFetchConfig;
pub use web_search_config::WebSearchConfig;
pub use web_search_config::WebSearchProvider;

pub use model::Capability;
pub use model::ConfigShellToolType;
pub use model::ModelInfo;
pub use model::ReasoningEffort;
pub use model::TruncationMode;
pub use model::TruncationPolicyConfig;
pub use model::effort_rank;
pub use model::nearest_effort;
