//! Tool registry, execution pipeline, and permission evaluation.
//!
//! Tools implement the [`Tool`] trait and are looked up through a
//! [`ToolRegistry`]. [`StreamingToolExecutor`] drives the execution
//! pipeline: validate, check permission, check for a repeated-call doom
//! loop, execute, post-process, cleanup — one tool call at a time.

pub mod context;
pub mod doom_loop;
pub mod error;
pub mod executor;
pub mod permission_rules;
pub mod registry;
pub mod result_persistence;
pub mod sensitive_files;
pub mod tool;

pub use context::ApprovalStore;
pub use context::FileTracker;
pub use context::PermissionRequester;
pub use context::ToolContext;
pub use context::ToolContextBuilder;
pub use doom_loop::DoomLoopDetector;
pub use error::ToolError;
pub use executor::ExecutorConfig;
pub use executor::StreamingToolExecutor;
pub use executor::ToolExecutionResult;
pub use permission_rules::PermissionRule;
pub use permission_rules::PermissionRuleEvaluator;
pub use permission_rules::RuleAction;
pub use registry::McpToolInfo;
pub use registry::ToolRegistry;
pub use sensitive_files::is_locked_directory;
pub use sensitive_files::is_outside_cwd;
pub use sensitive_files::is_sensitive_directory;
pub use sensitive_files::is_sensitive_file;
pub use tool::Tool;
pub use tool::ToolOutputExt;
