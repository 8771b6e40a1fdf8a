//! Per-inference-call execution context: which agent is calling, which model
//! it resolves to, and the reasoning/request overrides in effect.

mod agent_kind;
mod identity;
mod inference_context;

pub use agent_kind::AgentKind;
pub use identity::ExecutionIdentity;
pub use inference_context::InferenceContext;
