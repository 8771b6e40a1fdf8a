//! Dumps JSON Schema documents for every wire DTO in this crate.
//!
//! Run with `cargo run -p conduit-app-server-protocol --bin
//! export-app-server-schema` to print a `{type_name: schema}` map to
//! stdout; front-ends (TUI, IDE extensions) regenerate their client types
//! from this output instead of hand-tracking the Rust structs.

use conduit_app_server_protocol as protocol;
use schemars::schema_for;
use serde_json::Map;
use serde_json::Value;

macro_rules! insert_schema {
    ($map:expr, $($ty:ty),+ $(,)?) => {
        $(
            $map.insert(
                stringify!($ty).to_string(),
                serde_json::to_value(schema_for!($ty)).expect("schema serializes"),
            );
        )+
    };
}

fn main() {
    let mut schemas: Map<String, Value> = Map::new();

    insert_schema!(
        schemas,
        protocol::ErrorResponse,
        protocol::SessionResponse,
        protocol::SessionCreateRequest,
        protocol::SessionUpdateRequest,
        protocol::SessionMessageRequest,
        protocol::SessionCompactRequest,
        protocol::SessionDeleteMessagesRequest,
        protocol::SessionRestoreMessagesRequest,
        protocol::SessionMessageResponse,
        protocol::SessionDeleteResponse,
        protocol::SessionDeleteMessagesResponse,
        protocol::SessionRestoreMessagesResponse,
        protocol::SessionListMessageResponse,
        protocol::ProviderResponse,
        protocol::ProviderModelResponse,
        protocol::ProviderConnectRequest,
        protocol::ProviderConnectResponse,
        protocol::AgentResponse,
        protocol::PreferenceCurrentResponse,
        protocol::PreferenceCurrentUpdateRequest,
        protocol::PermissionReplyRequest,
        protocol::PermissionRequestResponse,
        protocol::QuestionReplyRequest,
        protocol::QuestionRequestResponse,
        protocol::SseEnvelope,
        protocol::HealthResponse,
        protocol::PathsResponse,
        protocol::SkillResponse,
    );

    let output = Value::Object(schemas);
    println!(
        "{}",
        serde_json::to_string_pretty(&output).expect("schema map serializes")
    );
}
