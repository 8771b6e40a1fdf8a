//! Hook event types.
//!
//! The loop's own event catalog already has a `HookEventType`, so this
//! module just re-exports it rather than keeping a second copy in sync.

pub use conduit_protocol::HookEventType;
