//! Hook handler implementations, one module per `HookHandler` variant.

pub mod command;
