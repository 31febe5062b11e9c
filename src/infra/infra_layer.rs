// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "misskey/mod.rs"]
pub mod misskey;

#[path = "config/mod.rs"]
pub mod config;
