// Misskey infra layer.
// - `misskey_client.rs` talks to the server's admin REST API.
// - `api_models.rs` holds the wire request/response bodies.

#[path = "api_models.rs"]
pub mod api_models;

#[path = "misskey_client.rs"]
pub mod misskey_client;

pub use misskey_client::MisskeyApiClient;
