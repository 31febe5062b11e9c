// Core moderation module - mention-spam sweep over an antenna feed.

pub mod moderation_models;
pub mod moderation_service;

pub use moderation_models::*;
pub use moderation_service::*;
