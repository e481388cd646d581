//! Webhook-to-Telegram relay service.
//!
//! Receives block/log webhooks from a chain indexing provider, filters for
//! marketplace `JobEvent` logs, decodes them and delivers notifications
//! through a [`notifier::NotificationSink`].

pub mod config;
pub mod handler;
pub mod logging;
pub mod server;
pub mod webhook;

pub use config::RelayConfig;
pub use handler::AppState;
pub use server::router;
