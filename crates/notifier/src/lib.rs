//! Notification formatting and delivery.
//!
//! `format` renders decoded job events into Telegram HTML messages;
//! `telegram` delivers them through the Bot API behind the
//! [`telegram::NotificationSink`] trait.

pub mod format;
pub mod telegram;

pub use format::{fallback_message, format_duration, format_token_amount, job_event_message};
pub use telegram::{NotificationSink, TelegramNotifier};
