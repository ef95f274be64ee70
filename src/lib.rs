//! SMS to Telegram forwarding service: formats inbound SMS fragments into
//! MarkdownV2 messages and delivers them through the Telegram Bot API with
//! credential validation and retry.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
