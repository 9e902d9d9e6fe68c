//! tripdesk - Content API and keyword chatbot for a travel agency website.

pub mod chatbot;
pub mod config;
pub mod server;
pub mod store;
