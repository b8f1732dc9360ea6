//! Internal modules for the card war client.
//!
//! This library provides the Deck of Cards HTTP client, configuration and
//! the console front end used by the cw_client binary.

pub mod api_client;
pub mod config;
pub mod console;
