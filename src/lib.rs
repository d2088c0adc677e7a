//! `FinAssist` - conversational client for a BFSI assistant backend
//!
//! Keeps the chat transcript, drives one outstanding query at a time
//! against the backend, and tracks backend health. Rendering is left to
//! the caller.

pub mod backend;
pub mod config;
pub mod conversation;
pub mod health;
pub mod input;
pub mod runtime;
pub mod state_machine;
