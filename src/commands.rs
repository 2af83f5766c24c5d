// Command handlers module
// This module contains all CLI command implementations

pub mod auth;
pub mod branch;
pub mod common;
pub mod completion;
pub mod config;
pub mod pr;
pub mod workitem;
