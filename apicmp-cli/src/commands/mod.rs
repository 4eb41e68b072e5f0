//! Command implementations for the apicmp CLI

pub mod compare;
pub mod completions;
