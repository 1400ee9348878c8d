//! Helper functions shared across commands, generator and server

pub mod date;
pub mod url;
