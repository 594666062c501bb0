// Library root for the `pickup` command: config, roster import, request
// normalization and the command implementations.

pub mod commands;
pub mod config;
pub mod request;
pub mod roster;
