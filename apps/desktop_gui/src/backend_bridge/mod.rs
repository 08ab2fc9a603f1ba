//! Worker-thread side of the GUI: command intake and the async runtime that
//! talks to the answering service.

pub mod commands;
pub mod runtime;
