//! Bridge between the UI thread and the worker thread that owns the score store.

pub mod commands;
pub mod runtime;
