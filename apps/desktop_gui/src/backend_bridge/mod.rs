//! Backend bridge: command queue types and the worker thread that runs them.

pub mod commands;
pub mod runtime;
