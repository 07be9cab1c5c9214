//! Application layer: the job handlers and their orchestration logic.

pub mod services;
