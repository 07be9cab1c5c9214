//! Small pure helpers shared across layers.

pub mod email;
pub mod user_agent;
