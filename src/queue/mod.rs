//! Producer/consumer queue machinery.
//!
//! # Architecture
//!
//! - [`job_queue`] - Unbounded FIFO with an async item-available signal
//! - [`shutdown`] - Cooperative cancellation token
//! - [`dispatcher`] - The long-running consumer loop
//!
//! Two queue instances exist in the system, one per job type; they share no
//! state. The queue and its wait signal are the only shared mutable state in
//! this crate.

pub mod dispatcher;
pub mod job_queue;
pub mod shutdown;

pub use dispatcher::{JobHandler, run_dispatcher};
pub use job_queue::JobQueue;
pub use shutdown::ShutdownToken;
