//! Runtime helpers shared across the verifier: the worker-pool switch and
//! the tracing subscriber bootstrap.

pub mod logging;
mod parallel;

pub use parallel::{parallelism_enabled, preferred_chunk_size, set_parallelism, ParallelismGuard};
