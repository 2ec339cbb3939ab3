#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "parallel")]
static PARALLEL_ENABLED: AtomicBool = AtomicBool::new(true);

const DEFAULT_CHUNK_SIZE: usize = 64;

/// Minimum number of items handed to one rayon task.
pub fn preferred_chunk_size(total_items: usize) -> usize {
    DEFAULT_CHUNK_SIZE.min(total_items.max(1))
}

/// Whether per-query checks and leaf hashing fan out over the rayon pool.
#[cfg(feature = "parallel")]
pub fn parallelism_enabled() -> bool {
    PARALLEL_ENABLED.load(Ordering::SeqCst)
}

#[cfg(not(feature = "parallel"))]
pub fn parallelism_enabled() -> bool {
    false
}

/// Switches the worker pool on or off until the returned guard is dropped.
#[cfg(feature = "parallel")]
pub fn set_parallelism(enabled: bool) -> ParallelismGuard {
    let previous = PARALLEL_ENABLED.swap(enabled, Ordering::SeqCst);
    ParallelismGuard { previous }
}

#[cfg(not(feature = "parallel"))]
pub fn set_parallelism(_enabled: bool) -> ParallelismGuard {
    ParallelismGuard {}
}

/// Restores the previous parallelism setting on drop.
#[must_use = "parallelism is restored as soon as the guard is dropped"]
pub struct ParallelismGuard {
    #[cfg(feature = "parallel")]
    previous: bool,
}

#[cfg(feature = "parallel")]
impl Drop for ParallelismGuard {
    fn drop(&mut self) {
        PARALLEL_ENABLED.store(self.previous, Ordering::SeqCst);
    }
}
