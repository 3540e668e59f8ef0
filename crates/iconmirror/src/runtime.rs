use anyhow::{Context, Result};
use tokio::runtime::Runtime;

/// Multi-threaded runtime with `threads` workers, at least one.
pub fn build(threads: usize) -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(threads.max(1))
        .thread_name("iconmirror-worker")
        .enable_all()
        .build()
        .context("failed to start the async runtime")
}
