//! Atomic filesystem primitives used by the icon mirror.
//!
//! - [`atomic_write`] - write-to-temp then rename, so readers never observe
//!   a half-written file
//! - [`Workspace`] - a scratch directory removed when dropped, including on
//!   error and cancellation paths

mod atomic_write;
mod error;
mod workspace;

pub use atomic_write::{AtomicWriteOptions, atomic_read, atomic_write};
pub use error::{Error, Result};
pub use workspace::Workspace;
