//! Content hashing primitives for mirrored icon assets.
//!
//! Provides incremental hashing and a hex-encoded [`ContentHash`] used as the
//! content address of every stored asset. Hashing is deterministic: identical
//! bytes always produce the identical address.
//!
//! # Example
//!
//! ```
//! use iconmirror_verify::{ContentHash, Hasher, Sha256Hasher};
//!
//! let mut hasher = Sha256Hasher::new();
//! hasher.update(b"hello ");
//! hasher.update(b"world");
//! let streamed = ContentHash::from_digest(&hasher.finalize());
//!
//! assert_eq!(streamed, ContentHash::of(b"hello world"));
//! ```

pub use self::hash::ContentHash;
pub use self::hasher::Hasher;

#[cfg(feature = "sha256")]
pub use self::hasher::Sha256Hasher;

mod hash;
mod hasher;
