use std::fmt;

/// Lowercase hex digest identifying a blob of content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash(String);

impl ContentHash {
    /// Hash `data` with the default algorithm.
    #[cfg(feature = "sha256")]
    pub fn of(data: &[u8]) -> Self {
        use crate::Hasher;

        let mut hasher = crate::Sha256Hasher::new();
        hasher.update(data);
        Self::from_digest(&hasher.finalize())
    }

    pub fn from_digest(digest: &[u8]) -> Self { Self(hex::encode(digest)) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str { &self.0 }
}
