//! Identity Resolution: groups outcomes by content hash and builds the URL map.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use iconmirror_verify::ContentHash;

use crate::model::{FetchOutcome, IconReference};

/// References whose downloads turned out to be byte-identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityGroup {
    pub hash:           ContentHash,
    /// The earliest-discovered reference with this content.
    pub primary:        IconReference,
    /// Later references with the same content, in discovery order.
    pub aliases:        Vec<IconReference>,
    pub canonical_path: PathBuf,
    pub public_url:     String,
    pub size:           u64,
}

/// Original remote URL -> canonical public URL.
///
/// Keyed by URL alone, across all sources: a URL that downloaded
/// successfully for any reference resolves for every manifest listing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlMap(BTreeMap<String, String>);

impl UrlMap {
    pub fn get(&self, original_url: &str) -> Option<&str> { self.0.get(original_url).map(String::as_str) }

    pub fn insert(&mut self, original_url: impl Into<String>, public_url: impl Into<String>) {
        self.0.insert(original_url.into(), public_url.into());
    }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UrlMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = UrlMap::default();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// In order of first appearance.
    pub groups:    Vec<IdentityGroup>,
    pub url_map:   UrlMap,
    /// Number of outcomes consumed.
    pub processed: usize,
}

impl Resolution {
    pub fn duplicates_removed(&self) -> usize { self.processed - self.groups.len() }

    /// Distinct authors across primaries and aliases, sorted.
    pub fn authors(&self) -> Vec<String> {
        let mut authors: Vec<String> = self
            .groups
            .iter()
            .flat_map(|g| std::iter::once(&g.primary).chain(&g.aliases))
            .map(|r| r.author.clone())
            .collect();
        authors.sort();
        authors.dedup();
        authors
    }
}

/// Group `outcomes` by content hash.
///
/// Outcomes are first ordered by discovery index, so which reference becomes
/// primary depends only on the input, never on download completion order.
pub fn resolve(mut outcomes: Vec<FetchOutcome>) -> Resolution {
    outcomes.sort_by(|a, b| {
        a.reference
            .index
            .cmp(&b.reference.index)
            .then_with(|| a.original_url.cmp(&b.original_url))
    });

    let mut resolution = Resolution {
        processed: outcomes.len(),
        ..Resolution::default()
    };
    let mut by_hash: HashMap<ContentHash, usize> = HashMap::new();

    for outcome in outcomes {
        resolution
            .url_map
            .insert(outcome.original_url.clone(), outcome.public_url.clone());

        match by_hash.get(&outcome.content_hash) {
            Some(&slot) => resolution.groups[slot].aliases.push(outcome.reference),
            None => {
                by_hash.insert(outcome.content_hash.clone(), resolution.groups.len());
                resolution.groups.push(IdentityGroup {
                    hash:           outcome.content_hash,
                    primary:        outcome.reference,
                    aliases:        Vec::new(),
                    canonical_path: outcome.local_path,
                    public_url:     outcome.public_url,
                    size:           outcome.size,
                });
            }
        }
    }

    resolution
}
