//! Records that flow between pipeline stages.

use std::path::{Component, Path, PathBuf};

use iconmirror_verify::ContentHash;

/// One line of the source list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDefinition {
    pub label:        String,
    pub manifest_url: String,
    pub output_path:  PathBuf,
}

impl SourceDefinition {
    pub fn new(label: impl Into<String>, manifest_url: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            label:        label.into(),
            manifest_url: manifest_url.into(),
            output_path:  output_path.into(),
        }
    }

    /// Author credited for this source's icons: the output file name up to
    /// the first `_` (`icons/alice_set.json` -> `alice`). A name without `_`
    /// is used whole (`icons/bob.json` -> `bob.json`).
    pub fn author(&self) -> String {
        self.output_path
            .file_name()
            .map(|name| name.to_string_lossy())
            .and_then(|name| name.split('_').next().map(str::to_owned))
            .unwrap_or_default()
    }
}

/// An icon listed by a source manifest, before download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconReference {
    /// Position in collection order across all sources.
    pub index:         usize,
    pub name:          String,
    pub url:           String,
    pub author:        String,
    pub source_label:  String,
    /// `name-author`, used to list aliases.
    pub original_name: String,
}

impl IconReference {
    pub fn new(index: usize, name: &str, url: &str, source: &SourceDefinition) -> Self {
        let author = source.author();
        Self {
            index,
            name: name.to_string(),
            url: url.to_string(),
            original_name: format!("{name}-{author}"),
            author,
            source_label: source.label.clone(),
        }
    }
}

/// A successfully downloaded and stored icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub content_hash: ContentHash,
    pub local_path:   PathBuf,
    /// `local_path` as referenced from the outputs.
    pub public_url:   String,
    pub original_url: String,
    pub size:         u64,
    pub reference:    IconReference,
}

/// Join `base_url` and `path` with forward slashes, dropping `.` components.
///
/// ```
/// use std::path::Path;
/// use iconmirror_core::model::public_url;
///
/// assert_eq!(public_url("", Path::new("./icons/assets/ab.png")), "icons/assets/ab.png");
/// assert_eq!(
///     public_url("https://cdn.example/", Path::new("icons/assets/ab.png")),
///     "https://cdn.example/icons/assets/ab.png"
/// );
/// ```
pub fn public_url(base_url: &str, path: &Path) -> String {
    let mut relative = String::new();
    for component in path.components() {
        let part = match component {
            Component::CurDir => continue,
            Component::RootDir => {
                relative.push('/');
                continue;
            }
            Component::Prefix(prefix) => prefix.as_os_str().to_string_lossy(),
            Component::ParentDir => "..".into(),
            Component::Normal(part) => part.to_string_lossy(),
        };
        if !relative.is_empty() && !relative.ends_with('/') {
            relative.push('/');
        }
        relative.push_str(&part);
    }
    format!("{base_url}{relative}")
}
