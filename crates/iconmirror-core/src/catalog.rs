//! Catalog Builder: identity groups in, sorted consolidated catalog out.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use iconmirror_fs::{AtomicWriteOptions, atomic_read, atomic_write};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::resolve::{IdentityGroup, Resolution};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub name:        String,
    pub description: String,
    pub icons:       Vec<CatalogIcon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogIcon {
    pub name:        String,
    pub url:         String,
    #[serde(default)]
    pub description: String,
}

/// An entry present in this run's catalog but not in the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIcon {
    pub hash: String,
    pub name: String,
    pub url:  String,
}

#[derive(Debug, Clone)]
pub struct CatalogOptions {
    pub name:    String,
    /// Keep entries of the previous catalog that this run did not produce.
    pub archive: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            name:    "Icon Catalog".to_string(),
            archive: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub processed:          usize,
    pub unique:             usize,
    pub duplicates_removed: usize,
    pub catalog_size:       usize,
    pub authors:            Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CatalogBuild {
    pub catalog:     Catalog,
    pub summary:     CatalogSummary,
    pub newly_added: Vec<NewIcon>,
}

/// Build the catalog for `resolution`.
///
/// `previous` is the catalog written by an earlier run, if any. It decides
/// which entries count as new and, in archive mode, contributes entries this
/// run did not produce. Entries are keyed by `url`; fresh ones win.
pub fn build_catalog(resolution: &Resolution, previous: Option<&Catalog>, options: &CatalogOptions) -> CatalogBuild {
    let fresh: Vec<(CatalogIcon, &IdentityGroup)> = resolution.groups.iter().map(|g| (entry_for(g), g)).collect();

    let previous_urls: HashSet<&str> = previous
        .map(|c| c.icons.iter().map(|i| i.url.as_str()).collect())
        .unwrap_or_default();
    let newly_added: Vec<NewIcon> = fresh
        .iter()
        .filter(|(icon, _)| !previous_urls.contains(icon.url.as_str()))
        .map(|(icon, group)| NewIcon {
            hash: group.hash.to_string(),
            name: icon.name.clone(),
            url:  icon.url.clone(),
        })
        .collect();

    let mut by_url: BTreeMap<String, CatalogIcon> = BTreeMap::new();
    if options.archive
        && let Some(previous) = previous
    {
        by_url.extend(previous.icons.iter().map(|i| (i.url.clone(), i.clone())));
    }
    by_url.extend(fresh.into_iter().map(|(icon, _)| (icon.url.clone(), icon)));

    let mut icons: Vec<CatalogIcon> = by_url.into_values().collect();
    sort_icons(&mut icons);

    let authors = resolution.authors();
    let summary = CatalogSummary {
        processed: resolution.processed,
        unique: resolution.groups.len(),
        duplicates_removed: resolution.duplicates_removed(),
        catalog_size: icons.len(),
        authors,
    };

    CatalogBuild {
        catalog: Catalog {
            name: options.name.clone(),
            description: describe(&summary.authors, icons.len()),
            icons,
        },
        summary,
        newly_added,
    }
}

fn entry_for(group: &IdentityGroup) -> CatalogIcon {
    let description = if group.aliases.is_empty() {
        group.primary.source_label.clone()
    } else {
        let aliases: Vec<&str> = group.aliases.iter().map(|a| a.original_name.as_str()).collect();
        format!("Aliases: {}", aliases.join(", "))
    };
    CatalogIcon {
        name: format!("{}-{}", group.primary.name, group.primary.author),
        url: group.public_url.clone(),
        description,
    }
}

/// Ordinal by name; url breaks ties so the order is total.
pub fn sort_icons(icons: &mut [CatalogIcon]) {
    icons.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.url.cmp(&b.url)));
}

fn describe(authors: &[String], count: usize) -> String {
    if count == 0 {
        return "No icons were collected from any source.".to_string();
    }
    if authors.is_empty() {
        return format!("{count} unique icons in total.");
    }
    format!("Includes works from {}. {count} unique icons in total.", authors.join(", "))
}

/// Read a previously written catalog. Missing, empty or corrupt files yield
/// `None`; a corrupt one is logged and will be replaced.
pub fn load_catalog(path: &Path) -> Option<Catalog> {
    if !path.is_file() {
        return None;
    }
    let bytes = match atomic_read(path) {
        Ok(bytes) if !bytes.is_empty() => bytes,
        Ok(_) => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read previous catalog");
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "previous catalog is corrupt, recreating");
            None
        }
    }
}

pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    write_json(path, catalog)
}

/// Pretty-print `value` to `path` atomically, creating parent directories.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut json = serde_json::to_vec_pretty(value).map_err(|source| Error::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    json.push(b'\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    atomic_write(path, &json, &AtomicWriteOptions::new())?;
    Ok(())
}
