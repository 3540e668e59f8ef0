mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{MemoryClient, PNG_A, PNG_B, SVG_C, fetcher, manifest};
use iconmirror_core::catalog::{CatalogOptions, build_catalog, load_catalog, write_catalog};
use iconmirror_core::collect::collect_references;
use iconmirror_core::pool::{FetchPool, PoolOptions, PoolProgress};
use iconmirror_core::resolve::resolve;
use iconmirror_core::rewrite::rewrite_sources;
use iconmirror_core::worker::IconWorker;
use iconmirror_core::{IconError, SourceDefinition};
use iconmirror_store::ContentStore;
use tempfile::tempdir;
use tokio_util::sync::CancellationToken;

fn sources(root: &std::path::Path) -> Vec<SourceDefinition> {
    vec![
        SourceDefinition::new("Alice set", "https://up/alice.json", root.join("out/alice_tv.json")),
        SourceDefinition::new("Bob set", "https://up/bob.json", root.join("out/bob_tv.json")),
    ]
}

fn upstream() -> MemoryClient {
    MemoryClient::default()
        .route(
            "https://up/alice.json",
            manifest(&[
                ("Netflix", "https://cdn/a/netflix.png"),
                ("Hulu", "https://cdn/a/hulu.png"),
                ("Dead", "https://cdn/a/dead.png"),
            ]),
        )
        .route(
            "https://up/bob.json",
            manifest(&[
                ("NF", "https://cdn/b/nf.png"),
                ("Logo", "https://cdn/b/logo.svg"),
                ("Page", "https://cdn/b/page.png"),
            ]),
        )
        .route("https://cdn/a/netflix.png", PNG_A)
        .route("https://cdn/a/hulu.png", PNG_B)
        .status("https://cdn/a/dead.png", 404)
        .route("https://cdn/b/nf.png", PNG_A)
        .route("https://cdn/b/logo.svg", SVG_C)
        .route("https://cdn/b/page.png", "<html>moved</html>")
}

#[tokio::test]
async fn deduplicates_and_rewrites_end_to_end() {
    let dir = tempdir().unwrap();
    let sources = sources(dir.path());
    let fetcher = Arc::new(fetcher(upstream()));
    let store = Arc::new(ContentStore::open(dir.path().join("assets")).unwrap());
    let cancel = CancellationToken::new();

    let collection = collect_references(&fetcher, &sources, &cancel).await;
    assert_eq!(collection.references.len(), 6);
    assert!(collection.failed_sources.is_empty());

    let seen = Arc::new(Mutex::new(Vec::new()));
    let progress_log = Arc::clone(&seen);
    let pool = FetchPool::new(IconWorker::new(Arc::clone(&fetcher), Arc::clone(&store), "")).with_options(
        PoolOptions::default()
            .concurrency(3)
            .on_progress(Arc::new(move |p: &PoolProgress| progress_log.lock().unwrap().push(*p))),
    );
    let report = pool.run(collection.references, &cancel).await;

    assert_eq!(report.attempted, 6);
    assert_eq!(report.outcomes.len(), 4);
    assert_eq!(report.failed, 2);
    assert!(!report.cancelled);
    let progress = seen.lock().unwrap();
    assert_eq!(progress.len(), 6);
    assert_eq!(progress.last().unwrap().completed, 6);

    // identical content is stored once
    let stored: Vec<_> = std::fs::read_dir(store.root())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| !n.starts_with('.'))
        .collect();
    assert_eq!(stored.len(), 3);

    let outcomes = report.outcomes.clone();
    let resolution = resolve(report.outcomes);
    assert_eq!(resolution.groups.len(), 3);
    assert_eq!(resolution.duplicates_removed(), 1);
    for outcome in &outcomes {
        assert_eq!(resolution.url_map.get(&outcome.original_url), Some(outcome.public_url.as_str()));
    }

    let netflix = resolution
        .groups
        .iter()
        .find(|g| g.primary.name == "Netflix")
        .unwrap();
    assert_eq!(netflix.aliases.len(), 1);
    assert_eq!(netflix.aliases[0].original_name, "NF-bob");

    let build = build_catalog(&resolution, None, &CatalogOptions::default());
    let names: Vec<&str> = build.catalog.icons.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Hulu-alice", "Logo-bob", "Netflix-alice"]);
    assert_eq!(build.catalog.icons[2].description, "Aliases: NF-bob");
    assert_eq!(build.catalog.icons[0].description, "Alice set");
    assert_eq!(build.summary.authors, vec!["alice", "bob"]);
    assert_eq!(build.newly_added.len(), 3);

    let rewrite = rewrite_sources(&fetcher, &sources, &resolution.url_map, &cancel).await;
    assert_eq!(rewrite.written.len(), 2);

    let alice: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("out/alice_tv.json")).unwrap()).unwrap();
    assert_eq!(alice["name"], "Alice set (mirror)");
    assert_eq!(alice["icons"][0]["url"], netflix.public_url.as_str());
    assert_eq!(alice["icons"][2]["url"], "https://cdn/a/dead.png");

    let bob: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("out/bob_tv.json")).unwrap()).unwrap();
    assert_eq!(bob["icons"][0]["url"], netflix.public_url.as_str());
}

#[tokio::test]
async fn unreachable_source_is_skipped() {
    let dir = tempdir().unwrap();
    let sources = vec![
        SourceDefinition::new("Gone", "https://up/gone.json", dir.path().join("gone.json")),
        SourceDefinition::new("Alice set", "https://up/alice.json", dir.path().join("alice_tv.json")),
        SourceDefinition::new("Broken", "https://up/broken.json", dir.path().join("broken.json")),
    ];
    let client = upstream().route("https://up/broken.json", "{ not json");
    let fetcher = fetcher(client);

    let collection = collect_references(&fetcher, &sources, &CancellationToken::new()).await;

    assert_eq!(collection.failed_sources, vec!["Gone", "Broken"]);
    assert_eq!(collection.references.len(), 3);
    assert!(collection.references.iter().all(|r| r.source_label == "Alice set"));
    let indexes: Vec<usize> = collection.references.iter().map(|r| r.index).collect();
    assert_eq!(indexes, vec![0, 1, 2]);

    let rewrite = rewrite_sources(&fetcher, &sources, &Default::default(), &CancellationToken::new()).await;
    assert_eq!(rewrite.skipped, vec!["Gone", "Broken"]);
    assert!(!dir.path().join("gone.json").exists());
}

#[tokio::test]
async fn no_sources_yield_an_empty_catalog() {
    let dir = tempdir().unwrap();
    let fetcher = Arc::new(fetcher(MemoryClient::default()));
    let store = Arc::new(ContentStore::open(dir.path().join("assets")).unwrap());
    let cancel = CancellationToken::new();

    let collection = collect_references(&fetcher, &[], &cancel).await;
    let report = FetchPool::new(IconWorker::new(fetcher, store, ""))
        .run(collection.references, &cancel)
        .await;
    let build = build_catalog(&resolve(report.outcomes), None, &CatalogOptions::default());

    assert!(build.catalog.icons.is_empty());
    assert_eq!(build.catalog.description, "No icons were collected from any source.");

    let path = dir.path().join("icons/allinone.json");
    write_catalog(&path, &build.catalog).unwrap();
    let written: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(written["icons"], serde_json::json!([]));
}

#[tokio::test]
async fn primary_election_ignores_completion_order() {
    let dir = tempdir().unwrap();
    let source = SourceDefinition::new("Alice set", "https://up/alice.json", dir.path().join("alice_x.json"));
    // the first-listed copy finishes last
    let client = MemoryClient::default()
        .route(
            "https://up/alice.json",
            manifest(&[("First", "https://cdn/1.png"), ("Second", "https://cdn/2.png")]),
        )
        .route("https://cdn/1.png", PNG_A)
        .route("https://cdn/2.png", PNG_A)
        .delay("https://cdn/1.png", Duration::from_millis(50));
    let fetcher = Arc::new(fetcher(client));
    let store = Arc::new(ContentStore::open(dir.path().join("assets")).unwrap());
    let cancel = CancellationToken::new();

    let collection = collect_references(&fetcher, &[source], &cancel).await;
    let report = FetchPool::new(IconWorker::new(fetcher, store, "https://mirror/"))
        .with_options(PoolOptions::default().concurrency(2))
        .run(collection.references, &cancel)
        .await;
    let resolution = resolve(report.outcomes);

    assert_eq!(resolution.groups.len(), 1);
    assert_eq!(resolution.groups[0].primary.name, "First");
    assert_eq!(resolution.groups[0].aliases[0].name, "Second");
    assert!(resolution.groups[0].public_url.starts_with("https://mirror/"));
    assert_eq!(resolution.url_map.len(), 2);
}

#[tokio::test]
async fn cancellation_still_yields_a_valid_report() {
    let dir = tempdir().unwrap();
    let source = SourceDefinition::new("Alice set", "https://up/alice.json", dir.path().join("alice_x.json"));
    let client = MemoryClient::default()
        .route(
            "https://up/alice.json",
            manifest(&[("Fast", "https://cdn/fast.png"), ("Slow", "https://cdn/slow.png")]),
        )
        .route("https://cdn/fast.png", PNG_A)
        .route("https://cdn/slow.png", PNG_B)
        .delay("https://cdn/slow.png", Duration::from_secs(30));
    let fetcher = Arc::new(fetcher(client));
    let store = Arc::new(ContentStore::open(dir.path().join("assets")).unwrap());
    let cancel = CancellationToken::new();

    let collection = collect_references(&fetcher, &[source], &cancel).await;
    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        canceller.cancel();
    });

    let report = FetchPool::new(IconWorker::new(fetcher, store, ""))
        .with_options(PoolOptions::default().concurrency(2))
        .run(collection.references, &cancel)
        .await;

    assert!(report.cancelled);
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcomes[0].reference.name, "Fast");
    let build = build_catalog(&resolve(report.outcomes), None, &CatalogOptions::default());
    assert_eq!(build.catalog.icons.len(), 1);
}

#[tokio::test]
async fn worker_rejects_bad_inputs_without_storing() {
    let dir = tempdir().unwrap();
    let source = SourceDefinition::new("Alice set", "https://up/alice.json", "alice_x.json");
    let client = MemoryClient::default()
        .route("https://cdn/empty.png", "")
        .route("https://cdn/text.png", "plain text");
    let fetcher = Arc::new(fetcher(client));
    let store = Arc::new(ContentStore::open(dir.path()).unwrap());
    let worker = IconWorker::new(Arc::clone(&fetcher), store, "");

    let null = iconmirror_core::IconReference::new(0, "Null", "null", &source);
    assert!(matches!(worker.process(&null).await, Err(IconError::Fetch(_))));
    assert_eq!(fetcher.client().requests(), 0);

    let empty = iconmirror_core::IconReference::new(1, "Empty", "https://cdn/empty.png", &source);
    assert!(matches!(worker.process(&empty).await, Err(IconError::Empty { .. })));

    let text = iconmirror_core::IconReference::new(2, "Text", "https://cdn/text.png", &source);
    assert!(matches!(worker.process(&text).await, Err(IconError::UnsupportedFormat { .. })));

    let files = std::fs::read_dir(dir.path())
        .unwrap()
        .filter(|e| !e.as_ref().unwrap().file_name().to_string_lossy().starts_with('.'))
        .count();
    assert_eq!(files, 0);
}

#[test]
fn archive_mode_keeps_previous_entries() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("allinone.json");
    let previous = iconmirror_core::catalog::Catalog {
        name:        "Icon Catalog".into(),
        description: String::new(),
        icons:       vec![iconmirror_core::catalog::CatalogIcon {
            name:        "Old-carol".into(),
            url:         "icons/assets/old.png".into(),
            description: "Carol set".into(),
        }],
    };
    write_catalog(&path, &previous).unwrap();
    let loaded = load_catalog(&path).unwrap();

    let empty = resolve(Vec::new());
    let archived = build_catalog(&empty, Some(&loaded), &CatalogOptions {
        archive: true,
        ..CatalogOptions::default()
    });
    assert_eq!(archived.catalog.icons, previous.icons);
    assert!(archived.newly_added.is_empty());

    let rebuilt = build_catalog(&empty, Some(&loaded), &CatalogOptions::default());
    assert!(rebuilt.catalog.icons.is_empty());
}

#[test]
fn corrupt_previous_catalog_is_ignored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("allinone.json");
    std::fs::write(&path, "{ truncated").unwrap();
    assert!(load_catalog(&path).is_none());
    assert!(load_catalog(&dir.path().join("missing.json")).is_none());
}
