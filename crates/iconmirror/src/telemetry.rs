//! Log output setup.
//!
//! `RUST_LOG` takes precedence when set; otherwise the level is `info`, or
//! `debug` for this workspace's crates with `--verbose`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

const VERBOSE_FILTER: &str =
    "info,iconmirror=debug,iconmirror_core=debug,iconmirror_fetch=debug,iconmirror_store=debug";

pub fn init(verbose: bool, json: bool) {
    let default = if verbose { VERBOSE_FILTER } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
