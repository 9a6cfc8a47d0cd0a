//! Tracing setup
//!
//! Logs always go to stderr: stdout is the output region for the CLI and
//! the protocol stream for the MCP server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default level for this crate's own events
///
/// `search` and `interactive` print cards to the same terminal that shows
/// stderr, so they run quiet: per-search info lines such as
/// "Found 12 images" are hidden and only failures show up between cards.
/// `serve` and `--verbose` keep info.
fn crate_directive(quiet: bool) -> String {
    format!("image_search={}", if quiet { "warn" } else { "info" })
}

/// Filter from `RUST_LOG` plus the crate default
fn build_filter(quiet: bool) -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::from_default_env().add_directive(crate_directive(quiet).parse()?))
}

fn json_requested(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("json"))
}

/// Install the global subscriber
///
/// `LOG_FORMAT=json` switches from plain lines to JSON lines.
pub fn init_tracing(quiet: bool) -> anyhow::Result<()> {
    let filter = build_filter(quiet)?;
    let json = json_requested(std::env::var("LOG_FORMAT").ok().as_deref());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()?;

    Ok(())
}
