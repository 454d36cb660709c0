//! Log output for the gateway binary.
//!
//! `persona-gateway` composes [`env_filter`] and [`layer`] on one registry.
//! Only events from the gateway's own crates (plus `tower_http` request spans)
//! are rendered; hyper, reqwest and the rest of the dependency tree stay quiet
//! even when `RUST_LOG` is permissive.

use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Target of this crate's events, used for the client-level directive.
pub const TARGET_PREFIX: &str = "completion_client";

/// Crate roots whose events reach the output.
pub const WORKSPACE_TARGETS: &[&str] = &[
    "persona_gateway",
    "api",
    "prompt_router",
    TARGET_PREFIX,
    "tower_http",
];

/// Second-resolution UTC stamps, e.g. `2026-10-17T08:15:02Z`.
#[derive(Clone, Debug, Default)]
struct UtcSeconds;

impl FormatTime for UtcSeconds {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let stamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&stamp)
    }
}

/// `true` when `target` is one of [`WORKSPACE_TARGETS`] or a module inside it.
///
/// Matches whole path segments, so `api::routes` passes and `apis` does not.
pub fn is_workspace_target(target: &str) -> bool {
    WORKSPACE_TARGETS.iter().any(|root| {
        target
            .strip_prefix(root)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    })
}

/// Compact single-line formatter for gateway events.
///
/// Each line carries the timestamp, level, target and `file:line`. Closing
/// spans are printed too, which gives `generate_with` and `handle` their
/// latency. Colors are on only when stdout is a terminal.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_timer(UtcSeconds)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(io::stdout().is_terminal())
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(true))
        .with_filter(filter::filter_fn(|meta| is_workspace_target(meta.target())))
}

/// `completion_client=<level>`, for raising the client above the base filter.
pub fn client_directive(level: Level) -> Result<Directive, ParseError> {
    Directive::from_str(&format!(
        "{TARGET_PREFIX}={}",
        level.as_str().to_lowercase()
    ))
}

/// `RUST_LOG` (or `default` when unset or invalid), with the completion
/// client raised to `client_level` so outbound request lines show up.
pub fn env_filter(default: &str, client_level: Level) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    match client_directive(client_level) {
        Ok(directive) => base.add_directive(directive),
        Err(_) => base,
    }
}
