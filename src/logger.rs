//! Logging setup for binaries and demos built on this crate.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the application. These helpers install a `fmt` subscriber
//! with a compact bracketed format.

use tracing::Level;

/// Install the standard subscriber with default level INFO.
///
/// The level can be overridden with `RUST_LOG`, e.g.
/// `RUST_LOG=manifolds=debug` to see per-iteration optimizer output.
/// Does nothing if a global subscriber is already installed.
pub fn init_logger() {
    init_logger_with_level(Level::INFO)
}

/// Install the standard subscriber with a custom default level
/// (still overridable via `RUST_LOG`).
pub fn init_logger_with_level(default_level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .event_format(BracketFormatter)
        .try_init();
}

/// `[LEVEL target] message`, with `file:line` in place of the target for
/// DEBUG and TRACE.
struct BracketFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for BracketFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let level = *metadata.level();

        write!(writer, "[{:<5} ", level)?;

        match (level, metadata.file()) {
            (Level::DEBUG | Level::TRACE, Some(file)) => {
                let filename = file.rsplit('/').next().unwrap_or(file);
                write!(writer, "{}", filename)?;
                if let Some(line) = metadata.line() {
                    write!(writer, ":{}", line)?;
                }
            }
            _ => write!(writer, "{}", metadata.target())?,
        }

        write!(writer, "] ")?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
