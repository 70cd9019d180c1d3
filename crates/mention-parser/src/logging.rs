use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize a tracing subscriber for hosts embedding the parser.
///
/// Uses the `RUST_LOG` environment variable to pick the level, defaulting to
/// "info". Per-token decisions are logged at `debug`, so
/// `RUST_LOG=mention_parser=debug` shows why a token was or was not linked.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    subscriber(filter_layer, std::io::stdout).try_init()?;

    Ok(())
}

/// Compact subscriber with targets and levels, writing through `writer`.
pub fn subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .compact()
        .with_writer(writer);

    tracing_subscriber::registry().with(filter).with(fmt_layer)
}
