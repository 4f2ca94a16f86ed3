use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{LogConfig, LogFormat};

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Install the global subscriber, writing to stderr so command output stays clean.
///
/// `RUST_LOG` wins over the configured filter. Later calls are no-ops.
pub fn init_tracing(config: &LogConfig) {
    INSTALLED.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.filter));

        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_ansi(false);

        let registry = tracing_subscriber::registry().with(env_filter);
        let installed = match config.format {
            LogFormat::Json => registry.with(layer.json()).try_init(),
            LogFormat::Text => registry.with(layer.compact()).try_init(),
        };
        installed.ok();
    });
}
