use std::sync::Once;

use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` is honoured; without it only warnings reach stderr so shell
/// output stays readable, while `sales_ledger=info` keeps startup notes.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let mut filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy();
        if let Ok(directive) = "sales_ledger=info".parse() {
            filter = filter.add_directive(directive);
        }

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
