//! Tracing setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins over `default_directive` (e.g. `"bang_engine=info"`).
/// Returns false if a global subscriber was already installed.
pub fn init_tracing(default_directive: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_refused() {
        init_tracing("bang_engine=debug");
        assert!(!init_tracing("bang_engine=debug"));
    }
}
