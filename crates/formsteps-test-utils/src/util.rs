//! Utility functions.

use formsteps_core::StepsConfig;
use tracing_subscriber::EnvFilter;

/// Initialize tracing for tests.
///
/// Honors `RUST_LOG`. Otherwise the level comes from
/// [`StepsConfig::load`], so `FORMSTEPS_LOG_LEVEL=debug` turns on step
/// transitions. Safe to call from every test.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(StepsConfig::load().log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_repeatable() {
        init_test_tracing();
        init_test_tracing();
        tracing::info!("tracing initialised");
    }
}
