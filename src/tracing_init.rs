//! Tracing setup with environment-based filtering
//!
//! Detection is silent by default; per-call diagnostics (probe quality,
//! committed window, gate rejections) are emitted at `debug`/`trace` and
//! enabled through `RUST_LOG`:
//! - `RUST_LOG=rustydtmf=debug` - adaptive controller decisions
//! - `RUST_LOG=rustydtmf::detect=trace` - validity gate rejections

use once_cell::sync::Lazy;

/// Initialize tracing for tests
///
/// Safe to call from every test; the subscriber is installed once. Output
/// is routed through the test writer so it interleaves with test captures.
pub fn init_test_tracing() {
    static TRACING: Lazy<()> = Lazy::new(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("rustydtmf=warn"));

        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_line_number(true)
            .with_test_writer()
            .init();
    });

    Lazy::force(&TRACING);
}

/// Initialize tracing for binaries; call once early in main()
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rustydtmf=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}
