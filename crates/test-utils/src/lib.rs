pub mod builders;

use std::io::Write;
use std::sync::Once;

use anyhow::Result;
use tempfile::NamedTempFile;
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Write `contents` to a temporary file ending in `.{extension}`.
///
/// The file is deleted when the returned handle is dropped.
pub fn temp_config(extension: &str, contents: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("confcheck-")
        .suffix(&format!(".{extension}"))
        .tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}
