use anyhow::Result;
use tracing::Level;

/// Log to stderr. `verbosity` counts `-v` flags: warnings only by default.
pub fn init_logging(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to init logging: {e}"))
}
