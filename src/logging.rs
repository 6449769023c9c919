//! Log setup. The terminal belongs to the UI, so logs go to a file.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::ChallengeResult;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "ui_challenges=info,challenges=info";

/// Install a global subscriber appending to `path`.
///
/// Calling this twice is harmless; the second registration is ignored.
pub fn init(path: &Path) -> ChallengeResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    if tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_log_file() {
        let dir = std::env::temp_dir().join(format!("ui_challenges_log_{}", std::process::id()));
        let path = dir.join("nested").join("challenges.log");

        init(&path).unwrap();
        // Second call must not fail even though a subscriber exists
        init(&path).unwrap();
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
