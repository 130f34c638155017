pub mod core;

use tracing_subscriber::EnvFilter;

pub use crate::core::error::{ProvisionError, ProvisionResult};
pub use crate::core::pipeline::{Pipeline, RunOutcome, Selections};

/// Initialize structured logging. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,makemcserver=debug")),
        )
        .with_target(false)
        .init();
}
