//! Hook entry point: read the envelope from stdin, route, emit, exit 0.
//!
//! The exit code is unconditionally zero. A hook that fails must never
//! block the user's prompt, so every error path degrades to an empty
//! emission. Diagnostics go to stderr only; stdout belongs to the host.

use std::io::Read;
use std::process::ExitCode;

use skill_router::{hook, Router};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let started = std::time::Instant::now();

    let mut raw = String::new();
    if std::io::stdin().read_to_string(&mut raw).is_err() {
        return ExitCode::SUCCESS;
    }

    let prompt = match hook::read_prompt(&raw) {
        Ok(prompt) => prompt,
        Err(e) => {
            tracing::debug!("no usable input: {e}");
            return ExitCode::SUCCESS;
        }
    };

    let output = match Router::from_env() {
        Ok(router) => match router.route(&prompt).await {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!("routing failed: {e}");
                None
            }
        },
        Err(e) => {
            tracing::debug!("router init failed: {e}");
            None
        }
    };

    if let Some(text) = output {
        if let Err(e) = hook::emit(&text) {
            tracing::debug!("emit failed: {e}");
        }
    }

    tracing::debug!("done in {}ms", started.elapsed().as_millis());
    ExitCode::SUCCESS
}
