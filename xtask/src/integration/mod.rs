//! Integration test infrastructure.
//!
//! Runs the `rxredis` test suite against a real Redis server started in a
//! Docker (or Podman) container.
//!
//! # Usage
//!
//! ```bash
//! # Start Redis, run the suite, stop Redis
//! cargo xtask integration
//!
//! # Use a server that is already running
//! cargo xtask integration --no-docker --redis-url redis://localhost:6380
//!
//! # Only the in-memory driver, no server needed
//! cargo xtask integration --memory
//! ```

mod containers;
pub mod error;

pub use error::{IntegrationError, Result};

use std::time::Duration;

use containers::{ContainerRuntime, ContainerSpec, REDIS_SPEC};

use crate::prelude::*;

/// Integration test command.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Run integration tests against a real Redis server.

This command manages a Redis container for local testing and runs the
rxredis test suite with REDIS_URL pointing at it. Tests that need a
server are skipped when REDIS_URL is not set, so --memory runs only the
in-memory driver.

Environment variables:
  REDIS_URL           - Override Redis URL (default: redis://localhost:6379)")]
pub struct IntegrationCommand {
    /// Run only the in-memory driver tests (no container).
    #[arg(long)]
    pub memory: bool,

    /// Skip Docker container management (assume Redis is already running).
    #[arg(long)]
    pub no_docker: bool,

    /// Keep the container running after tests complete.
    #[arg(long)]
    pub keep_containers: bool,

    /// Redis URL handed to the tests.
    #[arg(long, env = "REDIS_URL")]
    pub redis_url: Option<String>,

    /// Host port for the Redis container.
    #[arg(long, default_value = "6379")]
    pub port: u16,

    /// Timeout in seconds for container health checks.
    #[arg(long, default_value = "30")]
    pub health_timeout: u64,
}

/// Main entry point for integration command.
pub async fn run(command: IntegrationCommand, global: crate::Global) -> Result<()> {
    let spec = ContainerSpec {
        port: command.port,
        ..REDIS_SPEC
    };

    if !global.is_silent() {
        aprintln!("{}", p_b("Integration Tests"));
        aprintln!();
        aprintln!(
            "{} Driver: {}",
            p_b("Config:"),
            if command.memory { "Memory" } else { "Memory + Redis" }
        );
        aprintln!();
    }

    if command.memory {
        return finish(run_tests(None, &global).await?);
    }

    let redis_url = command.redis_url.clone().unwrap_or_else(|| spec.url());

    let runtime = if command.no_docker {
        if !global.is_silent() {
            aprintln!(
                "{} {}",
                p_y("⚠️"),
                "Skipping Redis container management (--no-docker)"
            );
        }
        None
    } else {
        Some(containers::detect_runtime().await?)
    };

    let started = match runtime {
        Some(runtime) => start_redis(runtime, &spec, command.health_timeout, &global).await?,
        None => false,
    };

    let passed = run_tests(Some(&redis_url), &global).await;

    if let Some(runtime) = runtime.filter(|_| started) {
        if command.keep_containers {
            if !global.is_silent() {
                aprintln!(
                    "{} {}",
                    p_y("⚠️"),
                    "Container left running (--keep-containers)"
                );
            }
        } else {
            stop_redis(runtime, &spec, &global).await;
        }
    }

    finish(passed?)
}

fn finish(passed: bool) -> Result<()> {
    aprintln!();
    if passed {
        aprintln!("{} {}", p_g("✅"), p_g("All integration tests passed!"));
        Ok(())
    } else {
        aprintln!("{} {}", p_r("❌"), p_r("Some integration tests failed"));
        Err(IntegrationError::TestFailed(
            "One or more test suites failed".to_string(),
        ))
    }
}

/// Runs `cargo test -p rxredis`, with `REDIS_URL` set when a server is given.
async fn run_tests(redis_url: Option<&str>, global: &crate::Global) -> Result<bool> {
    if !global.is_silent() {
        aprintln!("{} {}", p_b("🔧"), p_b("Running rxredis tests..."));
        if let Some(url) = redis_url {
            aprintln!("{} REDIS_URL={}", p_b("  →"), p_y(url));
        }
    }

    let mut cmd = tokio::process::Command::new("cargo");
    cmd.args(["test", "-p", "rxredis"]);
    match redis_url {
        Some(url) => {
            cmd.env("REDIS_URL", url);
        }
        None => {
            cmd.env_remove("REDIS_URL");
        }
    }
    if global.is_verbose() {
        cmd.args(["--", "--nocapture"]);
    }

    let status = cmd.status().await?;
    Ok(status.success())
}

/// Starts the container unless one is already running. Returns whether this
/// call started it.
async fn start_redis(
    runtime: ContainerRuntime,
    spec: &ContainerSpec,
    timeout_secs: u64,
    global: &crate::Global,
) -> Result<bool> {
    if containers::is_running(runtime, spec.name).await? {
        if !global.is_silent() {
            aprintln!("{} {}", p_y("⚠️"), "Redis container already running");
        }
        return Ok(false);
    }

    if !global.is_silent() {
        aprintln!("{} {}", p_b("🐳"), "Starting Redis container...");
    }

    containers::start(runtime, spec).await?;

    if !global.is_silent() {
        aprintln!(
            "{} {}",
            p_b("⏳"),
            format!("Waiting for Redis health (max {}s)...", timeout_secs)
        );
    }

    containers::wait_for_health(runtime, spec, Duration::from_secs(timeout_secs)).await?;

    if !global.is_silent() {
        aprintln!("{} {}", p_g("✅"), "Redis is ready");
    }

    Ok(true)
}

async fn stop_redis(runtime: ContainerRuntime, spec: &ContainerSpec, global: &crate::Global) {
    if !global.is_silent() {
        aprintln!("{} {}", p_b("🐳"), "Stopping Redis container...");
    }

    containers::stop(runtime, spec.name).await;

    if !global.is_silent() {
        aprintln!("{} {}", p_g("✅"), "Redis container stopped");
    }
}
