//! Redis container lifecycle for the integration suite.
//!
//! Argument building is pure and unit tested; the rest shells out to the
//! detected container runtime.

use std::time::Duration;

use tokio::process::Command;

use super::error::{IntegrationError, Result};

/// Container runtime (Docker or Podman).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContainerRuntime {
    #[default]
    Docker,
    Podman,
}

impl ContainerRuntime {
    pub fn command(self) -> &'static str {
        match self {
            ContainerRuntime::Docker => "docker",
            ContainerRuntime::Podman => "podman",
        }
    }
}

/// A disposable server container.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    pub name: &'static str,
    pub image: &'static str,
    pub port: u16,
}

pub const REDIS_SPEC: ContainerSpec = ContainerSpec {
    name: "rxredis-redis",
    image: "redis:7-alpine",
    port: 6379,
};

impl ContainerSpec {
    /// `redis://localhost:{port}`
    pub fn url(&self) -> String {
        format!("redis://localhost:{}", self.port)
    }
}

/// Arguments for `docker run` / `podman run`. The container is removed when
/// stopped and keeps no data.
pub fn run_args(spec: &ContainerSpec) -> Vec<String> {
    vec![
        "run".to_string(),
        "--rm".to_string(),
        "--name".to_string(),
        spec.name.to_string(),
        "-d".to_string(),
        "-p".to_string(),
        format!("{}:6379", spec.port),
        spec.image.to_string(),
    ]
}

/// Checks Docker first, then Podman.
pub async fn detect_runtime() -> Result<ContainerRuntime> {
    for runtime in [ContainerRuntime::Docker, ContainerRuntime::Podman] {
        let output = Command::new(runtime.command())
            .arg("--version")
            .output()
            .await;
        if matches!(output, Ok(output) if output.status.success()) {
            return Ok(runtime);
        }
    }

    Err(IntegrationError::DockerNotAvailable(
        "Neither docker nor podman found in PATH".to_string(),
    ))
}

pub async fn is_running(runtime: ContainerRuntime, name: &str) -> Result<bool> {
    let output = Command::new(runtime.command())
        .args(["ps", "-q", "-f", &format!("name={}", name)])
        .output()
        .await?;
    Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
}

pub async fn start(runtime: ContainerRuntime, spec: &ContainerSpec) -> Result<()> {
    stop(runtime, spec.name).await;

    let output = Command::new(runtime.command())
        .args(run_args(spec))
        .output()
        .await?;

    if !output.status.success() {
        return Err(IntegrationError::ContainerFailed(format!(
            "Failed to start container '{}': {}",
            spec.name,
            String::from_utf8_lossy(&output.stderr)
        )));
    }

    Ok(())
}

/// Stops the container. Errors are ignored since it might not exist.
pub async fn stop(runtime: ContainerRuntime, name: &str) {
    let _ = Command::new(runtime.command())
        .args(["stop", name])
        .output()
        .await;
}

/// Polls `redis-cli ping` inside the container until it answers `PONG`.
pub async fn wait_for_health(
    runtime: ContainerRuntime,
    spec: &ContainerSpec,
    timeout: Duration,
) -> Result<()> {
    let start = std::time::Instant::now();

    while start.elapsed() < timeout {
        let output = Command::new(runtime.command())
            .args(["exec", spec.name, "redis-cli", "ping"])
            .output()
            .await;

        if let Ok(output) = output {
            if output.status.success() && String::from_utf8_lossy(&output.stdout).trim() == "PONG"
            {
                return Ok(());
            }
        }

        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    Err(IntegrationError::ContainerNotHealthy {
        name: spec.name.to_string(),
        timeout_secs: timeout.as_secs(),
    })
}
