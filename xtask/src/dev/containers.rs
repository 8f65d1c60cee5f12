//! Container management for development dependencies.
//!
//! This module manages Docker/Podman containers for development services,
//! currently just Redis. It follows the Functional Core - Imperative Shell
//! pattern:
//!
//! - **Pure functions** build command arguments and determine which containers
//!   are needed based on the selected backend. These have no side effects.
//! - **I/O functions** execute container commands, check health, and manage
//!   container lifecycle.

use std::time::Duration;

use tokio::process::Command;

use super::error::{DevError, Result};

// ============================================================================
// Types
// ============================================================================

/// Store backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    #[default]
    Memory,
    Redis,
}

/// Container runtime (Docker or Podman).
#[derive(Debug, Clone, Copy, Default)]
pub enum ContainerRuntime {
    #[default]
    Docker,
    Podman,
}

/// Specification for a container.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    pub name: &'static str,
    pub image: &'static str,
    pub port: u16,
    pub volume_name: &'static str,
    pub volume_path: &'static str,
    pub command: Option<&'static str>,
    pub health_check: HealthCheck,
}

/// Health check strategy for a container.
#[derive(Debug, Clone)]
pub enum HealthCheck {
    /// Redis PING check.
    Redis,
}

// ============================================================================
// Container Specifications (Constants)
// ============================================================================

/// Redis container specification.
pub const REDIS_SPEC: ContainerSpec = ContainerSpec {
    name: "boxoffice-redis",
    image: "redis:7-alpine",
    port: 6379,
    volume_name: "boxoffice-redis-data",
    volume_path: "/data",
    command: Some("redis-server --appendonly yes"),
    health_check: HealthCheck::Redis,
};

// ============================================================================
// Pure Functions (Functional Core)
// ============================================================================

/// Builds arguments for `docker run` / `podman run`.
///
/// Returns a vector of command arguments including:
/// - `--name {name}`
/// - `-d` (detached mode)
/// - `-p {port}:{port}` (port mapping)
/// - `-v {volume_name}:{volume_path}` (volume mount)
/// - `{image}`
/// - Command args if present (split by whitespace)
pub fn container_run_args(spec: &ContainerSpec) -> Vec<String> {
    let mut args = vec![
        "run".to_string(),
        "--name".to_string(),
        spec.name.to_string(),
        "-d".to_string(),
        "-p".to_string(),
        format!("{}:{}", spec.port, spec.port),
        "-v".to_string(),
        format!("{}:{}", spec.volume_name, spec.volume_path),
        spec.image.to_string(),
    ];

    if let Some(cmd) = spec.command {
        args.extend(cmd.split_whitespace().map(String::from));
    }

    args
}

/// Returns which containers are needed for the given backend.
///
/// - Redis backend → include `REDIS_SPEC`
/// - In-memory backend → empty vec
pub fn required_containers(backend: Backend) -> Vec<&'static ContainerSpec> {
    match backend {
        Backend::Redis => vec![&REDIS_SPEC],
        Backend::Memory => Vec::new(),
    }
}

/// Returns the cargo feature string for the given backend.
pub fn cargo_features(backend: Backend) -> &'static str {
    match backend {
        Backend::Memory => "memory",
        Backend::Redis => "redis",
    }
}

/// Returns environment variables for the given backend.
///
/// The Redis backend gets `REDIS_URL` pointing at the local container;
/// the in-memory backend needs nothing.
pub fn environment_variables(backend: Backend) -> Vec<(&'static str, String)> {
    match backend {
        Backend::Redis => vec![("REDIS_URL", "redis://localhost:6379".to_string())],
        Backend::Memory => Vec::new(),
    }
}

// ============================================================================
// I/O Functions (Imperative Shell)
// ============================================================================

/// Returns the command name for the container runtime.
pub fn runtime_command(runtime: ContainerRuntime) -> &'static str {
    match runtime {
        ContainerRuntime::Docker => "docker",
        ContainerRuntime::Podman => "podman",
    }
}

/// Detects which container runtime is available.
///
/// If `prefer_podman` is true, checks Podman first, then Docker.
/// Otherwise checks Docker first, then Podman.
///
/// Returns an error if neither runtime is available.
pub async fn detect_runtime(prefer_podman: bool) -> Result<ContainerRuntime> {
    let check_order = if prefer_podman {
        [
            (ContainerRuntime::Podman, "podman"),
            (ContainerRuntime::Docker, "docker"),
        ]
    } else {
        [
            (ContainerRuntime::Docker, "docker"),
            (ContainerRuntime::Podman, "podman"),
        ]
    };

    for (runtime, cmd) in check_order {
        let output = Command::new(cmd).arg("--version").output().await;

        if let Ok(output) = output {
            if output.status.success() {
                return Ok(runtime);
            }
        }
    }

    Err(DevError::ContainerRuntimeNotFound(
        "Neither docker nor podman found in PATH".to_string(),
    ))
}

/// Stops and removes a container.
///
/// Errors are ignored since the container might not exist.
pub async fn stop_container(runtime: ContainerRuntime, name: &str) -> Result<()> {
    let cmd = runtime_command(runtime);

    // Stop container (ignore errors - container might not be running)
    let _ = Command::new(cmd).args(["stop", name]).output().await;

    // Remove container (ignore errors - container might not exist)
    let _ = Command::new(cmd).args(["rm", name]).output().await;

    Ok(())
}

/// Removes a volume.
pub async fn remove_volume(runtime: ContainerRuntime, name: &str) -> Result<()> {
    let cmd = runtime_command(runtime);

    let output = Command::new(cmd)
        .args(["volume", "rm", name])
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DevError::Io(std::io::Error::other(format!(
            "Failed to remove volume '{}': {}",
            name, stderr
        ))));
    }

    Ok(())
}

/// Starts a container with the given specification.
///
/// First stops and removes any existing container with the same name,
/// then starts a new container.
pub async fn start_container(runtime: ContainerRuntime, spec: &ContainerSpec) -> Result<()> {
    let cmd = runtime_command(runtime);

    // Clean up any existing container
    stop_container(runtime, spec.name).await?;

    // Build run arguments
    let args = container_run_args(spec);
    let args_ref: Vec<&str> = args.iter().map(String::as_str).collect();

    // Start container
    let output = Command::new(cmd).args(&args_ref).output().await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DevError::ContainerStartFailed(format!(
            "Failed to start container '{}': {}",
            spec.name, stderr
        )));
    }

    Ok(())
}

/// Waits for a container to become healthy.
///
/// Polls the container's health check until it passes or the timeout is exceeded.
pub async fn wait_for_health(
    runtime: ContainerRuntime,
    spec: &ContainerSpec,
    timeout: Duration,
) -> Result<()> {
    let start = std::time::Instant::now();
    let poll_interval = Duration::from_millis(500);

    while start.elapsed() < timeout {
        let healthy = match &spec.health_check {
            HealthCheck::Redis => check_redis_health(runtime, spec.name).await,
        };

        if healthy {
            return Ok(());
        }

        tokio::time::sleep(poll_interval).await;
    }

    Err(DevError::ContainerNotHealthy {
        name: spec.name.to_string(),
        timeout_secs: timeout.as_secs(),
    })
}

/// Checks Redis health by running `redis-cli ping` inside the container.
async fn check_redis_health(runtime: ContainerRuntime, name: &str) -> bool {
    let cmd = runtime_command(runtime);

    let output = Command::new(cmd)
        .args(["exec", name, "redis-cli", "ping"])
        .output()
        .await;

    match output {
        Ok(output) => {
            output.status.success() && String::from_utf8_lossy(&output.stdout).trim() == "PONG"
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_run_args_redis() {
        let args = container_run_args(&REDIS_SPEC);

        assert!(args.contains(&"run".to_string()));
        assert!(args.contains(&"--name".to_string()));
        assert!(args.contains(&"boxoffice-redis".to_string()));
        assert!(args.contains(&"-d".to_string()));
        assert!(args.contains(&"-p".to_string()));
        assert!(args.contains(&"6379:6379".to_string()));
        assert!(args.contains(&"-v".to_string()));
        assert!(args.contains(&"boxoffice-redis-data:/data".to_string()));
        assert!(args.contains(&"redis:7-alpine".to_string()));
        // Command args should be split
        assert!(args.contains(&"redis-server".to_string()));
        assert!(args.contains(&"--appendonly".to_string()));
        assert!(args.contains(&"yes".to_string()));
    }

    #[test]
    fn test_required_containers_memory() {
        let containers = required_containers(Backend::Memory);
        assert!(containers.is_empty());
    }

    #[test]
    fn test_required_containers_redis() {
        let containers = required_containers(Backend::Redis);
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].name, "boxoffice-redis");
    }

    #[test]
    fn test_cargo_features() {
        assert_eq!(cargo_features(Backend::Memory), "memory");
        assert_eq!(cargo_features(Backend::Redis), "redis");
    }

    #[test]
    fn test_environment_variables_memory() {
        let vars = environment_variables(Backend::Memory);
        assert!(vars.is_empty());
    }

    #[test]
    fn test_environment_variables_redis() {
        let vars = environment_variables(Backend::Redis);
        assert!(vars.contains(&("REDIS_URL", "redis://localhost:6379".to_string())));
    }

    #[test]
    fn test_runtime_command() {
        assert_eq!(runtime_command(ContainerRuntime::Docker), "docker");
        assert_eq!(runtime_command(ContainerRuntime::Podman), "podman");
    }
}
