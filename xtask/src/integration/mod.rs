//! Integration test infrastructure.
//!
//! This module provides commands for running integration tests against
//! real infrastructure (Redis via Docker).
//!
//! # Usage
//!
//! ```bash
//! # Run tests for both backends (in-memory + Redis)
//! cargo xtask integration
//!
//! # Run only the in-memory backend tests
//! cargo xtask integration --memory
//!
//! # Run only the Redis backend tests (requires Docker)
//! cargo xtask integration --redis
//!
//! # Skip container management (assumes Redis is already running)
//! cargo xtask integration --redis --no-docker
//! ```

pub mod error;

pub use error::{IntegrationError, Result};

use std::time::Duration;

use crate::dev::containers::{
    detect_runtime, start_container, stop_container, wait_for_health, ContainerRuntime, REDIS_SPEC,
};
use crate::prelude::*;

/// Integration test command.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Run integration tests against real infrastructure.

This command manages Docker containers for local testing and runs the
test suite against real store backends.

By default, it runs tests for both the in-memory and Redis backends.
The command automatically starts the Redis container and stops it
afterward.

Environment variables:
  REDIS_URL    - Override Redis URL (default: redis://localhost:6379)")]
pub struct IntegrationCommand {
    // Backend flags
    /// Run only the in-memory backend tests.
    #[arg(long, conflicts_with = "redis")]
    pub memory: bool,

    /// Run only the Redis backend tests (requires Docker).
    #[arg(long, conflicts_with = "memory")]
    pub redis: bool,

    // Container management flags
    /// Skip Docker container management (assume Redis is already running).
    #[arg(long)]
    pub no_docker: bool,

    /// Keep containers running after tests complete.
    #[arg(long)]
    pub keep_containers: bool,

    /// Timeout in seconds for container health checks.
    #[arg(long, default_value = "30")]
    pub health_timeout: u64,
}

/// Main entry point for integration command.
pub async fn run(command: IntegrationCommand, global: crate::Global) -> Result<()> {
    // Determine which backends to test
    // If neither flag is set, run both; otherwise run only the specified one
    let run_memory = command.memory || !command.redis;
    let run_redis = command.redis || !command.memory;

    if !global.is_silent() {
        aprintln!("{}", p_b("Integration Tests"));
        aprintln!();
        aprintln!(
            "{} Backends: {}",
            p_b("Config:"),
            if run_memory && run_redis {
                "Memory + Redis"
            } else if run_memory {
                "Memory"
            } else {
                "Redis"
            }
        );
        aprintln!();
    }

    // Detect container runtime if we need containers
    let needs_containers = run_redis && !command.no_docker;
    let runtime = if needs_containers {
        Some(detect_runtime(false).await?)
    } else {
        None
    };

    // Track whether we started the Redis container
    let mut redis_started = false;

    let mut all_passed = true;

    // Run in-memory backend tests
    if run_memory {
        if !global.is_silent() {
            aprintln!(
                "{} {}",
                p_b("🔧"),
                p_b("Running in-memory backend tests...")
            );
        }

        if !run_tests_with_features("memory", vec![], &global).await? {
            all_passed = false;
        }
    }

    // Run Redis backend tests (requires Docker)
    if run_redis {
        if !global.is_silent() {
            aprintln!("{} {}", p_b("🔧"), p_b("Running Redis backend tests..."));
        }

        // Start Redis container if needed
        if !command.no_docker {
            let rt = runtime.expect("runtime should be detected when containers are needed");
            redis_started = start_redis_container(command.health_timeout, &global, rt).await?;
        } else if !global.is_silent() {
            aprintln!(
                "{} {}",
                p_y("⚠️"),
                "Skipping Redis container management (--no-docker)"
            );
        }

        let env_vars = vec![("REDIS_URL", "redis://localhost:6379")];

        if !run_tests_with_features("redis", env_vars, &global).await? {
            all_passed = false;
        }
    }

    // Cleanup containers
    if !command.keep_containers {
        if let Some(rt) = runtime {
            if redis_started {
                stop_redis_container(&global, rt).await?;
            }
        }
    } else if redis_started && !global.is_silent() {
        aprintln!(
            "{} {}",
            p_y("⚠️"),
            "Containers left running (--keep-containers)"
        );
    }

    aprintln!();
    if all_passed {
        aprintln!("{} {}", p_g("✅"), p_g("All integration tests passed!"));
        Ok(())
    } else {
        aprintln!("{} {}", p_r("❌"), p_r("Some integration tests failed"));
        Err(IntegrationError::TestFailed(
            "One or more test suites failed".to_string(),
        ))
    }
}

/// Run tests with a specific backend feature.
async fn run_tests_with_features(
    backend: &str,
    env_vars: Vec<(&str, &str)>,
    global: &crate::Global,
) -> Result<bool> {
    if !global.is_silent() {
        aprintln!("{} Running with features: {}", p_b("  →"), p_y(backend));
    }

    // Build the command
    let mut cmd = tokio::process::Command::new("cargo");
    cmd.args([
        "test",
        "-p",
        "boxoffice",
        "--features",
        backend,
        "--no-default-features",
    ]);

    // Add environment variables
    for (key, value) in env_vars {
        cmd.env(key, value);
    }

    let status = cmd.status().await?;

    if status.success() {
        if !global.is_silent() {
            aprintln!("{} {} tests passed", p_g("✅"), backend);
        }
        Ok(true)
    } else {
        aprintln!("{} {} tests failed", p_r("❌"), backend);
        Ok(false)
    }
}

/// Start the Redis container.
async fn start_redis_container(
    timeout_secs: u64,
    global: &crate::Global,
    runtime: ContainerRuntime,
) -> Result<bool> {
    // Check if container is already running
    let cmd = crate::dev::containers::runtime_command(runtime);
    let ps_output = tokio::process::Command::new(cmd)
        .args(["ps", "-q", "-f", &format!("name={}", REDIS_SPEC.name)])
        .output()
        .await?;

    if !String::from_utf8_lossy(&ps_output.stdout).trim().is_empty() {
        if !global.is_silent() {
            aprintln!("{} {}", p_y("⚠️"), "Redis container already running");
        }
        return Ok(false); // Container exists but we didn't start it
    }

    if !global.is_silent() {
        aprintln!("{} {}", p_b("🐳"), "Starting Redis container...");
    }

    // Start container using the container module
    start_container(runtime, &REDIS_SPEC).await?;

    // Wait for container to be healthy
    if !global.is_silent() {
        aprintln!(
            "{} {}",
            p_b("⏳"),
            format!("Waiting for Redis health (max {}s)...", timeout_secs)
        );
    }

    wait_for_health(runtime, &REDIS_SPEC, Duration::from_secs(timeout_secs)).await?;

    if !global.is_silent() {
        aprintln!("{} {}", p_g("✅"), "Redis is ready");
    }

    Ok(true)
}

/// Stop the Redis container.
async fn stop_redis_container(global: &crate::Global, runtime: ContainerRuntime) -> Result<()> {
    if !global.is_silent() {
        aprintln!("{} {}", p_b("🐳"), "Stopping Redis container...");
    }

    stop_container(runtime, REDIS_SPEC.name).await?;

    if !global.is_silent() {
        aprintln!("{} {}", p_g("✅"), "Redis container stopped");
    }

    Ok(())
}
