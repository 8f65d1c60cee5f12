//! Development runner for the demo binary.
//!
//! Implements `cargo xtask dev`, which starts any containers the selected
//! backend needs, runs the demo with the matching cargo features, and stops
//! the containers again when the demo exits.

pub mod containers;
pub mod error;

use std::time::Duration;

use tokio::process::Command;

use crate::prelude::*;
use containers::{Backend, ContainerRuntime, ContainerSpec};
use error::{DevError, Result};

/// Development command.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Run the demo in development mode.

Starts a local Redis container when the redis backend is selected, waits
for it to become healthy, then runs the demo binary with the matching
cargo features. Containers started by this command are stopped when the
demo exits.

Examples:
  cargo xtask dev                      # in-memory backend, no containers
  cargo xtask dev --backend redis      # Redis-backed, starts a container
  cargo xtask dev --backend redis --once --keep-containers")]
pub struct DevCommand {
    /// Store backend: memory (default), redis
    #[arg(long, default_value = "memory", env = "BOXOFFICE_BACKEND")]
    pub backend: Backend,

    /// Milliseconds to pause between demo actions
    #[arg(long, default_value = "1000")]
    pub pause_ms: u64,

    /// Run the demo script once and exit instead of waiting for Ctrl+C
    #[arg(long)]
    pub once: bool,

    /// Build in release mode
    #[arg(long)]
    pub release: bool,

    /// Use podman instead of docker
    #[arg(long, env = "BOXOFFICE_PODMAN")]
    pub podman: bool,

    /// Remove the Redis data volume before starting containers
    #[arg(long)]
    pub flush: bool,

    /// Keep containers running after the demo exits
    #[arg(long)]
    pub keep_containers: bool,
}

pub async fn run(command: DevCommand, global: crate::Global) -> Result<()> {
    let features = containers::cargo_features(command.backend);
    let required = containers::required_containers(command.backend);

    if !global.is_silent() {
        aprintln!("{} Starting demo", p_b("🎫"));
        aprintln!(
            "   Backend: {}, Features: {}",
            format!("{:?}", command.backend).to_lowercase(),
            p_y(features)
        );
    }

    // Detect container runtime if containers are needed
    let runtime = if !required.is_empty() {
        Some(containers::detect_runtime(command.podman).await?)
    } else {
        None
    };

    // Track started containers for cleanup
    let mut started_containers: Vec<&'static ContainerSpec> = Vec::new();

    if let Some(runtime) = runtime {
        // Handle --flush: drop persisted Redis data for a clean run
        if command.flush {
            for spec in &required {
                if !global.is_silent() {
                    aprintln!("{} Removing volume {}...", p_y("🗑"), spec.volume_name);
                }
                // The volume may not exist yet on a fresh machine
                let _ = containers::remove_volume(runtime, spec.volume_name).await;
            }
        }

        // Start required containers
        for spec in &required {
            if !global.is_silent() {
                aprintln!("{} Starting {}...", p_b("🐳"), spec.name);
            }

            match containers::start_container(runtime, spec).await {
                Ok(()) => {
                    started_containers.push(spec);
                }
                Err(e) => {
                    // Cleanup on error unless --keep-containers
                    if !command.keep_containers {
                        cleanup_containers(runtime, &started_containers, &global).await;
                    }
                    return Err(e);
                }
            }

            // Wait for health
            if !global.is_silent() {
                aprintln!("{} Waiting for {} to be healthy...", p_b("⏳"), spec.name);
            }

            match containers::wait_for_health(runtime, spec, Duration::from_secs(30)).await {
                Ok(()) => {
                    if !global.is_silent() {
                        aprintln!("{} {} is ready", p_g("✓"), spec.name);
                    }
                }
                Err(e) => {
                    if !command.keep_containers {
                        cleanup_containers(runtime, &started_containers, &global).await;
                    }
                    return Err(e);
                }
            }
        }
    }

    // Run the demo, then clean up regardless of how it went
    let status = run_demo_with_features(&command, features, &global).await;

    if !command.keep_containers {
        if let Some(runtime) = runtime {
            cleanup_containers(runtime, &started_containers, &global).await;
        }
    } else if !started_containers.is_empty() && !global.is_silent() {
        aprintln!("{} Containers left running (--keep-containers)", p_y("⚠"));
    }

    let status = status?;
    if !status.success() {
        return Err(DevError::Io(std::io::Error::other("Demo process failed")));
    }

    Ok(())
}

/// Clean up started containers.
async fn cleanup_containers(
    runtime: ContainerRuntime,
    containers: &[&'static ContainerSpec],
    global: &crate::Global,
) {
    for spec in containers {
        if !global.is_silent() {
            aprintln!("{} Stopping {}...", p_b("🐳"), spec.name);
        }
        let _ = containers::stop_container(runtime, spec.name).await;
    }
}

/// Run the demo binary with the backend's features and environment variables.
async fn run_demo_with_features(
    command: &DevCommand,
    features: &str,
    global: &crate::Global,
) -> Result<std::process::ExitStatus> {
    let pause_ms = command.pause_ms.to_string();

    let mut args = vec![
        "run",
        "-p",
        "boxoffice",
        "--no-default-features",
        "--features",
        features,
    ];
    if command.release {
        args.push("--release");
    }
    args.extend(["--", "--pause-ms", pause_ms.as_str()]);
    if command.once {
        args.push("--once");
    }

    let mut cmd = Command::new("cargo");
    cmd.args(&args);

    // Set all environment variables from the configuration
    let env_vars = containers::environment_variables(command.backend);
    if global.is_verbose() {
        for (key, value) in &env_vars {
            aprintln!("   {}={}", key, value);
        }
    }
    for (key, value) in env_vars {
        cmd.env(key, value);
    }

    Ok(cmd.status().await?)
}
