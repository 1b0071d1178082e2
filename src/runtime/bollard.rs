// ABOUTME: Bollard-backed RuntimeClient speaking the Docker Engine API.
// ABOUTME: Works against Docker and Podman through their Docker-compatible sockets.

use crate::runtime::detection::resolve_endpoint;
use crate::runtime::error::ConnectError;
use crate::runtime::traits::{
    ClientError, ContainerFilter, ContainerOps, ContainerSummary, ControlAction, CreateRequest,
    DaemonOps, ImageOps, ImageSummary, LogChunk, LogChunkStream, LogOps, LogOptions, LogSource,
    PullProgress, PullStream, RestartPolicy, RuntimeMetadata, SnapshotStream, Statistics,
    StatsOps, VolumeOps, VolumeSummary,
};
use crate::runtime::types::{DaemonEndpoint, RuntimeConfig, RuntimeType};
use crate::types::{ContainerId, ImageId, ImageName, VolumeName};
use async_trait::async_trait;
use bollard::Docker;
use bollard::container::LogOutput;
use bollard::models::{
    ContainerCreateBody, ContainerStatsResponse, CreateImageInfo, HostConfig, PortBinding,
    RestartPolicyNameEnum, VolumeCreateRequest,
};
use bollard::query_parameters::{
    CreateContainerOptions, CreateImageOptions, ListContainersOptions, ListImagesOptions,
    ListVolumesOptions, LogsOptions, RemoveContainerOptions, RemoveImageOptions,
    RemoveVolumeOptions, RestartContainerOptions, StartContainerOptions, StatsOptions,
    StopContainerOptions,
};
use chrono::DateTime;
use futures::StreamExt;
use std::collections::HashMap;
use std::time::Duration;

// =============================================================================
// Error Mapping
// =============================================================================

/// Daemon responses keep their status; everything else is a transport failure.
fn map_error(e: bollard::errors::Error) -> ClientError {
    match e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } => ClientError::daemon(status_code, message),
        bollard::errors::Error::DockerStreamError { error } => ClientError::daemon(500, error),
        other => ClientError::transport(other.to_string()),
    }
}

fn timeout_secs(timeout: Option<Duration>) -> Option<i32> {
    timeout.map(|d| i32::try_from(d.as_secs()).unwrap_or(i32::MAX))
}

// =============================================================================
// BollardClient
// =============================================================================

/// `RuntimeClient` over a unix-socket connection to a Docker-compatible daemon.
#[derive(Debug, Clone)]
pub struct BollardClient {
    client: Docker,
    runtime_type: RuntimeType,
}

impl BollardClient {
    pub fn new(client: Docker, runtime_type: RuntimeType) -> Self {
        Self {
            client,
            runtime_type,
        }
    }

    /// Connect to an endpoint returned by `detect_local()` or `resolve_endpoint()`.
    pub fn connect(endpoint: &DaemonEndpoint, timeout: Duration) -> Result<Self, ConnectError> {
        let client = Docker::connect_with_unix(
            &endpoint.socket_path,
            timeout.as_secs(),
            bollard::API_DEFAULT_VERSION,
        )
        .map_err(|e| ConnectError::Connection {
            socket: endpoint.socket_path.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!(
            "connected to {} daemon at {}",
            endpoint.runtime_type,
            endpoint.socket_path
        );
        Ok(Self::new(client, endpoint.runtime_type))
    }

    pub fn runtime_type(&self) -> RuntimeType {
        self.runtime_type
    }
}

/// Resolve the endpoint from config (or detection) and connect to it.
pub fn connect(config: &RuntimeConfig) -> Result<BollardClient, ConnectError> {
    let endpoint = resolve_endpoint(config)?;
    BollardClient::connect(&endpoint, config.timeout)
}

fn host_config(request: &CreateRequest) -> HostConfig {
    let mut port_bindings: HashMap<String, Option<Vec<PortBinding>>> = HashMap::new();
    for mapping in &request.host.port_bindings {
        let binding = PortBinding {
            host_ip: None,
            host_port: Some(mapping.host_port().to_string()),
        };
        if let Some(bindings) = port_bindings
            .entry(mapping.container_key())
            .or_insert_with(|| Some(Vec::new()))
        {
            bindings.push(binding);
        }
    }

    let restart_policy = match request.host.restart_policy {
        RestartPolicy::Always => Some(bollard::models::RestartPolicy {
            name: Some(RestartPolicyNameEnum::ALWAYS),
            maximum_retry_count: None,
        }),
        RestartPolicy::No => None,
    };

    HostConfig {
        port_bindings: if port_bindings.is_empty() {
            None
        } else {
            Some(port_bindings)
        },
        restart_policy,
        ..Default::default()
    }
}

fn exposed_ports(request: &CreateRequest) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for mapping in &request.host.port_bindings {
        let key = mapping.container_key();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

#[async_trait]
impl ContainerOps for BollardClient {
    async fn create_container(&self, request: &CreateRequest) -> Result<ContainerId, ClientError> {
        let exposed = exposed_ports(request);
        let body = ContainerCreateBody {
            image: Some(request.image.clone()),
            env: if request.env.is_empty() {
                None
            } else {
                Some(request.env.clone())
            },
            labels: if request.labels.is_empty() {
                None
            } else {
                Some(request.labels.clone().into_iter().collect())
            },
            exposed_ports: if exposed.is_empty() {
                None
            } else {
                Some(exposed)
            },
            host_config: Some(host_config(request)),
            ..Default::default()
        };

        let opts = CreateContainerOptions {
            name: if request.name.is_empty() {
                None
            } else {
                Some(request.name.clone())
            },
            ..Default::default()
        };

        let response = self
            .client
            .create_container(Some(opts), body)
            .await
            .map_err(map_error)?;

        for warning in &response.warnings {
            tracing::warn!("daemon warning creating {}: {}", response.id, warning);
        }

        Ok(ContainerId::new(response.id))
    }

    async fn control(&self, id: &ContainerId, action: ControlAction) -> Result<(), ClientError> {
        let name = id.as_str();
        let result = match action {
            ControlAction::Start => {
                self.client
                    .start_container(name, None::<StartContainerOptions>)
                    .await
            }
            ControlAction::Stop { timeout, signal } => {
                let opts = StopContainerOptions {
                    t: timeout_secs(timeout),
                    signal,
                };
                self.client.stop_container(name, Some(opts)).await
            }
            ControlAction::Restart { timeout } => {
                let opts = RestartContainerOptions {
                    t: timeout_secs(timeout),
                    ..Default::default()
                };
                self.client.restart_container(name, Some(opts)).await
            }
            ControlAction::Pause => self.client.pause_container(name).await,
            ControlAction::Unpause => self.client.unpause_container(name).await,
            ControlAction::Remove { force } => {
                let opts = RemoveContainerOptions {
                    force,
                    ..Default::default()
                };
                self.client.remove_container(name, Some(opts)).await
            }
        };
        result.map_err(map_error)
    }

    async fn list_containers(
        &self,
        filter: &ContainerFilter,
    ) -> Result<Vec<ContainerSummary>, ClientError> {
        let mut filters: HashMap<String, Vec<String>> = HashMap::new();
        if let Some(ref id) = filter.id {
            filters.insert("id".to_string(), vec![id.to_string()]);
        }

        let opts = ListContainersOptions {
            all: filter.all,
            filters: Some(filters),
            ..Default::default()
        };

        let containers = self
            .client
            .list_containers(Some(opts))
            .await
            .map_err(map_error)?;

        Ok(containers
            .into_iter()
            .map(|c| ContainerSummary {
                id: ContainerId::new(c.id.unwrap_or_default()),
                name: c
                    .names
                    .unwrap_or_default()
                    .first()
                    .map(|n| n.trim_start_matches('/').to_string())
                    .unwrap_or_default(),
                image: c.image.unwrap_or_default(),
                state: c
                    .state
                    .map(|s| format!("{s:?}").to_lowercase())
                    .unwrap_or_default(),
                status: c.status.unwrap_or_default(),
                labels: c.labels.unwrap_or_default().into_iter().collect(),
            })
            .collect())
    }
}

#[async_trait]
impl LogOps for BollardClient {
    async fn logs(
        &self,
        id: &ContainerId,
        opts: &LogOptions,
    ) -> Result<LogChunkStream, ClientError> {
        let log_opts = LogsOptions {
            stdout: opts.stdout,
            stderr: opts.stderr,
            follow: opts.follow,
            timestamps: opts.timestamps,
            tail: opts
                .tail
                .map(|n| n.to_string())
                .unwrap_or_else(|| "all".to_string()),
            ..Default::default()
        };

        let stream = self.client.logs(id.as_str(), Some(log_opts)).map(|item| {
            item.map(|output| match output {
                LogOutput::StdOut { message } | LogOutput::StdIn { message } => LogChunk {
                    source: LogSource::Stdout,
                    data: message,
                },
                LogOutput::StdErr { message } => LogChunk {
                    source: LogSource::Stderr,
                    data: message,
                },
                LogOutput::Console { message } => LogChunk {
                    source: LogSource::Console,
                    data: message,
                },
            })
            .map_err(map_error)
        });

        Ok(Box::pin(stream))
    }
}

#[async_trait]
impl StatsOps for BollardClient {
    async fn stats(&self, id: &ContainerId, follow: bool) -> Result<SnapshotStream, ClientError> {
        let opts = StatsOptions {
            stream: follow,
            one_shot: false,
        };
        let stream = self
            .client
            .stats(id.as_str(), Some(opts))
            .map(|item| item.map(|s| snapshot(&s)).map_err(map_error));
        Ok(Box::pin(stream))
    }
}

/// CPU usage from two cumulative samples, scaled so one busy core reads 100.
fn cpu_percent(total: u64, prev_total: u64, system: u64, prev_system: u64, cpus: u64) -> f64 {
    let cpu_delta = total.saturating_sub(prev_total);
    let system_delta = system.saturating_sub(prev_system);
    if cpu_delta == 0 || system_delta == 0 {
        return 0.0;
    }
    (cpu_delta as f64 / system_delta as f64) * cpus.max(1) as f64 * 100.0
}

fn snapshot(stats: &ContainerStatsResponse) -> Statistics {
    let cpu = stats.cpu_stats.as_ref();
    let precpu = stats.precpu_stats.as_ref();
    let cpu_percent = cpu_percent(
        cpu.and_then(|s| s.cpu_usage.as_ref())
            .and_then(|u| u.total_usage)
            .unwrap_or(0),
        precpu
            .and_then(|s| s.cpu_usage.as_ref())
            .and_then(|u| u.total_usage)
            .unwrap_or(0),
        cpu.and_then(|s| s.system_cpu_usage).unwrap_or(0),
        precpu.and_then(|s| s.system_cpu_usage).unwrap_or(0),
        cpu.and_then(|s| s.online_cpus).unwrap_or(1) as u64,
    );

    let (memory_usage, memory_limit) = stats
        .memory_stats
        .as_ref()
        .map(|m| (m.usage.unwrap_or(0), m.limit.unwrap_or(0)))
        .unwrap_or((0, 0));
    let memory_percent = if memory_limit > 0 {
        memory_usage as f64 / memory_limit as f64 * 100.0
    } else {
        0.0
    };

    let (network_rx_bytes, network_tx_bytes) = stats
        .networks
        .as_ref()
        .map(|nets| {
            nets.values().fold((0u64, 0u64), |(rx, tx), n| {
                (rx + n.rx_bytes.unwrap_or(0), tx + n.tx_bytes.unwrap_or(0))
            })
        })
        .unwrap_or((0, 0));

    let mut block_read_bytes = 0;
    let mut block_write_bytes = 0;
    let entries = stats
        .blkio_stats
        .as_ref()
        .and_then(|b| b.io_service_bytes_recursive.as_ref());
    for entry in entries.into_iter().flatten() {
        let value = entry.value.unwrap_or(0);
        match entry.op.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("read") => block_read_bytes += value,
            Some("write") => block_write_bytes += value,
            _ => {}
        }
    }

    Statistics {
        cpu_percent,
        memory_usage,
        memory_limit,
        memory_percent,
        network_rx_bytes,
        network_tx_bytes,
        block_read_bytes,
        block_write_bytes,
        pids: stats
            .pids_stats
            .as_ref()
            .and_then(|p| p.current)
            .unwrap_or(0),
    }
}

fn pull_progress(info: CreateImageInfo) -> Result<PullProgress, ClientError> {
    if let Some(message) = info.error_detail.and_then(|d| d.message) {
        return Err(ClientError::daemon(500, message));
    }
    let (current, total) = info
        .progress_detail
        .map(|p| (p.current, p.total))
        .unwrap_or((None, None));
    Ok(PullProgress {
        layer: info.id,
        status: info.status.unwrap_or_default(),
        current,
        total,
    })
}

#[async_trait]
impl ImageOps for BollardClient {
    async fn pull_image(&self, image: &ImageName) -> Result<PullStream, ClientError> {
        let opts = CreateImageOptions {
            from_image: Some(image.reference()),
            ..Default::default()
        };
        let stream = self
            .client
            .create_image(Some(opts), None, None)
            .map(|item| item.map_err(map_error).and_then(pull_progress));
        Ok(Box::pin(stream))
    }

    async fn list_images(&self) -> Result<Vec<ImageSummary>, ClientError> {
        let images = self
            .client
            .list_images(Some(ListImagesOptions::default()))
            .await
            .map_err(map_error)?;

        Ok(images
            .into_iter()
            .map(|img| ImageSummary {
                id: ImageId::new(img.id),
                repo_tags: img.repo_tags,
                created: DateTime::from_timestamp(img.created, 0),
                size: img.size,
            })
            .collect())
    }

    async fn remove_image(&self, id: &ImageId, force: bool) -> Result<(), ClientError> {
        let opts = RemoveImageOptions {
            force,
            ..Default::default()
        };
        self.client
            .remove_image(id.as_str(), Some(opts), None)
            .await
            .map_err(map_error)?;
        Ok(())
    }
}

fn volume_request(name: &VolumeName) -> VolumeCreateRequest {
    VolumeCreateRequest {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

#[async_trait]
impl VolumeOps for BollardClient {
    async fn create_volume(&self, name: &VolumeName) -> Result<VolumeSummary, ClientError> {
        let volume = self
            .client
            .create_volume(volume_request(name))
            .await
            .map_err(map_error)?;
        Ok(VolumeSummary {
            name: VolumeName::new(volume.name),
            driver: volume.driver,
            mountpoint: volume.mountpoint,
        })
    }

    async fn list_volumes(&self) -> Result<Vec<VolumeSummary>, ClientError> {
        let response = self
            .client
            .list_volumes(None::<ListVolumesOptions>)
            .await
            .map_err(map_error)?;

        Ok(response
            .volumes
            .unwrap_or_default()
            .into_iter()
            .map(|v| VolumeSummary {
                name: VolumeName::new(v.name),
                driver: v.driver,
                mountpoint: v.mountpoint,
            })
            .collect())
    }

    async fn remove_volume(&self, name: &VolumeName, force: bool) -> Result<(), ClientError> {
        let opts = RemoveVolumeOptions {
            force,
            ..Default::default()
        };
        self.client
            .remove_volume(name.as_str(), Some(opts))
            .await
            .map_err(map_error)
    }
}

#[async_trait]
impl DaemonOps for BollardClient {
    async fn info(&self) -> Result<RuntimeMetadata, ClientError> {
        let info = self.client.info().await.map_err(map_error)?;

        let name = match self.runtime_type {
            RuntimeType::Docker => "Docker".to_string(),
            RuntimeType::Podman => "Podman".to_string(),
        };

        Ok(RuntimeMetadata {
            name,
            version: info.server_version.unwrap_or_default(),
            api_version: bollard::API_DEFAULT_VERSION.to_string(),
            os: info.operating_system.unwrap_or_default(),
            arch: info.architecture.unwrap_or_default(),
        })
    }

    async fn ping(&self) -> Result<(), ClientError> {
        self.client.ping().await.map_err(map_error)?;
        Ok(())
    }
}
