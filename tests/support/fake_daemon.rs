// ABOUTME: In-memory RuntimeClient that emulates the daemon's status codes.
// ABOUTME: Lets orchestrator tests run without a Docker or Podman socket.

use async_trait::async_trait;
use berth::runtime::{
    ClientError, ContainerFilter, ContainerOps, ContainerSummary, ControlAction, CreateRequest,
    DaemonOps, ImageOps, ImageSummary, LogChunk, LogChunkStream, LogOps, LogOptions, PullProgress,
    PullStream, RuntimeMetadata, SnapshotStream, Statistics, StatsOps, VolumeOps, VolumeSummary,
};
use berth::types::{ContainerId, ImageId, ImageName, VolumeName};
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// Number of snapshots a followed stats stream yields before closing.
pub const FOLLOWED_SAMPLES: usize = 3;

#[derive(Debug, Clone)]
struct FakeContainer {
    name: String,
    image: String,
    state: &'static str,
    labels: BTreeMap<String, String>,
    volumes: BTreeSet<String>,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    /// Keyed by id; ids are allocated in increasing order so this is creation order.
    containers: BTreeMap<String, FakeContainer>,
    /// Local images: reference -> id.
    images: BTreeMap<String, String>,
    /// References a pull can fetch.
    registry: BTreeSet<String>,
    volumes: BTreeSet<String>,
    logs: HashMap<String, Vec<LogChunk>>,
    rpc_calls: usize,
    last_create: Option<CreateRequest>,
    last_control: Option<ControlAction>,
    unreachable: bool,
    empty_stats: bool,
}

impl State {
    fn allocate_id(&mut self) -> String {
        self.next_id += 1;
        format!("{:064x}", self.next_id)
    }

    fn rpc(&mut self) -> Result<(), ClientError> {
        self.rpc_calls += 1;
        if self.unreachable {
            return Err(ClientError::transport("connection refused"));
        }
        Ok(())
    }

    fn container_mut(&mut self, id: &str) -> Result<&mut FakeContainer, ClientError> {
        self.containers
            .get_mut(id)
            .ok_or_else(|| ClientError::daemon(404, format!("No such container: {id}")))
    }
}

/// Shared handle to an emulated daemon. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct FakeDaemon {
    state: Arc<Mutex<State>>,
}

impl FakeDaemon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `reference` present locally, as if pulled earlier.
    pub fn with_local_image(self, reference: &str) -> Self {
        {
            let mut state = self.state.lock();
            let id = format!("sha256:{}", state.allocate_id());
            state.images.insert(reference.to_string(), id);
        }
        self
    }

    /// Make `reference` available to pulls.
    pub fn with_registry_image(self, reference: &str) -> Self {
        self.state.lock().registry.insert(reference.to_string());
        self
    }

    /// Every subsequent call fails with a transport error.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.state.lock().unreachable = unreachable;
    }

    /// Stats streams close before the first snapshot.
    pub fn set_empty_stats(&self, empty: bool) {
        self.state.lock().empty_stats = empty;
    }

    pub fn set_logs(&self, id: &ContainerId, chunks: Vec<LogChunk>) {
        self.state.lock().logs.insert(id.to_string(), chunks);
    }

    /// Record that a container mounts a volume.
    pub fn attach_volume(&self, id: &ContainerId, volume: &VolumeName) {
        let mut state = self.state.lock();
        if let Some(container) = state.containers.get_mut(id.as_str()) {
            container.volumes.insert(volume.to_string());
        }
    }

    pub fn rpc_calls(&self) -> usize {
        self.state.lock().rpc_calls
    }

    pub fn last_create(&self) -> Option<CreateRequest> {
        self.state.lock().last_create.clone()
    }

    pub fn last_control(&self) -> Option<ControlAction> {
        self.state.lock().last_control.clone()
    }

    pub fn image_id(&self, reference: &str) -> Option<ImageId> {
        self.state.lock().images.get(reference).map(ImageId::new)
    }

    pub fn container_count(&self) -> usize {
        self.state.lock().containers.len()
    }

    fn not_modified(id: &str) -> ClientError {
        ClientError::daemon(304, format!("container {id} already in requested state"))
    }

    fn conflict(id: &str, message: &str) -> ClientError {
        ClientError::daemon(409, format!("container {id} {message}"))
    }
}

#[async_trait]
impl ContainerOps for FakeDaemon {
    async fn create_container(&self, request: &CreateRequest) -> Result<ContainerId, ClientError> {
        let mut state = self.state.lock();
        state.rpc()?;
        state.last_create = Some(request.clone());

        if !state.images.contains_key(&request.image) {
            return Err(ClientError::daemon(
                404,
                format!("No such image: {}", request.image),
            ));
        }
        if !request.name.is_empty() && state.containers.values().any(|c| c.name == request.name) {
            return Err(ClientError::daemon(
                409,
                format!("container name {:?} is already in use", request.name),
            ));
        }

        let id = state.allocate_id();
        state.containers.insert(
            id.clone(),
            FakeContainer {
                name: request.name.clone(),
                image: request.image.clone(),
                state: "created",
                labels: request.labels.clone(),
                volumes: BTreeSet::new(),
            },
        );
        Ok(ContainerId::new(id))
    }

    async fn control(&self, id: &ContainerId, action: ControlAction) -> Result<(), ClientError> {
        let mut state = self.state.lock();
        state.rpc()?;
        state.last_control = Some(action.clone());

        let key = id.as_str();
        let container = state.container_mut(key)?;
        match action {
            ControlAction::Start => match container.state {
                "running" => return Err(Self::not_modified(key)),
                "paused" => return Err(Self::conflict(key, "is paused, unpause it first")),
                _ => container.state = "running",
            },
            ControlAction::Stop { .. } => match container.state {
                "running" | "paused" => container.state = "exited",
                _ => return Err(Self::not_modified(key)),
            },
            ControlAction::Restart { .. } => container.state = "running",
            ControlAction::Pause => match container.state {
                "running" => container.state = "paused",
                "paused" => return Err(Self::conflict(key, "is already paused")),
                _ => return Err(Self::conflict(key, "is not running")),
            },
            ControlAction::Unpause => match container.state {
                "paused" => container.state = "running",
                _ => return Err(Self::conflict(key, "is not paused")),
            },
            ControlAction::Remove { force } => {
                if matches!(container.state, "running" | "paused") && !force {
                    return Err(Self::conflict(
                        key,
                        "is running: stop the container before removing or force remove",
                    ));
                }
                state.containers.remove(key);
                state.logs.remove(key);
            }
        }
        Ok(())
    }

    async fn list_containers(
        &self,
        filter: &ContainerFilter,
    ) -> Result<Vec<ContainerSummary>, ClientError> {
        let mut state = self.state.lock();
        state.rpc()?;

        Ok(state
            .containers
            .iter()
            // Like the daemon, the id filter matches anywhere in the id.
            .filter(|(id, _)| filter.id.as_ref().is_none_or(|f| id.contains(f.as_str())))
            .filter(|(_, c)| filter.all || matches!(c.state, "running" | "paused"))
            .map(|(id, c)| ContainerSummary {
                id: ContainerId::new(id.clone()),
                name: c.name.clone(),
                image: c.image.clone(),
                state: c.state.to_string(),
                status: String::new(),
                labels: c.labels.clone(),
            })
            .collect())
    }
}

#[async_trait]
impl ImageOps for FakeDaemon {
    async fn pull_image(&self, image: &ImageName) -> Result<PullStream, ClientError> {
        let mut state = self.state.lock();
        state.rpc()?;

        let reference = image.reference();
        let started = Ok(PullProgress {
            layer: None,
            status: format!("Pulling from {}", image.repository()),
            current: None,
            total: None,
        });

        if !state.registry.contains(&reference) {
            let failed = Err(ClientError::daemon(
                404,
                format!("manifest for {reference} not found: manifest unknown"),
            ));
            return Ok(Box::pin(futures::stream::iter(vec![started, failed])));
        }

        let id = format!("sha256:{}", state.allocate_id());
        state.images.entry(reference.clone()).or_insert(id);
        let events = vec![
            started,
            Ok(PullProgress {
                layer: Some("a1b2c3".into()),
                status: "Downloading".into(),
                current: Some(512),
                total: Some(1024),
            }),
            Ok(PullProgress {
                layer: Some("a1b2c3".into()),
                status: "Pull complete".into(),
                current: None,
                total: None,
            }),
            Ok(PullProgress {
                layer: None,
                status: format!("Status: Downloaded newer image for {reference}"),
                current: None,
                total: None,
            }),
        ];
        Ok(Box::pin(futures::stream::iter(events)))
    }

    async fn list_images(&self) -> Result<Vec<ImageSummary>, ClientError> {
        let mut state = self.state.lock();
        state.rpc()?;

        Ok(state
            .images
            .iter()
            .map(|(reference, id)| ImageSummary {
                id: ImageId::new(id.clone()),
                repo_tags: vec![reference.clone()],
                created: None,
                size: 1024,
            })
            .collect())
    }

    async fn remove_image(&self, id: &ImageId, force: bool) -> Result<(), ClientError> {
        let mut state = self.state.lock();
        state.rpc()?;

        let reference = state
            .images
            .iter()
            .find(|(_, image_id)| image_id.as_str() == id.as_str())
            .map(|(reference, _)| reference.clone())
            .ok_or_else(|| ClientError::daemon(404, format!("No such image: {id}")))?;

        let in_use = state.containers.values().any(|c| c.image == reference);
        if in_use && !force {
            return Err(ClientError::daemon(
                409,
                format!("conflict: unable to delete {} - image is being used", id.short()),
            ));
        }
        state.images.remove(&reference);
        Ok(())
    }
}

#[async_trait]
impl VolumeOps for FakeDaemon {
    async fn create_volume(&self, name: &VolumeName) -> Result<VolumeSummary, ClientError> {
        let mut state = self.state.lock();
        state.rpc()?;

        state.volumes.insert(name.to_string());
        Ok(VolumeSummary {
            name: name.clone(),
            driver: "local".into(),
            mountpoint: format!("/var/lib/docker/volumes/{name}/_data"),
        })
    }

    async fn list_volumes(&self) -> Result<Vec<VolumeSummary>, ClientError> {
        let mut state = self.state.lock();
        state.rpc()?;

        Ok(state
            .volumes
            .iter()
            .map(|name| VolumeSummary {
                name: VolumeName::new(name.clone()),
                driver: "local".into(),
                mountpoint: format!("/var/lib/docker/volumes/{name}/_data"),
            })
            .collect())
    }

    async fn remove_volume(&self, name: &VolumeName, force: bool) -> Result<(), ClientError> {
        let mut state = self.state.lock();
        state.rpc()?;

        if !state.volumes.contains(name.as_str()) {
            return Err(ClientError::daemon(404, format!("get {name}: no such volume")));
        }
        let in_use = state
            .containers
            .values()
            .any(|c| c.volumes.contains(name.as_str()));
        if in_use && !force {
            return Err(ClientError::daemon(409, format!("remove {name}: volume is in use")));
        }
        state.volumes.remove(name.as_str());
        Ok(())
    }
}

#[async_trait]
impl LogOps for FakeDaemon {
    async fn logs(
        &self,
        id: &ContainerId,
        opts: &LogOptions,
    ) -> Result<LogChunkStream, ClientError> {
        let mut state = self.state.lock();
        state.rpc()?;
        state.container_mut(id.as_str())?;

        let chunks = state.logs.get(id.as_str()).cloned().unwrap_or_default();
        let chunks: Vec<_> = match opts.tail {
            Some(n) => {
                let skip = chunks.len().saturating_sub(n as usize);
                chunks.into_iter().skip(skip).collect()
            }
            None => chunks,
        };
        Ok(Box::pin(futures::stream::iter(chunks.into_iter().map(Ok))))
    }
}

#[async_trait]
impl StatsOps for FakeDaemon {
    async fn stats(&self, id: &ContainerId, follow: bool) -> Result<SnapshotStream, ClientError> {
        let mut state = self.state.lock();
        state.rpc()?;
        let running = state.container_mut(id.as_str())?.state == "running";

        if state.empty_stats {
            return Ok(Box::pin(futures::stream::empty()));
        }

        let samples = if follow { FOLLOWED_SAMPLES } else { 1 };
        let snapshots = (0..samples).map(move |n| {
            Ok(if running {
                Statistics {
                    cpu_percent: 12.5,
                    memory_usage: 64 * 1024 * 1024 + n as u64,
                    memory_limit: 512 * 1024 * 1024,
                    memory_percent: 12.5,
                    pids: 4,
                    ..Default::default()
                }
            } else {
                Statistics::default()
            })
        });
        Ok(Box::pin(futures::stream::iter(snapshots)))
    }
}

#[async_trait]
impl DaemonOps for FakeDaemon {
    async fn info(&self) -> Result<RuntimeMetadata, ClientError> {
        let mut state = self.state.lock();
        state.rpc()?;
        Ok(RuntimeMetadata {
            name: "Docker".into(),
            version: "27.0.0-fake".into(),
            api_version: "1.47".into(),
            os: "linux".into(),
            arch: "x86_64".into(),
        })
    }

    async fn ping(&self) -> Result<(), ClientError> {
        self.state.lock().rpc()
    }
}
