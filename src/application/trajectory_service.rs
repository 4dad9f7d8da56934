// Trajectory service - Use cases for the map view
use crate::application::backend_repository::{BackendError, BackendRepository, TrajectoryFilter};
use crate::domain::trajectory::{self, Trajectory};
use std::sync::Arc;

#[derive(Clone)]
pub struct TrajectoryService {
    repository: Arc<dyn BackendRepository>,
}

impl TrajectoryService {
    pub fn new(repository: Arc<dyn BackendRepository>) -> Self {
        Self { repository }
    }

    /// Fetches raw trajectories from the backend and normalizes them for
    /// rendering. Trajectories are rebuilt on every call; nothing is cached.
    pub async fn list_trajectories(
        &self,
        filter: &TrajectoryFilter,
    ) -> Result<Vec<Trajectory>, BackendError> {
        let raw = self.repository.fetch_trajectories(filter).await?;
        tracing::debug!(count = raw.len(), "Fetched raw trajectories from backend");
        Ok(trajectory::transform(raw))
    }

    /// Station identifiers known to the backend, for report selection.
    pub async fn list_stations(&self) -> Result<Vec<String>, BackendError> {
        self.repository.fetch_stations().await
    }
}
