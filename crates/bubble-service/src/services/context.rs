//! Service context - dependency container for services
//!
//! Holds the repositories, the broadcast hub, and the configuration
//! slices services need. Handed to components at construction so nothing
//! reaches for process-wide globals and tests can assemble a context over
//! an in-memory store.

use std::sync::Arc;

use bubble_common::{LifecycleConfig, MapConfig};
use bubble_core::{BubbleRepository, SuggestionRepository, VoteRepository};
use bubble_gateway::BroadcastHub;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    bubble_repo: Arc<dyn BubbleRepository>,
    vote_repo: Arc<dyn VoteRepository>,
    suggestion_repo: Arc<dyn SuggestionRepository>,
    hub: Arc<BroadcastHub>,
    lifecycle: LifecycleConfig,
    map: MapConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        bubble_repo: Arc<dyn BubbleRepository>,
        vote_repo: Arc<dyn VoteRepository>,
        suggestion_repo: Arc<dyn SuggestionRepository>,
        hub: Arc<BroadcastHub>,
        lifecycle: LifecycleConfig,
        map: MapConfig,
    ) -> Self {
        Self {
            bubble_repo,
            vote_repo,
            suggestion_repo,
            hub,
            lifecycle,
            map,
        }
    }

    /// Get the bubble repository
    pub fn bubble_repo(&self) -> &dyn BubbleRepository {
        self.bubble_repo.as_ref()
    }

    /// Get the vote repository
    pub fn vote_repo(&self) -> &dyn VoteRepository {
        self.vote_repo.as_ref()
    }

    /// Get the suggestion repository
    pub fn suggestion_repo(&self) -> &dyn SuggestionRepository {
        self.suggestion_repo.as_ref()
    }

    /// Get the broadcast hub
    pub fn hub(&self) -> &BroadcastHub {
        &self.hub
    }

    /// Get the lifecycle configuration
    pub fn lifecycle(&self) -> &LifecycleConfig {
        &self.lifecycle
    }

    /// Get the map configuration
    pub fn map(&self) -> &MapConfig {
        &self.map
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("lifecycle", &self.lifecycle)
            .field("map", &self.map)
            .finish()
    }
}
