use std::sync::Arc;
use std::time::{Instant, SystemTime};

use crate::config::Config;
use crate::services::predictor::PredictorClient;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    config: Arc<Config>,
    predictor: Arc<PredictorClient>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let predictor = PredictorClient::from_config(config.predictor.clone());
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            config: Arc::new(config),
            predictor: Arc::new(predictor),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    pub fn predictor(&self) -> Arc<PredictorClient> {
        Arc::clone(&self.predictor)
    }
}
