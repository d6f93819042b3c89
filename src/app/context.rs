use std::sync::Arc;

use crate::app::Result;
use crate::config::Config;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::parallel::ParallelFetcher;
use crate::fetcher::Fetcher;
use crate::guide::GuideClient;

/// Long-lived collaborators, built once per process.
pub struct AppContext {
    pub parallel_fetcher: ParallelFetcher,
    pub guide: GuideClient,
}

impl AppContext {
    pub fn with_workers(config: &Config, workers: usize) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.relay)?);
        Self::with_fetcher(config, fetcher, workers)
    }

    /// Wire a context around an existing fetcher.
    pub fn with_fetcher(
        config: &Config,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        workers: usize,
    ) -> Result<Self> {
        let parallel_fetcher = ParallelFetcher::with_workers(fetcher, workers);
        let guide = GuideClient::new(&config.guide)?;

        Ok(Self {
            parallel_fetcher,
            guide,
        })
    }
}
