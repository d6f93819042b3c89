use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::domain::BookedRange;
use crate::fetcher::{fetch_booked_ranges, Fetcher};

pub const DEFAULT_WORKERS: usize = 10;

/// Fetches all feeds of an accommodation concurrently.
#[derive(Clone)]
pub struct ParallelFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    semaphore: Arc<Semaphore>,
}

impl ParallelFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self::with_workers(fetcher, DEFAULT_WORKERS)
    }

    pub fn with_workers(fetcher: Arc<dyn Fetcher + Send + Sync>, workers: usize) -> Self {
        Self {
            fetcher,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Load and merge the booked ranges of every feed.
    ///
    /// Resolves once every feed has settled. A failing feed contributes
    /// nothing; the output keeps the order of `urls`.
    pub async fn load_availability(&self, urls: &[String]) -> Vec<BookedRange> {
        let mut handles = Vec::with_capacity(urls.len());

        for url in urls {
            let fetcher = self.fetcher.clone();
            let semaphore = self.semaphore.clone();
            let url = url.clone();

            handles.push(tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire().await else {
                    tracing::error!("Fetch semaphore closed before {}", url);
                    return Vec::new();
                };
                fetch_booked_ranges(fetcher.as_ref(), &url).await
            }));
        }

        let mut ranges = Vec::new();
        for result in join_all(handles).await {
            match result {
                Ok(feed_ranges) => ranges.extend(feed_ranges),
                Err(e) => {
                    tracing::error!("Task join error: {}", e);
                }
            }
        }

        ranges
    }
}
