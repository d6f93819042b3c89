pub mod http_fetcher;
pub mod parallel;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::BookedRange;
use crate::ical;

#[async_trait]
pub trait Fetcher {
    /// Fetch the raw text of a calendar feed.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetch and parse one feed. Failures degrade to no ranges.
pub async fn fetch_booked_ranges(fetcher: &(dyn Fetcher + Send + Sync), url: &str) -> Vec<BookedRange> {
    match fetcher.fetch(url).await {
        Ok(body) => {
            let ranges = ical::parse(&body);
            tracing::debug!("Parsed {} booked ranges from {}", ranges.len(), url);
            ranges
        }
        Err(e) => {
            tracing::warn!("Error fetching calendar {}: {}", url, e);
            Vec::new()
        }
    }
}
