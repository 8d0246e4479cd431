//! DTO for per-slug click statistics.

use serde::Serialize;

use crate::application::services::UrlStats;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub clicks: i64,
}

impl From<UrlStats> for StatsResponse {
    fn from(stats: UrlStats) -> Self {
        Self {
            clicks: stats.clicks,
        }
    }
}
