use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Streaming services the aggregator knows how to deep-link into.
///
/// The wire id (`as_str`) doubles as the `service` column value in the
/// `external_ids` and `title_popularities` tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamingService {
    Netflix,
    Prime,
    Disney,
    Apple,
    Hbo,
    Peacock,
    Hulu,
}

impl StreamingService {
    pub const ALL: [StreamingService; 7] = [
        StreamingService::Netflix,
        StreamingService::Prime,
        StreamingService::Disney,
        StreamingService::Apple,
        StreamingService::Hbo,
        StreamingService::Peacock,
        StreamingService::Hulu,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StreamingService::Netflix => "netflix",
            StreamingService::Prime => "prime",
            StreamingService::Disney => "disney",
            StreamingService::Apple => "apple",
            StreamingService::Hbo => "hbo",
            StreamingService::Peacock => "peacock",
            StreamingService::Hulu => "hulu",
        }
    }

    /// Case-insensitive lookup by wire id. Returns `None` for services
    /// the aggregator has no deep-link template for.
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|service| service.as_str().eq_ignore_ascii_case(id))
    }

    /// Build the launch URL for a title on this service.
    ///
    /// `external_id` is the provider-native id recovered from the
    /// service's deep-link URL during sync. The Netflix template keeps a
    /// `{userId}` placeholder for the caller to substitute.
    pub fn launch_url(&self, external_id: &str) -> String {
        match self {
            StreamingService::Netflix => {
                format!("https://www.netflix.com/watch/{{userId}}?trackId={external_id}")
            }
            StreamingService::Prime => {
                format!("https://www.primevideo.com/detail/{external_id}")
            }
            StreamingService::Disney => {
                format!("https://www.disneyplus.com/video/{external_id}")
            }
            StreamingService::Apple => {
                format!("https://tv.apple.com/us/movie/{external_id}")
            }
            StreamingService::Hbo => {
                format!("https://play.hbomax.com/page/{external_id}")
            }
            StreamingService::Peacock => {
                format!("https://www.peacocktv.com/watch/playback/{external_id}")
            }
            StreamingService::Hulu => {
                format!("https://www.hulu.com/watch/{external_id}")
            }
        }
    }
}

impl std::str::FromStr for StreamingService {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| ModelError::UnknownService(value.to_string()))
    }
}

impl std::fmt::Display for StreamingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which ranked list a popularity row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankingKind {
    TopShows,
}

impl RankingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingKind::TopShows => "top_shows",
        }
    }
}

impl std::str::FromStr for RankingKind {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "top_shows" => Ok(RankingKind::TopShows),
            other => Err(ModelError::UnknownRankingKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for RankingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
