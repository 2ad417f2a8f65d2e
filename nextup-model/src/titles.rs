use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::ids::{EpisodeId, TitleId};

/// Whether a title is a standalone movie or a series root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TitleKind {
    Movie,
    Series,
}

impl TitleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TitleKind::Movie => "movie",
            TitleKind::Series => "series",
        }
    }
}

impl std::str::FromStr for TitleKind {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "movie" => Ok(TitleKind::Movie),
            "series" => Ok(TitleKind::Series),
            other => Err(ModelError::UnknownTitleKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for TitleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the `titles` table: a movie or series as known to the
/// remote catalog, keyed locally by rowid and globally by `mon_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub id: TitleId,
    /// Canonical id of the title in the remote catalog. Unique.
    pub mon_id: String,
    pub kind: TitleKind,
    pub name: String,
    pub synopsis: Option<String>,
    pub year: Option<i32>,
    pub runtime_min: Option<i32>,
    /// Serialized [`crate::ImageSet`] blob; parsed lazily at read time.
    pub image_set_json: Option<String>,
    pub local_updated_at: DateTime<Utc>,
}

/// A title as produced by the mappers, before it has a rowid.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTitle {
    pub mon_id: String,
    pub kind: TitleKind,
    pub name: String,
    pub synopsis: Option<String>,
    pub year: Option<i32>,
    pub runtime_min: Option<i32>,
    pub image_set_json: Option<String>,
}

/// One row of the `episodes` table, keyed by (title, season, episode).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    pub title_id: TitleId,
    pub mon_id: String,
    pub season_number: i32,
    pub episode_number: i32,
    pub name: Option<String>,
    pub synopsis: Option<String>,
    pub runtime_min: Option<i32>,
    pub air_date: Option<String>,
    pub image_set_json: Option<String>,
    pub source_updated_at: Option<i64>,
    pub local_updated_at: DateTime<Utc>,
}

/// An episode as produced by the mappers, before it has a rowid.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEpisode {
    pub mon_id: String,
    pub season_number: i32,
    pub episode_number: i32,
    pub name: Option<String>,
    pub synopsis: Option<String>,
    pub runtime_min: Option<i32>,
    pub air_date: Option<String>,
    pub image_set_json: Option<String>,
    pub source_updated_at: Option<i64>,
}
