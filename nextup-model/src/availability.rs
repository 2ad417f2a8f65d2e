use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::TitleId;
use crate::services::{RankingKind, StreamingService};

/// Sentinel `provider_id` written when no provider-native id could be
/// extracted from a deep-link URL. The row stays queryable; it just
/// cannot launch anything.
pub const UNKNOWN_PROVIDER_ID: &str = "unknown";

/// One row of the `external_ids` table: where a locally stored title can
/// be watched, keyed by (entity, service).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalId {
    pub id: i64,
    pub entity_id: TitleId,
    pub service: StreamingService,
    pub provider_id: String,
    pub available: bool,
    pub price: Option<f64>,
}

/// An external id as produced by the mappers, before it has a rowid and
/// before the owning title's rowid is known.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExternalId {
    pub service: StreamingService,
    pub provider_id: String,
    pub available: bool,
    pub price: Option<f64>,
}

/// One row of the `title_popularities` table: membership of a title in a
/// service's ranked list, reconciled wholesale on every sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Popularity {
    pub id: i64,
    pub service: StreamingService,
    pub ranking: RankingKind,
    pub title_id: TitleId,
    pub updated_at: DateTime<Utc>,
}
