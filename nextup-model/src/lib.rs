//! Core data model definitions shared across NextUp Sync crates.

pub mod availability;
pub mod credits;
pub mod error;
pub mod genres;
pub mod ids;
pub mod image;
pub mod services;
pub mod titles;

// Intentionally curated re-exports for downstream consumers.
pub use availability::{ExternalId, NewExternalId, Popularity};
pub use credits::{CreditRole, Person};
pub use error::{ModelError, Result as ModelResult};
pub use genres::Genre;
pub use ids::{EpisodeId, GenreId, PersonId, TitleId};
pub use image::ImageSet;
pub use services::{RankingKind, StreamingService};
pub use titles::{Episode, NewEpisode, NewTitle, Title, TitleKind};
