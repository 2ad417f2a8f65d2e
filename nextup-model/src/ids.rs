//! Strongly typed row ids for the local store.
//!
//! Every table is keyed by a SQLite `INTEGER PRIMARY KEY AUTOINCREMENT`
//! rowid; these newtypes keep title/genre/person ids from being mixed up
//! at call sites.

use serde::{Deserialize, Serialize};

macro_rules! row_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub i64);

        impl $name {
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

row_id!(
    /// Row id of a title (movie or series root).
    TitleId
);
row_id!(
    /// Row id of a deduplicated genre.
    GenreId
);
row_id!(
    /// Row id of a deduplicated person.
    PersonId
);
row_id!(
    /// Row id of an episode belonging to a series title.
    EpisodeId
);
