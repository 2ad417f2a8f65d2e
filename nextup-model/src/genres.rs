use serde::{Deserialize, Serialize};

use crate::ids::GenreId;

/// One row of the `genres` table. The name is unique case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}
