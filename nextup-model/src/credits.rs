use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::ids::PersonId;

/// Role a person plays in a title's credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreditRole {
    Cast,
    Director,
    Writer,
}

impl CreditRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditRole::Cast => "cast",
            CreditRole::Director => "director",
            CreditRole::Writer => "writer",
        }
    }
}

impl std::str::FromStr for CreditRole {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cast" => Ok(CreditRole::Cast),
            "director" => Ok(CreditRole::Director),
            "writer" => Ok(CreditRole::Writer),
            other => Err(ModelError::UnknownCreditRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for CreditRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the `people` table. Deduplicated by exact name; two
/// real-world people sharing a name collapse into one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
}
