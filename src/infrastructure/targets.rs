//! Storage targets a load run can feed
//!
//! Each target mirrors one benchmark table and fixes how its embedding column
//! expects the vector to be serialized.

use crate::domain::VectorEncoding;
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadTarget {
    /// SQL Server 2025 native `VECTOR(n)` column
    #[display("sql2025")]
    Sql2025,
    /// SQL Server 2022 `NVARCHAR(MAX)` column holding JSON
    #[display("sql2022")]
    Sql2022,
    /// PostgreSQL pgvector `vector(n)` column
    #[display("postgres")]
    Postgres,
}

impl LoadTarget {
    pub fn encoding(self) -> VectorEncoding {
        match self {
            Self::Sql2025 | Self::Sql2022 => VectorEncoding::JsonArray,
            Self::Postgres => VectorEncoding::PgVector,
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            Self::Sql2025 | Self::Sql2022 => "ConsultingDocs",
            Self::Postgres => "consulting_docs",
        }
    }

    pub fn embedding_column(self) -> &'static str {
        match self {
            Self::Sql2025 | Self::Postgres => "embedding",
            Self::Sql2022 => "embedding_json",
        }
    }
}
