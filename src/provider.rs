//! Dataset loading: live PostgreSQL fetch with a fixed fallback.
//!
//! Every failure to produce live rows substitutes the fallback dataset. The
//! substitution is a deliberate, logged decision, not a swallowed error, and
//! it never takes the server process down.

use sqlx::postgres::PgRow;
use sqlx::{Column, Connection, PgConnection, Row};
use thiserror::Error;

use crate::config::Config;
use crate::logging::{self, obj, v_int, v_str, Domain, Level};
use crate::model::{fallback_dataset, validate_schema, Creature, Dataset};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataOrigin {
    Live,
    Fallback { reason: String },
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    pub origin: DataOrigin,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("table name not configured")]
    TableNotConfigured,
    #[error("schema mismatch: {0}")]
    Schema(String),
    #[error(transparent)]
    Sql(#[from] sqlx::Error),
}

pub struct DatasetProvider {
    config: Config,
}

impl DatasetProvider {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetch all rows of the configured table. One fresh connection per
    /// call, no pooling, no cross-call caching. Every failure path lands on
    /// the fallback dataset.
    pub async fn load(&self) -> LoadOutcome {
        match self.load_live().await {
            Ok(dataset) if dataset.rows.is_empty() => self.fall_back("live table returned no rows".to_string()),
            Ok(dataset) => {
                logging::log(
                    Level::Debug,
                    Domain::Data,
                    "dataset_loaded",
                    obj(&[("origin", v_str("live")), ("rows", v_int(dataset.rows.len() as i64))]),
                );
                LoadOutcome { dataset, origin: DataOrigin::Live }
            }
            Err(err) => self.fall_back(err.to_string()),
        }
    }

    async fn load_live(&self) -> Result<Dataset, LoadError> {
        let table = self.config.db_table_name.as_deref().ok_or(LoadError::TableNotConfigured)?;
        let mut conn = PgConnection::connect(&self.config.database_url()).await?;
        // The identifier comes from process configuration, never from a
        // request.
        let query = format!("select * from {}", table);
        let rows: Vec<PgRow> = sqlx::query(&query).fetch_all(&mut conn).await?;

        if let Some(first) = rows.first() {
            let columns: Vec<String> = first.columns().iter().map(|c| c.name().to_string()).collect();
            let report = validate_schema(&columns);
            if !report.ok {
                return Err(LoadError::Schema(report.message));
            }
        }

        let mut creatures = Vec::with_capacity(rows.len());
        for row in &rows {
            creatures.push(creature_from_row(row)?);
        }
        Ok(Dataset::new(creatures))
    }

    fn fall_back(&self, reason: String) -> LoadOutcome {
        logging::log(
            Level::Warn,
            Domain::Data,
            "dataset_fallback",
            obj(&[
                ("reason", v_str(&reason)),
                ("table", v_str(self.config.db_table_name.as_deref().unwrap_or(""))),
            ]),
        );
        LoadOutcome { dataset: fallback_dataset(), origin: DataOrigin::Fallback { reason } }
    }
}

// Integer columns may land as int8 or int4 depending on how the table was
// written.
fn get_int(row: &PgRow, column: &str) -> Result<i64, sqlx::Error> {
    match row.try_get::<i64, _>(column) {
        Ok(v) => Ok(v),
        Err(_) => row.try_get::<i32, _>(column).map(i64::from),
    }
}

fn creature_from_row(row: &PgRow) -> Result<Creature, sqlx::Error> {
    Ok(Creature {
        index: get_int(row, "index")?,
        name: row.try_get("name")?,
        type_1: row.try_get("type_1")?,
        type_2: row.try_get("type_2")?,
        total: get_int(row, "total")?,
        hp: get_int(row, "hp")?,
        attack: get_int(row, "attack")?,
        defense: get_int(row, "defense")?,
        special_attack: get_int(row, "special_attack")?,
        special_defense: get_int(row, "special_defense")?,
        speed: get_int(row, "speed")?,
        generation: get_int(row, "generation")?,
        legendary: row.try_get("legendary")?,
        base_stats: get_int(row, "base_stats")?,
        off_stats: get_int(row, "off_stats")?,
        def_stats: get_int(row, "def_stats")?,
        overall_score: get_int(row, "overall_score")?,
    })
}
