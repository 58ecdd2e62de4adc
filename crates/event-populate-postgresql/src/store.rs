//! Reference store and event sink backed by a shared PostgreSQL client.

use crate::error::PostgreSQLPopulatorError;
use crate::insert::{generate_create_table, generate_select_references, insert_batch};
use async_trait::async_trait;
use event_generator::EventRecord;
use event_populate::{BoxError, EventSink, ReferenceStore};
use std::sync::Arc;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, info};

/// Connect and verify the connection with a trivial query.
pub async fn connect(connection_string: &str) -> Result<Arc<Client>, PostgreSQLPopulatorError> {
    let (client, connection) = tokio_postgres::connect(connection_string, NoTls).await?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("PostgreSQL connection error: {}", e);
        }
    });

    client.simple_query("SELECT 1").await?;
    debug!("Connected to PostgreSQL");

    Ok(Arc::new(client))
}

/// Reads known campaign ids from a column of an existing table.
pub struct PostgreSQLReferenceStore {
    client: Arc<Client>,
    table: String,
    column: String,
}

impl PostgreSQLReferenceStore {
    pub fn new(client: Arc<Client>, table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
            column: column.into(),
        }
    }

    async fn select_ids(&self, limit: u64) -> Result<Vec<String>, PostgreSQLPopulatorError> {
        let sql = generate_select_references(&self.table, &self.column);
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = self.client.query(&sql, &[&limit]).await?;

        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.try_get(0)?;
            ids.push(id);
        }
        Ok(ids)
    }
}

#[async_trait]
impl ReferenceStore for PostgreSQLReferenceStore {
    async fn fetch_known_references(&mut self, limit: u64) -> Result<Vec<String>, BoxError> {
        Ok(self.select_ids(limit).await?)
    }

    fn describe(&self) -> String {
        format!("{}.{}", self.table, self.column)
    }
}

/// Inserts events into a table; each batch is one or more multi-row INSERTs.
pub struct PostgreSQLEventSink {
    client: Arc<Client>,
    table: String,
    rows_inserted: u64,
}

impl PostgreSQLEventSink {
    pub fn new(client: Arc<Client>, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
            rows_inserted: 0,
        }
    }

    /// Create the events table if it does not exist.
    pub async fn create_table(&self) -> Result<(), PostgreSQLPopulatorError> {
        let ddl = generate_create_table(&self.table);
        debug!("Executing DDL: {}", ddl);
        self.client.execute(&ddl, &[]).await?;
        info!("Ensured table '{}' exists", self.table);
        Ok(())
    }

    pub fn rows_inserted(&self) -> u64 {
        self.rows_inserted
    }
}

#[async_trait]
impl EventSink for PostgreSQLEventSink {
    async fn persist_batch(&mut self, rows: &[EventRecord]) -> Result<u64, BoxError> {
        let inserted = insert_batch(&self.client, &self.table, rows).await?;
        self.rows_inserted += inserted;
        Ok(inserted)
    }

    fn describe(&self) -> String {
        format!("table '{}'", self.table)
    }
}
