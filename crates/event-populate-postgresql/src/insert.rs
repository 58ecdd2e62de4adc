//! SQL text and batched INSERT logic for PostgreSQL population.

use crate::error::PostgreSQLPopulatorError;
use event_generator::{EventRecord, EVENT_COLUMNS};
use tokio_postgres::types::ToSql;
use tokio_postgres::Client;

pub const DEFAULT_CAMPAIGNS_TABLE: &str = "raw.campaigns";
pub const DEFAULT_CAMPAIGN_COLUMN: &str = "campaign_id";
pub const DEFAULT_EVENTS_TABLE: &str = "raw.marketing_cloud_events";

/// PostgreSQL accepts at most 65535 bind parameters per statement.
pub const MAX_ROWS_PER_STATEMENT: usize = 65_535 / EVENT_COLUMNS.len();

/// Quote a possibly schema-qualified name, one segment at a time.
///
/// `raw.campaigns` becomes `"raw"."campaigns"`; embedded quotes are doubled.
pub fn quote_identifier(name: &str) -> String {
    name.split('.')
        .map(|segment| format!("\"{}\"", segment.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(".")
}

/// SELECT statement for known campaign ids; `$1` is the row limit.
pub fn generate_select_references(table: &str, column: &str) -> String {
    let column = quote_identifier(column);
    format!(
        "SELECT {column}::text FROM {} WHERE {column} IS NOT NULL LIMIT $1",
        quote_identifier(table)
    )
}

/// CREATE TABLE statement for the event table.
pub fn generate_create_table(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\
         \"event_id\" TEXT NOT NULL PRIMARY KEY, \
         \"event_type\" TEXT NOT NULL, \
         \"event_ts\" TIMESTAMP NOT NULL, \
         \"subscriber_key\" TEXT NOT NULL, \
         \"campaign_id\" TEXT, \
         \"division\" TEXT NOT NULL, \
         \"message_id\" TEXT NOT NULL, \
         \"is_unique\" BOOLEAN NOT NULL)",
        quote_identifier(table)
    )
}

/// Multi-row INSERT statement with `row_count` groups of placeholders.
pub fn generate_insert(table: &str, row_count: usize) -> String {
    let col_count = EVENT_COLUMNS.len();
    let columns = EVENT_COLUMNS
        .iter()
        .map(|c| quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ");

    let placeholders: Vec<String> = (0..row_count)
        .map(|row| {
            let row_placeholders: Vec<String> = (1..=col_count)
                .map(|col| format!("${}", row * col_count + col))
                .collect();
            format!("({})", row_placeholders.join(", "))
        })
        .collect();

    format!(
        "INSERT INTO {} ({}) VALUES {}",
        quote_identifier(table),
        columns,
        placeholders.join(", ")
    )
}

/// Bind values of one event, in [`EVENT_COLUMNS`] order.
fn row_params(row: &EventRecord) -> Vec<Box<dyn ToSql + Sync + Send>> {
    vec![
        Box::new(row.event_id.to_string()),
        Box::new(row.event_type.as_str()),
        Box::new(row.event_timestamp),
        Box::new(row.subscriber_key.clone()),
        Box::new(row.campaign_reference.as_deref().map(str::to_string)),
        Box::new(row.division.as_str()),
        Box::new(row.message_id.clone()),
        Box::new(row.is_unique),
    ]
}

/// Insert rows into `table`, splitting into statements that stay under the
/// bind parameter limit.
pub async fn insert_batch(
    client: &Client,
    table: &str,
    rows: &[EventRecord],
) -> Result<u64, PostgreSQLPopulatorError> {
    let mut inserted = 0;

    for chunk in rows.chunks(MAX_ROWS_PER_STATEMENT) {
        let sql = generate_insert(table, chunk.len());

        let params: Vec<Box<dyn ToSql + Sync + Send>> = chunk.iter().flat_map(row_params).collect();
        let param_refs: Vec<&(dyn ToSql + Sync)> = params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let affected = client.execute(&sql, &param_refs).await?;
        if affected != chunk.len() as u64 {
            return Err(PostgreSQLPopulatorError::ShortInsert {
                table: table.to_string(),
                expected: chunk.len() as u64,
                inserted: affected,
            });
        }
        inserted += affected;
    }

    Ok(inserted)
}
