//! Repository Module
//!
//! CRUD over SurrealDB tables. Every tenant-owned table is listed through
//! [`TenantQuery`], which always filters on `business_id`, `business_type`
//! and `is_active = true`.

// Accounts
pub mod business;
pub mod client;
pub mod user;

// Customers and staff
pub mod guest;
pub mod shift;
pub mod staff;

// Catalog
pub mod menu_item;
pub mod privatisation;
pub mod room;
pub mod room_type;
pub mod service;
pub mod table;

// Bookings and billing
pub mod invoice;
pub mod payment;
pub mod reservation;

// Re-exports
pub use business::BusinessRepository;
pub use client::ClientRepository;
pub use guest::GuestRepository;
pub use invoice::InvoiceRepository;
pub use menu_item::MenuItemRepository;
pub use payment::PaymentRepository;
pub use privatisation::PrivatisationRepository;
pub use reservation::ReservationRepository;
pub use room::RoomRepository;
pub use room_type::RoomTypeRepository;
pub use service::ServiceRepository;
pub use shift::ShiftRepository;
pub use staff::StaffRepository;
pub use table::TableRepository;
pub use user::UserRepository;

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{AppError, BusinessType, ErrorCode};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                AppError::database("Database error")
            }
        }
    }
}

/// Patch plus a fresh `updated_at`
#[derive(Serialize)]
struct Touched<P> {
    #[serde(flatten)]
    data: P,
    updated_at: i64,
}

#[derive(Serialize)]
struct Deactivate {
    is_active: bool,
}

// =============================================================================
// ID convention: record ids travel as "table:key" strings.
//
// Lookups also accept a bare key and resolve it against the expected table.
// An id naming a different table resolves to nothing, so get-by-id yields
// null instead of reading a foreign record.
// =============================================================================

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Resolve `id` against `table`
    pub fn record_id(table: &str, id: &str) -> RepoResult<Option<RecordId>> {
        let id = id.trim();
        if id.is_empty() {
            return Err(RepoError::Validation("Empty ID".to_string()));
        }
        if !id.contains(':') {
            return Ok(Some(RecordId::from_table_key(table, id)));
        }
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        if thing.table() != table {
            return Ok(None);
        }
        Ok(Some(thing))
    }

    pub async fn find_by_id<T>(&self, table: &str, id: &str) -> RepoResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let Some(thing) = Self::record_id(table, id)? else {
            return Ok(None);
        };
        let record: Option<T> = self.db.select(thing).await?;
        Ok(record)
    }

    pub async fn create<T>(&self, table: &'static str, record: T) -> RepoResult<T>
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        let created: Option<T> = self.db.create(table).content(record).await?;
        created.ok_or_else(|| RepoError::Database(format!("Failed to create {}", table)))
    }

    /// Merge the provided fields; `None` when the record does not exist
    pub async fn merge<T, P>(&self, table: &str, id: &str, patch: P) -> RepoResult<Option<T>>
    where
        T: DeserializeOwned,
        P: Serialize + 'static,
    {
        let Some(thing) = Self::record_id(table, id)? else {
            return Ok(None);
        };
        // UPDATE on a missing id would create the record
        let existing: Option<T> = self.db.select(thing.clone()).await?;
        if existing.is_none() {
            return Ok(None);
        }
        let updated: Option<T> = self
            .db
            .update(thing)
            .merge(Touched {
                data: patch,
                updated_at: shared::util::now_millis(),
            })
            .await?;
        Ok(updated)
    }

    /// Flip `is_active` off; `false` when the record does not exist
    pub async fn soft_delete<T>(&self, table: &str, id: &str) -> RepoResult<bool>
    where
        T: DeserializeOwned,
    {
        let updated: Option<T> = self
            .merge(table, id, Deactivate { is_active: false })
            .await?;
        Ok(updated.is_some())
    }

    /// Physically remove a record
    pub async fn delete<T>(&self, table: &str, id: &str) -> RepoResult<bool>
    where
        T: DeserializeOwned,
    {
        let Some(thing) = Self::record_id(table, id)? else {
            return Ok(false);
        };
        let deleted: Option<T> = self.db.delete(thing).await?;
        Ok(deleted.is_some())
    }
}

/// `SELECT` over one tenant's active records
///
/// ```text
/// SELECT * FROM room WHERE business_id = $business_id
///     AND business_type = $business_type AND is_active = true
///     [AND <filter>...] ORDER BY <order>
/// ```
#[derive(Debug, Clone)]
pub struct TenantQuery {
    table: &'static str,
    conditions: Vec<String>,
    bindings: Vec<(String, serde_json::Value)>,
    order: Option<&'static str>,
}

impl TenantQuery {
    pub fn new(table: &'static str, business_id: &str, business_type: BusinessType) -> Self {
        Self {
            table,
            conditions: vec![
                "business_id = $business_id".to_string(),
                "business_type = $business_type".to_string(),
                "is_active = true".to_string(),
            ],
            bindings: vec![
                ("business_id".to_string(), business_id.into()),
                ("business_type".to_string(), business_type.as_str().into()),
            ],
            order: None,
        }
    }

    /// Add `condition`, which refers to `$name`
    pub fn filter(mut self, condition: &str, name: &str, value: impl Serialize) -> Self {
        // Strings, numbers, dates and unit enums always serialize
        let value = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
        self.conditions.push(condition.to_string());
        self.bindings.push((name.to_string(), value));
        self
    }

    /// Add `condition` only when a value is given
    pub fn filter_opt<V>(self, condition: &str, name: &str, value: Option<V>) -> Self
    where
        V: Serialize,
    {
        match value {
            Some(value) => self.filter(condition, name, value),
            None => self,
        }
    }

    pub fn order_by(mut self, order: &'static str) -> Self {
        self.order = Some(order);
        self
    }

    pub fn sql(&self) -> String {
        let mut sql = format!(
            "SELECT * FROM {} WHERE {}",
            self.table,
            self.conditions.join(" AND ")
        );
        if let Some(order) = self.order {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }
        sql
    }

    pub async fn fetch<T>(self, db: &Surreal<Db>) -> RepoResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut query = db.query(self.sql());
        for binding in self.bindings {
            query = query.bind(binding);
        }
        let records: Vec<T> = query.await?.take(0)?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_accepts_full_and_bare_ids() {
        let full = BaseRepository::record_id("room", "room:abc").unwrap().unwrap();
        assert_eq!(full.to_string(), "room:abc");

        let bare = BaseRepository::record_id("room", "abc").unwrap().unwrap();
        assert_eq!(bare, full);
    }

    #[test]
    fn test_record_id_from_other_table_resolves_to_none() {
        assert!(BaseRepository::record_id("room", "guest:abc").unwrap().is_none());
        assert!(matches!(
            BaseRepository::record_id("room", "  "),
            Err(RepoError::Validation(_))
        ));
    }

    #[test]
    fn test_tenant_query_sql() {
        let sql = TenantQuery::new("service", "business:s1", BusinessType::Salon)
            .filter_opt("category = $category", "category", Some("hair"))
            .filter_opt::<String>("status = $status", "status", None)
            .order_by("name")
            .sql();
        assert_eq!(
            sql,
            "SELECT * FROM service WHERE business_id = $business_id AND business_type = $business_type \
             AND is_active = true AND category = $category ORDER BY name"
        );
    }

    #[test]
    fn test_database_errors_are_masked() {
        let err: AppError = RepoError::Database("rocksdb: io error at /var/data".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database error");

        let err: AppError = RepoError::Duplicate("Email already registered".into()).into();
        assert_eq!(err.code, ErrorCode::AlreadyExists);
    }
}
