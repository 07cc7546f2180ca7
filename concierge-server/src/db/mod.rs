//! Database Module
//!
//! Embedded SurrealDB on the RocksDB engine. Tables are schemaless; only
//! lookup indexes are defined at startup.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use repository::RepoResult;

const INDEXES: &str = r#"
DEFINE INDEX IF NOT EXISTS user_email ON TABLE user FIELDS email UNIQUE;
DEFINE INDEX IF NOT EXISTS business_kind ON TABLE business FIELDS business_type, is_active;
DEFINE INDEX IF NOT EXISTS guest_tenant ON TABLE guest FIELDS business_id, business_type;
DEFINE INDEX IF NOT EXISTS staff_tenant ON TABLE staff FIELDS business_id, business_type;
DEFINE INDEX IF NOT EXISTS shift_tenant ON TABLE shift FIELDS business_id, business_type;
DEFINE INDEX IF NOT EXISTS room_tenant ON TABLE room FIELDS business_id, business_type;
DEFINE INDEX IF NOT EXISTS room_type_tenant ON TABLE room_type FIELDS business_id, business_type, name;
DEFINE INDEX IF NOT EXISTS dining_table_tenant ON TABLE dining_table FIELDS business_id, business_type;
DEFINE INDEX IF NOT EXISTS service_tenant ON TABLE service FIELDS business_id, business_type;
DEFINE INDEX IF NOT EXISTS menu_item_tenant ON TABLE menu_item FIELDS business_id, business_type;
DEFINE INDEX IF NOT EXISTS invoice_reservation ON TABLE invoice FIELDS reservation_id;
DEFINE INDEX IF NOT EXISTS payment_tenant ON TABLE payment FIELDS business_id;
DEFINE INDEX IF NOT EXISTS privatisation_tenant ON TABLE privatisation_option FIELDS business_id, business_type;
DEFINE INDEX IF NOT EXISTS reservation_tenant ON TABLE reservation FIELDS business_id, business_type;
"#;

/// Open (or create) the database and select namespace/database
pub async fn connect(path: &str, namespace: &str, database: &str) -> RepoResult<Surreal<Db>> {
    let db = Surreal::new::<RocksDb>(path).await?;
    db.use_ns(namespace).use_db(database).await?;
    db.query(INDEXES).await?.check()?;
    tracing::info!(path, namespace, database, "Database ready (SurrealDB RocksDB)");
    Ok(db)
}
