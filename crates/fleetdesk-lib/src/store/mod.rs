//! SQLite-backed entity store.
//!
//! [`Store`] owns a single connection. Reads are exposed per entity family
//! (`get`, `list(filter)`); writes are crate-private and reached only through
//! the components that enforce the fleet rules ([`crate::Registry`],
//! [`crate::AssignmentManager`], [`crate::ShipmentLifecycle`]).
//!
//! Multi-row mutations run inside [`Store::write`], which opens an IMMEDIATE
//! transaction and commits only if the closure succeeds. Dropping the
//! transaction on the error path rolls it back, so a failed operation never
//! leaves partial writes behind.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::types::ToSql;
use rusqlite::{
    params_from_iter, Connection, OptionalExtension, Row, Transaction, TransactionBehavior,
};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{
    Driver, DriverId, EntityKind, Route, RouteId, Shipment, ShipmentId, Tariff, TariffId,
    Vehicle, VehicleId,
};

pub mod drivers;
pub mod routes;
mod schema;
pub mod shipments;
pub mod tariffs;
pub mod vehicles;

pub use drivers::DriverFilter;
pub use routes::RouteFilter;
pub use shipments::ShipmentFilter;
pub use tariffs::TariffFilter;
pub use vehicles::VehicleFilter;

/// Handle to the fleet database.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Store {
    /// Open (creating if needed) the database at `path` and apply the schema.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "opened fleet database");
        Self::init(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database, mostly useful for tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        schema::apply(&conn)?;
        Ok(Self { conn, path })
    }

    /// Location of the backing file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run `f` inside one IMMEDIATE transaction; commit on `Ok`, roll back on `Err`.
    pub(crate) fn write<T>(&mut self, f: impl FnOnce(&Transaction<'_>) -> Result<T>) -> Result<T> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    pub fn vehicle(&self, id: VehicleId) -> Result<Vehicle> {
        fetch(&self.conn, id)
    }

    pub fn vehicles(&self, filter: &VehicleFilter) -> Result<Vec<Vehicle>> {
        vehicles::list(&self.conn, filter)
    }

    pub fn driver(&self, id: DriverId) -> Result<Driver> {
        fetch(&self.conn, id)
    }

    pub fn drivers(&self, filter: &DriverFilter) -> Result<Vec<Driver>> {
        drivers::list(&self.conn, filter)
    }

    pub fn route(&self, id: RouteId) -> Result<Route> {
        fetch(&self.conn, id)
    }

    pub fn routes(&self, filter: &RouteFilter) -> Result<Vec<Route>> {
        routes::list(&self.conn, filter)
    }

    pub fn tariff(&self, id: TariffId) -> Result<Tariff> {
        fetch(&self.conn, id)
    }

    pub fn tariffs(&self, filter: &TariffFilter) -> Result<Vec<Tariff>> {
        tariffs::list(&self.conn, filter)
    }

    pub fn shipment(&self, id: ShipmentId) -> Result<Shipment> {
        fetch(&self.conn, id)
    }

    pub fn shipments(&self, filter: &ShipmentFilter) -> Result<Vec<Shipment>> {
        shipments::list(&self.conn, filter)
    }
}

/// Row mapping shared by every entity table.
pub(crate) trait Record: Sized {
    const KIND: EntityKind;
    const TABLE: &'static str;
    /// Column list in the order `from_row` reads them.
    const COLUMNS: &'static str;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// Load one record by id, mapping a missing row to [`Error::NotFound`].
pub(crate) fn fetch<R: Record>(conn: &Connection, id: i64) -> Result<R> {
    let sql = format!(
        "SELECT {columns} FROM {table} WHERE id = ?1",
        columns = R::COLUMNS,
        table = R::TABLE
    );
    conn.query_row(&sql, [id], R::from_row)
        .optional()?
        .ok_or_else(|| Error::not_found(R::KIND, id))
}

/// Delete one record by id, mapping a missing row to [`Error::NotFound`].
pub(crate) fn remove<R: Record>(conn: &Connection, id: i64) -> Result<()> {
    let sql = format!("DELETE FROM {table} WHERE id = ?1", table = R::TABLE);
    if conn.execute(&sql, [id])? == 0 {
        return Err(Error::not_found(R::KIND, id));
    }
    Ok(())
}

/// Run a filtered `SELECT` for `R`.
pub(crate) fn select<R: Record>(
    conn: &Connection,
    conditions: &Conditions,
    order_by: &str,
) -> Result<Vec<R>> {
    let sql = format!(
        "SELECT {columns} FROM {table}{clause} ORDER BY {order_by}",
        columns = R::COLUMNS,
        table = R::TABLE,
        clause = conditions.clause(),
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(conditions.params.iter()), R::from_row)?;

    let mut records = Vec::new();
    for entry in rows {
        records.push(entry?);
    }
    Ok(records)
}

/// Accumulates `AND`-joined SQL predicates with positional parameters.
#[derive(Default)]
pub(crate) struct Conditions {
    clauses: Vec<String>,
    params: Vec<Box<dyn ToSql>>,
}

impl Conditions {
    /// Add a predicate containing exactly one `?` placeholder.
    pub(crate) fn push(&mut self, clause: impl Into<String>, value: impl ToSql + 'static) {
        self.clauses.push(clause.into());
        self.params.push(Box::new(value));
    }

    /// Add a predicate that binds no parameters.
    pub(crate) fn push_raw(&mut self, clause: impl Into<String>) {
        self.clauses.push(clause.into());
    }

    /// Add `column IN (?, ?, ...)`. An empty set matches nothing.
    pub(crate) fn push_in<T: ToSql + 'static>(&mut self, column: &str, values: Vec<T>) {
        if values.is_empty() {
            self.clauses.push("0".to_string());
            return;
        }
        let placeholders = vec!["?"; values.len()].join(", ");
        self.clauses.push(format!("{column} IN ({placeholders})"));
        for value in values {
            self.params.push(Box::new(value));
        }
    }

    /// Add a case-insensitive substring match on `column`.
    pub(crate) fn push_contains(&mut self, column: &str, needle: &str) {
        self.push(
            format!("LOWER({column}) LIKE ?"),
            format!("%{}%", needle.to_lowercase()),
        );
    }

    fn clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }
}

/// Translate a UNIQUE constraint failure on `column` into a validation error.
pub(crate) fn map_unique_violation(
    err: rusqlite::Error,
    column: &'static str,
    value: &str,
) -> Error {
    let duplicate = matches!(
        &err,
        rusqlite::Error::SqliteFailure(failure, Some(message))
            if failure.code == rusqlite::ErrorCode::ConstraintViolation
                && message.contains(column)
    );
    if duplicate {
        Error::validation(column, format!("'{value}' is already registered"))
    } else {
        Error::Sqlite(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_conditions_render_no_where_clause() {
        let conditions = Conditions::default();
        assert_eq!(conditions.clause(), "");
    }

    #[test]
    fn conditions_join_with_and() {
        let mut conditions = Conditions::default();
        conditions.push("a >= ?", 1);
        conditions.push_in("status", vec!["pending", "in_transit"]);
        assert_eq!(conditions.clause(), " WHERE a >= ? AND status IN (?, ?)");
        assert_eq!(conditions.params.len(), 3);
    }

    #[test]
    fn empty_in_set_matches_nothing() {
        let mut conditions = Conditions::default();
        conditions.push_in::<String>("status", Vec::new());
        assert_eq!(conditions.clause(), " WHERE 0");
    }

    #[test]
    fn in_memory_store_has_no_path() {
        let store = Store::open_in_memory().expect("open in-memory store");
        assert!(store.path().is_none());
        assert!(matches!(
            store.vehicle(42),
            Err(Error::NotFound {
                entity: EntityKind::Vehicle,
                id: 42
            })
        ));
    }
}
