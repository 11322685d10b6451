use rusqlite::Connection;

use crate::error::Result;

// Shipments keep the raw ids of their vehicle, driver and route without a
// foreign key: those rows may be deleted once only terminal shipments refer
// to them. Tariffs are the exception, historical costs depend on them.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS vehicles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    brand TEXT NOT NULL,
    license_plate TEXT NOT NULL UNIQUE,
    load_capacity_t REAL NOT NULL CHECK (load_capacity_t > 0),
    fuel_consumption REAL NOT NULL CHECK (fuel_consumption >= 0),
    body_type TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS drivers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT NOT NULL,
    license_number TEXT NOT NULL UNIQUE,
    license_category TEXT NOT NULL,
    hire_date TEXT NOT NULL,
    vehicle_id INTEGER UNIQUE REFERENCES vehicles(id) ON DELETE SET NULL
);

CREATE TABLE IF NOT EXISTS routes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    origin TEXT NOT NULL,
    destination TEXT NOT NULL,
    distance_km REAL NOT NULL CHECK (distance_km > 0),
    avg_duration_hours REAL NOT NULL CHECK (avg_duration_hours > 0),
    road_type TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tariffs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    cargo_type TEXT NOT NULL,
    price_per_km REAL NOT NULL CHECK (price_per_km > 0),
    min_price REAL NOT NULL CHECK (min_price >= 0),
    valid_from TEXT NOT NULL,
    valid_until TEXT,
    description TEXT,
    CHECK (valid_until IS NULL OR valid_until > valid_from)
);

CREATE TABLE IF NOT EXISTS shipments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    scheduled_at TEXT NOT NULL,
    weight_kg REAL NOT NULL CHECK (weight_kg > 0),
    status TEXT NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'in_transit', 'delivered', 'cancelled')),
    vehicle_id INTEGER NOT NULL,
    driver_id INTEGER NOT NULL,
    route_id INTEGER NOT NULL,
    tariff_id INTEGER NOT NULL REFERENCES tariffs(id) ON DELETE RESTRICT,
    total_cost REAL NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_shipments_tariff ON shipments (tariff_id, status);
CREATE INDEX IF NOT EXISTS idx_shipments_route ON shipments (route_id, status);
CREATE INDEX IF NOT EXISTS idx_shipments_vehicle ON shipments (vehicle_id, status);
CREATE INDEX IF NOT EXISTS idx_shipments_driver ON shipments (driver_id, status);
CREATE INDEX IF NOT EXISTS idx_tariffs_window ON tariffs (valid_from, valid_until);
"#;

/// Create the fleet tables if they do not exist yet.
pub(super) fn apply(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
