use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS products (
            name TEXT PRIMARY KEY,
            rel_performance REAL,
            launch_price REAL,
            new_avg REAL,
            used_avg REAL,
            tier TEXT,
            driver_support TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_products_performance ON products(rel_performance);
        CREATE INDEX IF NOT EXISTS idx_products_tier ON products(tier);
        ",
    )
    .map_err(|e| format!("Migration failed: {e}"))
}
