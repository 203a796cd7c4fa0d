use crate::domain::entities::product::Product;
use crate::domain::error::DomainError;
use crate::domain::ports::product_repository::{CatalogStats, ProductRepository};
use crate::domain::values::channel::Channel;
use crate::domain::values::tier::Tier;
use chrono::DateTime;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

const SELECT_COLS: &str =
    "name, rel_performance, launch_price, new_avg, used_avg, tier, driver_support, created_at, updated_at";

pub struct SqliteProductRepo {
    conn: Mutex<Connection>,
}

impl SqliteProductRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn price_column(channel: Channel) -> &'static str {
        match channel {
            Channel::New => "new_avg",
            Channel::Used => "used_avg",
            Channel::Launch => "launch_price",
        }
    }

    fn row_to_product(row: &rusqlite::Row) -> Result<Product, rusqlite::Error> {
        let tier_str: Option<String> = row.get(5)?;
        let created_str: String = row.get(7)?;
        let updated_str: String = row.get(8)?;

        Ok(Product {
            name: row.get(0)?,
            rel_performance: row.get(1)?,
            launch_price: row.get(2)?,
            new_avg: row.get(3)?,
            used_avg: row.get(4)?,
            tier: tier_str.and_then(|s| {
                s.parse::<Tier>()
                    .map_err(|_| {
                        eprintln!("Warning: invalid tier '{s}' in row, treating as untiered");
                    })
                    .ok()
            }),
            driver_support: row.get(6)?,
            created_at: DateTime::parse_from_rfc3339(&created_str)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(|_| chrono::Utc::now()),
            updated_at: DateTime::parse_from_rfc3339(&updated_str)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(|_| chrono::Utc::now()),
        })
    }

    fn ensure_affected(&self, name: &str, affected: usize) -> Result<(), DomainError> {
        if affected == 0 {
            return Err(DomainError::NotFound(format!("Product '{name}'")));
        }
        Ok(())
    }
}

impl ProductRepository for SqliteProductRepo {
    fn add(&self, product: &Product) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO products (name, rel_performance, launch_price, new_avg, used_avg, tier, driver_support, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                product.name,
                product.rel_performance,
                product.launch_price,
                product.new_avg,
                product.used_avg,
                product.tier.map(|t| t.to_string()),
                product.driver_support,
                product.created_at.to_rfc3339(),
                product.updated_at.to_rfc3339(),
            ],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                DomainError::InvalidInput(format!("Product '{}' already exists", product.name))
            }
            e => DomainError::Database(format!("Failed to add product: {e}")),
        })?;
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Option<Product>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.query_row(
            &format!("SELECT {SELECT_COLS} FROM products WHERE name = ?1"),
            params![name],
            Self::row_to_product,
        )
        .optional()
        .map_err(|e| DomainError::Database(format!("Failed to get product: {e}")))
    }

    fn all(&self) -> Result<Vec<Product>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(&format!("SELECT {SELECT_COLS} FROM products ORDER BY name"))
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], Self::row_to_product)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Database(format!("Failed to read products: {e}")))
    }

    fn with_performance(&self) -> Result<Vec<Product>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {SELECT_COLS} FROM products WHERE rel_performance IS NOT NULL ORDER BY name"
            ))
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], Self::row_to_product)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Database(format!("Failed to read products: {e}")))
    }

    fn set_channel_price(
        &self,
        name: &str,
        channel: Channel,
        price: f64,
    ) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let affected = conn
            .execute(
                &format!(
                    "UPDATE products SET {} = ?1, updated_at = ?2 WHERE name = ?3",
                    Self::price_column(channel)
                ),
                params![price, chrono::Utc::now().to_rfc3339(), name],
            )
            .map_err(|e| DomainError::Database(format!("Failed to set price: {e}")))?;
        self.ensure_affected(name, affected)
    }

    fn reset_channel(&self, channel: Channel) -> Result<usize, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            &format!(
                "UPDATE products SET {} = NULL, updated_at = ?1",
                Self::price_column(channel)
            ),
            params![chrono::Utc::now().to_rfc3339()],
        )
        .map_err(|e| DomainError::Database(format!("Failed to reset channel: {e}")))
    }

    fn set_tier(&self, name: &str, tier: Tier) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let affected = conn
            .execute(
                "UPDATE products SET tier = ?1, updated_at = ?2 WHERE name = ?3",
                params![tier.to_string(), chrono::Utc::now().to_rfc3339(), name],
            )
            .map_err(|e| DomainError::Database(format!("Failed to set tier: {e}")))?;
        self.ensure_affected(name, affected)
    }

    fn set_performance(&self, name: &str, score: f64) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let affected = conn
            .execute(
                "UPDATE products SET rel_performance = ?1, updated_at = ?2 WHERE name = ?3",
                params![score, chrono::Utc::now().to_rfc3339(), name],
            )
            .map_err(|e| DomainError::Database(format!("Failed to set performance: {e}")))?;
        self.ensure_affected(name, affected)
    }

    fn set_driver_support(&self, name: &str, note: &str) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let affected = conn
            .execute(
                "UPDATE products SET driver_support = ?1, updated_at = ?2 WHERE name = ?3",
                params![note, chrono::Utc::now().to_rfc3339(), name],
            )
            .map_err(|e| DomainError::Database(format!("Failed to set driver support: {e}")))?;
        self.ensure_affected(name, affected)
    }

    fn stats(&self) -> Result<CatalogStats, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let total: usize = conn
            .query_row("SELECT COUNT(*) FROM products", [], |r| r.get(0))
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let with_performance: usize = conn
            .query_row(
                "SELECT COUNT(*) FROM products WHERE rel_performance IS NOT NULL",
                [],
                |r| r.get(0),
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let priced: usize = conn
            .query_row(
                "SELECT COUNT(*) FROM products
                 WHERE COALESCE(used_avg, new_avg, launch_price) > 50",
                [],
                |r| r.get(0),
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tiered: usize = conn
            .query_row(
                "SELECT COUNT(*) FROM products WHERE tier IS NOT NULL",
                [],
                |r| r.get(0),
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut stmt = conn
            .prepare(
                "SELECT tier, COUNT(*) FROM products WHERE tier IS NOT NULL
                 GROUP BY tier ORDER BY COUNT(*) DESC",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let by_tier = stmt
            .query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, usize>(1)?)))
            .map_err(|e| DomainError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(CatalogStats {
            total,
            with_performance,
            priced,
            tiered,
            by_tier,
        })
    }
}
