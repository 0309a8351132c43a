use async_trait::async_trait;
use chrono::Utc;
use common::{Money, OrderId};
use domain::{NewOrder, Order, OrderLine, OrderStatus};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{OrderStore, OrderStoreError, Result};

/// PostgreSQL-backed order store implementation.
///
/// Lines are embedded in the order row as JSONB; they are owned by the
/// order and never shared, so there is no separate lines table.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new PostgreSQL order store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations (products and orders tables).
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_order(row: &PgRow) -> Result<Order> {
        let lines: Vec<OrderLine> = serde_json::from_value(row.try_get("lines")?)?;
        let status: OrderStatus =
            serde_json::from_value(serde_json::Value::String(row.try_get("status")?))?;

        Ok(Order {
            id: OrderId::from_uuid(row.try_get::<Uuid, _>("id")?),
            customer_email: row.try_get("customer_email")?,
            status,
            lines,
            total_amount: Money::from_cents(row.try_get("total_cents")?),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn create(&self, order: NewOrder) -> Result<Order> {
        let id = OrderId::new();
        let now = Utc::now();
        let status = OrderStatus::Pending;
        let lines = serde_json::to_value(&order.lines)?;

        sqlx::query(
            "INSERT INTO orders (id, customer_email, status, lines, total_cents, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id.as_uuid())
        .bind(&order.customer_email)
        .bind(status.as_str())
        .bind(&lines)
        .bind(order.total_amount.cents())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Order {
            id,
            customer_email: order.customer_email,
            status,
            lines: order.lines,
            total_amount: order.total_amount,
            created_at: now,
            updated_at: now,
        })
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            "SELECT id, customer_email, status, lines, total_cents, created_at, updated_at \
             FROM orders ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_order).collect()
    }

    async fn get(&self, id: OrderId) -> Result<Order> {
        let row = sqlx::query(
            "SELECT id, customer_email, status, lines, total_cents, created_at, updated_at \
             FROM orders WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(OrderStoreError::NotFound(id))?;

        Self::row_to_order(&row)
    }

    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order> {
        let now = Utc::now();

        let row = sqlx::query(
            "UPDATE orders SET status = $2, updated_at = $3 WHERE id = $1 \
             RETURNING id, customer_email, status, lines, total_cents, created_at, updated_at",
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(OrderStoreError::NotFound(id))?;

        Self::row_to_order(&row)
    }
}
