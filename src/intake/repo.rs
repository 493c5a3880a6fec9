use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

/// Append-only gateway over the two document tables. Aggregates and food
/// records are opaque JSON; the store assigns row ids and timestamps.
#[async_trait]
pub trait NutrientStore: Send + Sync {
    async fn insert_food_records(&self, records: &[Value]) -> anyhow::Result<()>;
    async fn insert_totals(&self, totals: Value) -> anyhow::Result<()>;
    async fn latest_totals(&self) -> anyhow::Result<Option<Value>>;
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NutrientStore for PgStore {
    async fn insert_food_records(&self, records: &[Value]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await.context("begin tx")?;
        for record in records {
            sqlx::query(
                r#"
                INSERT INTO food_records (id, record)
                VALUES ($1, $2)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(record)
            .execute(&mut *tx)
            .await
            .context("insert food record")?;
        }
        tx.commit().await.context("commit tx")?;
        Ok(())
    }

    async fn insert_totals(&self, totals: Value) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO nutrient_totals (id, totals, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(totals)
        .bind(OffsetDateTime::now_utc())
        .execute(&self.pool)
        .await
        .context("insert nutrient totals")?;
        Ok(())
    }

    async fn latest_totals(&self) -> anyhow::Result<Option<Value>> {
        let totals = sqlx::query_scalar::<_, Value>(
            r#"
            SELECT totals
              FROM nutrient_totals
             ORDER BY created_at DESC
             LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .context("select latest nutrient totals")?;

        Ok(totals)
    }
}
