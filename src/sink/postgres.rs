use secrecy::{ExposeSecret, SecretString};
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    assemble::CompanyRow,
    core::{PipelineError, Result},
};

/// Replaces one PostgreSQL table with the final rows on every run.
pub struct PostgresSink {
    pool: PgPool,
    table: String,
}

impl PostgresSink {
    /// Connect to `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] for a table name that is not a plain identifier,
    /// and [`PipelineError::Database`] if the connection fails.
    pub async fn connect(database_url: &SecretString, table: impl Into<String>) -> Result<Self> {
        let table = table.into();
        if !is_plain_identifier(&table) {
            return Err(PipelineError::Config(format!("invalid table name: {table:?}")));
        }

        tracing::info!(%table, "connecting to database");
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(database_url.expose_secret())
            .await?;
        tracing::info!("database connection established");
        Ok(Self { pool, table })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Drop and recreate the table, insert every row in one transaction, then count
    /// the rows back. Returns that count.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Database`] if any statement fails; the transaction is
    /// rolled back and the previous table is left in place.
    pub async fn replace(&self, rows: &[CompanyRow]) -> Result<i64> {
        tracing::info!(table = %self.table, rows = rows.len(), "uploading data to database");

        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!(r#"DROP TABLE IF EXISTS "{}""#, self.table))
            .execute(&mut *tx)
            .await?;
        sqlx::query(&format!(
            r#"
            CREATE TABLE "{}" (
                "symbol" TEXT NOT NULL,
                "companyName" TEXT NOT NULL,
                "marketCap" DOUBLE PRECISION NOT NULL,
                "beta" DOUBLE PRECISION,
                "fullTimeEmployees" BIGINT,
                "positiveMentions" BIGINT,
                "negativeMentions" BIGINT,
                "meanSentimentScore" DOUBLE PRECISION
            )
            "#,
            self.table
        ))
        .execute(&mut *tx)
        .await?;

        let insert = format!(
            r#"
            INSERT INTO "{}" (
                "symbol", "companyName", "marketCap", "beta", "fullTimeEmployees",
                "positiveMentions", "negativeMentions", "meanSentimentScore"
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
            self.table
        );

        for row in rows {
            let sentiment = row.sentiment.as_ref();
            sqlx::query(&insert)
                .bind(&row.symbol)
                .bind(&row.company_name)
                .bind(row.market_cap)
                .bind(row.beta)
                .bind(to_bigint(row, "fullTimeEmployees", row.full_time_employees)?)
                .bind(to_bigint(row, "positiveMentions", sentiment.map(|s| s.positive_mentions))?)
                .bind(to_bigint(row, "negativeMentions", sentiment.map(|s| s.negative_mentions))?)
                .bind(sentiment.map(|s| s.mean_sentiment_score))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        let (count,): (i64,) = sqlx::query_as(&format!(r#"SELECT COUNT(*) FROM "{}""#, self.table))
            .fetch_one(&self.pool)
            .await?;
        tracing::info!(table = %self.table, count, "data inserted");
        Ok(count)
    }

    /// Close every pooled connection.
    pub async fn close(self) {
        tracing::info!("closing connection to database");
        self.pool.close().await;
    }
}

fn to_bigint(row: &CompanyRow, field: &'static str, v: Option<u64>) -> Result<Option<i64>> {
    v.map(|n| {
        i64::try_from(n).map_err(|_| PipelineError::Coercion {
            symbol: row.symbol.clone(),
            field,
            value: n.to_string(),
        })
    })
    .transpose()
}

/// `[A-Za-z_][A-Za-z0-9_]*`, so the name can be quoted into DDL safely.
pub(crate) fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
