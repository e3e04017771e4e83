// apps/storefront/src/db/pg_document_store.rs

//! `users/{userId}/cart/{productId}` documents mapped onto one Postgres table
//! keyed by `(user_id, product_id)`. `NOW()` supplies server timestamps.

use async_trait::async_trait;
use cart_sync::{
  CartLine, CartLinePatch, CartLinePath, DocumentStore, NewCartLine, ProductId, StoreError, StoreResult, UserId,
};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{debug, info};

const CREATE_CART_LINES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS cart_lines (
  user_id     TEXT             NOT NULL,
  product_id  TEXT             NOT NULL,
  name        TEXT             NOT NULL,
  price       DOUBLE PRECISION NOT NULL,
  image       TEXT             NOT NULL,
  quantity    BIGINT           NOT NULL CHECK (quantity > 0),
  revision    BIGINT           NOT NULL DEFAULT 1,
  created_at  TIMESTAMPTZ      NOT NULL DEFAULT NOW(),
  updated_at  TIMESTAMPTZ      NOT NULL DEFAULT NOW(),
  PRIMARY KEY (user_id, product_id)
)
"#;

const LINE_COLUMNS: &str = "product_id, name, price, image, quantity, revision, created_at, updated_at";

#[derive(Debug, FromRow)]
struct CartLineRow {
  product_id: String,
  name: String,
  price: f64,
  image: String,
  quantity: i64,
  revision: i64,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl CartLineRow {
  fn into_line(self, location: &str) -> StoreResult<CartLine> {
    let corrupt = |message: String| StoreError::Corrupt {
      path: location.to_string(),
      message,
    };
    let product_id =
      ProductId::parse(&self.product_id).map_err(|v| corrupt(format!("product_id '{}': {}", self.product_id, v)))?;
    let quantity = u32::try_from(self.quantity)
      .ok()
      .filter(|q| *q > 0)
      .ok_or_else(|| corrupt(format!("quantity {} out of range", self.quantity)))?;
    let revision = u64::try_from(self.revision).map_err(|_| corrupt(format!("revision {} is negative", self.revision)))?;

    Ok(CartLine {
      product_id,
      name: self.name,
      price: self.price,
      image: self.image,
      quantity,
      created_at: self.created_at,
      updated_at: self.updated_at,
      revision,
    })
  }
}

#[derive(Debug, Clone)]
pub struct PgDocumentStore {
  pool: PgPool,
}

impl PgDocumentStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Creates the `cart_lines` table if it does not exist yet.
  pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_CART_LINES_TABLE).execute(&self.pool).await?;
    info!("cart_lines table is present.");
    Ok(())
  }

  async fn current_revision(&self, path: &CartLinePath) -> StoreResult<Option<i64>> {
    sqlx::query_scalar::<_, i64>("SELECT revision FROM cart_lines WHERE user_id = $1 AND product_id = $2")
      .bind(path.user_id.as_str())
      .bind(path.product_id.as_str())
      .fetch_optional(&self.pool)
      .await
      .map_err(StoreError::backend)
  }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
  async fn get(&self, path: &CartLinePath) -> StoreResult<Option<CartLine>> {
    let sql = format!(
      "SELECT {} FROM cart_lines WHERE user_id = $1 AND product_id = $2",
      LINE_COLUMNS
    );
    let row = sqlx::query_as::<_, CartLineRow>(&sql)
      .bind(path.user_id.as_str())
      .bind(path.product_id.as_str())
      .fetch_optional(&self.pool)
      .await
      .map_err(StoreError::backend)?;
    debug!(path = %path, found = row.is_some(), "cart line read");
    row.map(|r| r.into_line(&path.to_string())).transpose()
  }

  async fn create(&self, path: &CartLinePath, line: NewCartLine) -> StoreResult<CartLine> {
    let sql = format!(
      "INSERT INTO cart_lines (user_id, product_id, name, price, image, quantity, revision, created_at, updated_at) \
       VALUES ($1, $2, $3, $4, $5, $6, 1, NOW(), NOW()) \
       ON CONFLICT (user_id, product_id) DO NOTHING \
       RETURNING {}",
      LINE_COLUMNS
    );
    let row = sqlx::query_as::<_, CartLineRow>(&sql)
      .bind(path.user_id.as_str())
      .bind(path.product_id.as_str())
      .bind(&line.name)
      .bind(line.price)
      .bind(&line.image)
      .bind(i64::from(line.quantity))
      .fetch_optional(&self.pool)
      .await
      .map_err(StoreError::backend)?;

    match row {
      Some(row) => row.into_line(&path.to_string()),
      None => Err(StoreError::AlreadyExists { path: path.to_string() }),
    }
  }

  async fn update(&self, path: &CartLinePath, patch: CartLinePatch) -> StoreResult<CartLine> {
    let expected = patch
      .expected_revision
      .map(|rev| i64::try_from(rev).map_err(StoreError::backend))
      .transpose()?;
    let sql = format!(
      "UPDATE cart_lines SET quantity = $3, revision = revision + 1, updated_at = NOW() \
       WHERE user_id = $1 AND product_id = $2 AND ($4::BIGINT IS NULL OR revision = $4) \
       RETURNING {}",
      LINE_COLUMNS
    );
    let row = sqlx::query_as::<_, CartLineRow>(&sql)
      .bind(path.user_id.as_str())
      .bind(path.product_id.as_str())
      .bind(i64::from(patch.quantity))
      .bind(expected)
      .fetch_optional(&self.pool)
      .await
      .map_err(StoreError::backend)?;

    if let Some(row) = row {
      return row.into_line(&path.to_string());
    }

    // Nothing matched: either the line is gone or the revision moved on.
    match (patch.expected_revision, self.current_revision(path).await?) {
      (Some(expected), Some(actual)) => Err(StoreError::Conflict {
        path: path.to_string(),
        expected,
        actual: u64::try_from(actual).unwrap_or_default(),
      }),
      _ => Err(StoreError::NotFound { path: path.to_string() }),
    }
  }

  async fn list(&self, user_id: &UserId) -> StoreResult<Vec<CartLine>> {
    let sql = format!(
      "SELECT {} FROM cart_lines WHERE user_id = $1 ORDER BY created_at, product_id",
      LINE_COLUMNS
    );
    let rows = sqlx::query_as::<_, CartLineRow>(&sql)
      .bind(user_id.as_str())
      .fetch_all(&self.pool)
      .await
      .map_err(StoreError::backend)?;

    rows
      .into_iter()
      .map(|row| {
        let location = format!("users/{}/cart/{}", user_id, row.product_id);
        row.into_line(&location)
      })
      .collect()
  }
}
