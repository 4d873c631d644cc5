use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement, Value,
};
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter};
use crate::repository::ProductRepository;

const PRODUCTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id UUID PRIMARY KEY,
        name VARCHAR(100) NOT NULL UNIQUE,
        model VARCHAR(50) NOT NULL,
        type VARCHAR(30) NOT NULL,
        store VARCHAR(50) NOT NULL,
        price NUMERIC(10, 2) NOT NULL CHECK (price >= 0),
        image VARCHAR(100) NOT NULL,
        stock INTEGER NOT NULL CHECK (stock >= 1),
        user_id UUID NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
"#;

const PRODUCT_COLUMNS: &str =
    "id, name, model, type AS product_type, store, price, image, stock, user_id, created_at, updated_at";

/// Creates the `products` table when missing.
///
/// `user_id` carries no foreign key so the catalog can live in a different
/// database from the accounts.
pub async fn init_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute_unprepared(PRODUCTS_TABLE).await?;
    Ok(())
}

fn db_error(e: DbErr) -> ProductError {
    ProductError::Database(e.to_string())
}

fn write_error(e: DbErr, name: &str) -> ProductError {
    let err_str = e.to_string();
    if err_str.contains("duplicate key") || err_str.contains("unique constraint") {
        ProductError::DuplicateName(name.to_string())
    } else {
        db_error(e)
    }
}

/// Escapes LIKE wildcards so `search` matches literally.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// PostgreSQL implementation of ProductRepository using SeaORM
#[derive(Clone)]
pub struct PostgresProductRepository {
    db: DatabaseConnection,
}

impl PostgresProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn count_where(&self, sql: &str, values: Vec<Value>) -> ProductResult<u64> {
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, values);
        let row = CountRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(row.map_or(0, |r| r.count.max(0) as u64))
    }
}

#[derive(Debug, FromQueryResult)]
struct ProductRow {
    id: Uuid,
    name: String,
    model: String,
    product_type: String,
    store: String,
    price: Decimal,
    image: String,
    stock: i32,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            model: row.model,
            product_type: row.product_type,
            store: row.store,
            price: row.price,
            image: row.image,
            stock: row.stock,
            user: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    count: i64,
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let mut conditions = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(search) = filter.search {
            values.push(like_pattern(&search).into());
            conditions.push(format!("name ILIKE ${} ESCAPE '\\'", values.len()));
        }
        if let Some(product_type) = filter.product_type {
            values.push(product_type.into());
            conditions.push(format!("type = ${}", values.len()));
        }
        if let Some(store) = filter.store {
            values.push(store.into());
            conditions.push(format!("store = ${}", values.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products {where_clause} ORDER BY created_at, id"
        );

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, values);
        let rows = ProductRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let row = ProductRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn name_taken(&self, name: &str, exclude: Option<Uuid>) -> ProductResult<bool> {
        let count = match exclude {
            Some(id) => {
                self.count_where(
                    "SELECT COUNT(*) AS count FROM products WHERE name = $1 AND id <> $2",
                    vec![name.into(), id.into()],
                )
                .await?
            }
            None => {
                self.count_where(
                    "SELECT COUNT(*) AS count FROM products WHERE name = $1",
                    vec![name.into()],
                )
                .await?
            }
        };
        Ok(count > 0)
    }

    async fn create(&self, product: Product) -> ProductResult<Product> {
        let sql = format!(
            r#"
            INSERT INTO products (id, name, model, type, store, price, image, stock,
                                  user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                product.id.into(),
                product.name.clone().into(),
                product.model.clone().into(),
                product.product_type.clone().into(),
                product.store.clone().into(),
                product.price.into(),
                product.image.clone().into(),
                product.stock.into(),
                product.user.into(),
                product.created_at.into(),
                product.updated_at.into(),
            ],
        );

        let row = ProductRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| write_error(e, &product.name))?
            .ok_or_else(|| ProductError::Internal("Failed to create product".to_string()))?;

        tracing::info!(product_id = %row.id, "Created product");
        Ok(row.into())
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let sql = format!(
            r#"
            UPDATE products
            SET name = $2, model = $3, type = $4, store = $5, price = $6,
                image = $7, stock = $8, updated_at = $9
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                product.id.into(),
                product.name.clone().into(),
                product.model.clone().into(),
                product.product_type.clone().into(),
                product.store.clone().into(),
                product.price.into(),
                product.image.clone().into(),
                product.stock.into(),
                product.updated_at.into(),
            ],
        );

        let row = ProductRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| write_error(e, &product.name))?
            .ok_or(ProductError::NotFound(product.id))?;

        tracing::info!(product_id = %row.id, "Updated product");
        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "DELETE FROM products WHERE id = $1",
            [id.into()],
        );

        let result = self.db.execute_raw(stmt).await.map_err(db_error)?;
        let removed = result.rows_affected() > 0;
        if removed {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(removed)
    }

    async fn count(&self) -> ProductResult<u64> {
        self.count_where("SELECT COUNT(*) AS count FROM products", Vec::new())
            .await
    }

    async fn count_below_stock(&self, threshold: i32) -> ProductResult<u64> {
        self.count_where(
            "SELECT COUNT(*) AS count FROM products WHERE stock < $1",
            vec![threshold.into()],
        )
        .await
    }
}
