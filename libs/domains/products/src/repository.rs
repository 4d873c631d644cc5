use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter};

/// Repository trait for Product persistence
///
/// Implementations enforce name uniqueness atomically with the write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Matching products ordered by creation time, then id.
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Whether another product already uses `name`.
    async fn name_taken(&self, name: &str, exclude: Option<Uuid>) -> ProductResult<bool>;

    async fn create(&self, product: Product) -> ProductResult<Product>;

    /// Replaces a stored product. Fails with `NotFound` if it is gone.
    async fn update(&self, product: Product) -> ProductResult<Product>;

    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    async fn count(&self) -> ProductResult<u64>;

    async fn count_below_stock(&self, threshold: i32) -> ProductResult<u64>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_in_use(products: &HashMap<Uuid, Product>, name: &str, exclude: Option<Uuid>) -> bool {
    products
        .values()
        .any(|p| p.name == name && Some(p.id) != exclude)
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut matching: Vec<Product> = products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(matching)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn name_taken(&self, name: &str, exclude: Option<Uuid>) -> ProductResult<bool> {
        Ok(name_in_use(&*self.products.read().await, name, exclude))
    }

    async fn create(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if name_in_use(&products, &product.name, None) {
            return Err(ProductError::DuplicateName(product.name));
        }

        products.insert(product.id, product.clone());
        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if !products.contains_key(&product.id) {
            return Err(ProductError::NotFound(product.id));
        }
        if name_in_use(&products, &product.name, Some(product.id)) {
            return Err(ProductError::DuplicateName(product.name));
        }

        products.insert(product.id, product.clone());
        tracing::info!(product_id = %product.id, "Updated product");
        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let removed = self.products.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(removed)
    }

    async fn count(&self) -> ProductResult<u64> {
        Ok(self.products.read().await.len() as u64)
    }

    async fn count_below_stock(&self, threshold: i32) -> ProductResult<u64> {
        let products = self.products.read().await;
        Ok(products.values().filter(|p| p.stock < threshold).count() as u64)
    }
}
