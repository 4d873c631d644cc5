//! Product Service - catalog business logic

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{DUPLICATE_NAME_MESSAGE, ProductError, ProductResult};
use crate::models::{NewProduct, Product, ProductFilter, ProductInput, ProductPatch};
use crate::repository::ProductRepository;
use crate::validation::validate_product;

/// Product service providing business logic operations
///
/// Payloads are validated here rather than in extractors because full and
/// partial updates apply different rules to the same input type.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List products. Empty filter values are ignored.
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        self.repository.list(filter.normalized()).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Create a product owned by `owner`.
    #[instrument(skip(self, input))]
    pub async fn create_product(
        &self,
        input: ProductInput,
        owner: Uuid,
    ) -> ProductResult<Product> {
        let patch = self.check(&input, false, None).await?;
        let fields = NewProduct::try_from(patch)?;

        self.repository.create(Product::new(fields, owner)).await
    }

    /// Full (`partial == false`) or partial update of an existing product.
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: Uuid,
        input: ProductInput,
        partial: bool,
    ) -> ProductResult<Product> {
        let mut product = self.get_product(id).await?;

        let mut patch = self.check(&input, partial, Some(id)).await?;
        if !partial {
            patch = ProductPatch::from(NewProduct::try_from(patch)?);
        }

        product.apply(patch);
        self.repository.update(product).await
    }

    /// Delete a product permanently.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await.map_err(|e| match e {
            ProductError::Database(msg) | ProductError::Internal(msg) => {
                ProductError::DeleteFailed(msg)
            }
            other => other,
        })?;

        if deleted {
            Ok(())
        } else {
            Err(ProductError::NotFound(id))
        }
    }

    /// Field validation plus the name-uniqueness check, reported together.
    async fn check(
        &self,
        input: &ProductInput,
        partial: bool,
        exclude: Option<Uuid>,
    ) -> ProductResult<ProductPatch> {
        let validated = validate_product(input, partial);
        let mut errors = validated.as_ref().err().cloned().unwrap_or_default();

        if !errors.contains("name") {
            if let Some(name) = input.name.as_deref().map(str::trim) {
                if self.repository.name_taken(name, exclude).await? {
                    errors.add("name", DUPLICATE_NAME_MESSAGE);
                }
            }
        }

        errors.into_result()?;
        validated.map_err(ProductError::from)
    }
}
