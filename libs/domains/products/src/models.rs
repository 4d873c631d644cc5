use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Catalog item. Serialized as-is for API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    /// Unique across the catalog
    pub name: String,
    pub model: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub store: String,
    /// Always carried at two decimal places, so it renders as `"12.50"`.
    pub price: Decimal,
    pub image: String,
    /// Never below 1
    pub stock: i32,
    /// Creator. Not an access scope.
    pub user: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(fields: NewProduct, owner: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: fields.name,
            model: fields.model,
            product_type: fields.product_type,
            store: fields.store,
            price: fields.price,
            image: fields.image,
            stock: fields.stock,
            user: owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the supplied fields and bumps `updated_at`.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(model) = patch.model {
            self.model = model;
        }
        if let Some(product_type) = patch.product_type {
            self.product_type = product_type;
        }
        if let Some(store) = patch.store {
            self.store = store;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        self.updated_at = Utc::now();
    }
}

/// Raw create/update payload.
///
/// `price` and `stock` stay untyped so that a wrong type becomes a field
/// error rather than a body rejection. Unknown keys, `user` included, are
/// dropped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductInput {
    pub name: Option<String>,
    pub model: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub store: Option<String>,
    pub price: Option<Value>,
    pub image: Option<String>,
    pub stock: Option<Value>,
}

/// Validated values for the fields present in a payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub model: Option<String>,
    pub product_type: Option<String>,
    pub store: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub stock: Option<i32>,
}

/// A complete set of validated fields.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub model: String,
    pub product_type: String,
    pub store: String,
    pub price: Decimal,
    pub image: String,
    pub stock: i32,
}

impl From<NewProduct> for ProductPatch {
    fn from(fields: NewProduct) -> Self {
        Self {
            name: Some(fields.name),
            model: Some(fields.model),
            product_type: Some(fields.product_type),
            store: Some(fields.store),
            price: Some(fields.price),
            image: Some(fields.image),
            stock: Some(fields.stock),
        }
    }
}

/// Query filters for listing products. All optional, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductFilter {
    /// Case-insensitive substring of the name
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub store: Option<String>,
}

impl ProductFilter {
    /// Drops empty values: `?search=` means no search.
    pub fn normalized(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }
        Self {
            search: keep(self.search),
            product_type: keep(self.product_type),
            store: keep(self.store),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        let search = self.search.as_ref().is_none_or(|needle| {
            product
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });
        let product_type = self
            .product_type
            .as_ref()
            .is_none_or(|t| *t == product.product_type);
        let store = self.store.as_ref().is_none_or(|s| *s == product.store);

        search && product_type && store
    }
}
