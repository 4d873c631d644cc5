//! Read-side catalog summary.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ProductResult;
use crate::repository::ProductRepository;

/// Products with stock strictly below this count as low.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

pub const TOTAL_PRODUCTS: &str = "Total Products";
pub const LOW_STOCK_ITEMS: &str = "Low Stock Items";

/// One dashboard card. `description` holds the count as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardEntry {
    pub title: String,
    pub description: String,
}

impl DashboardEntry {
    fn count(title: &str, count: u64) -> Self {
        Self {
            title: title.to_string(),
            description: count.to_string(),
        }
    }
}

pub struct DashboardService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> DashboardService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// The two counts are independent reads, not a snapshot.
    pub async fn summary(&self) -> ProductResult<Vec<DashboardEntry>> {
        let total = self.repository.count().await?;
        let low_stock = self
            .repository
            .count_below_stock(LOW_STOCK_THRESHOLD)
            .await?;

        Ok(vec![
            DashboardEntry::count(TOTAL_PRODUCTS, total),
            DashboardEntry::count(LOW_STOCK_ITEMS, low_stock),
        ])
    }
}
