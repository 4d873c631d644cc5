//! Products Domain
//!
//! The store catalog and its dashboard summary.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /products CRUD, /dashboard
//! └──────┬──────┘
//!        │
//! ┌──────▼──────────────────┐
//! │ ProductService          │  ← validation, name uniqueness
//! │ DashboardService        │  ← total / low-stock counts
//! └──────┬──────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← ProductRepository (in-memory, Postgres)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     DashboardService, InMemoryProductRepository, ProductService, handlers,
//! };
//!
//! let repository = InMemoryProductRepository::new();
//! let catalog = handlers::router(ProductService::new(repository.clone()));
//! let dashboard = handlers::dashboard_router(DashboardService::new(repository));
//! ```

pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

pub use dashboard::{DashboardEntry, DashboardService, LOW_STOCK_THRESHOLD};
pub use error::{ProductError, ProductResult};
pub use models::{NewProduct, Product, ProductFilter, ProductInput, ProductPatch};
pub use postgres::{PostgresProductRepository, init_schema};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
pub use validation::validate_product;
