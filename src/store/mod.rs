//! Customer persistence.
//!
//! Handlers only ever see a [`CustomerStore`] trait object, so the Spanner
//! backed store used in production can be swapped for the in-memory one.

mod memory;
mod spanner;

pub use memory::InMemoryCustomerStore;
pub use spanner::SpannerCustomerStore;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::Customer;

#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Load a customer by id, `Ok(None)` when no record exists
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>>;

    /// Insert or overwrite the record stored under `customer.id`
    async fn save(&self, customer: &Customer) -> Result<()>;

    /// Remove every customer. Used for fixture cleanup.
    async fn delete_all(&self) -> Result<()>;

    /// Cheap round trip proving the backing store is reachable
    async fn health_check(&self) -> Result<()>;
}
