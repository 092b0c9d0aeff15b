use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::CustomerStore;
use crate::models::Customer;

/// Process-local customer store for tests and `CUSTOMER_STORE=memory` runs
#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    customers: DashMap<Uuid, Customer>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>> {
        let customer = self.customers.get(&id).map(|entry| entry.value().clone());
        tracing::debug!("Looked up customer {} (found: {})", id, customer.is_some());
        Ok(customer)
    }

    async fn save(&self, customer: &Customer) -> Result<()> {
        self.customers.insert(customer.id, customer.clone());
        tracing::debug!("Saved customer with id: {}", customer.id);
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        self.customers.clear();
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{john_doe, Gender};

    #[tokio::test]
    async fn test_save_and_find() {
        let store = InMemoryCustomerStore::new();
        let customer = john_doe();

        store.save(&customer).await.unwrap();

        let found = store.find_by_id(customer.id).await.unwrap();
        assert_eq!(found, Some(customer));
        assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_record() {
        let store = InMemoryCustomerStore::new();
        let mut customer = john_doe();
        store.save(&customer).await.unwrap();

        customer.name = "Jane Doe".to_string();
        customer.gender = Gender::Female;
        store.save(&customer).await.unwrap();

        assert_eq!(store.len(), 1);
        let found = store.find_by_id(customer.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Jane Doe");
        assert_eq!(found.gender, Gender::Female);
    }

    #[tokio::test]
    async fn test_delete_all() {
        let store = InMemoryCustomerStore::new();
        store.save(&john_doe()).await.unwrap();
        store.save(&john_doe()).await.unwrap();
        assert_eq!(store.len(), 2);

        store.delete_all().await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_health_check_always_passes() {
        assert!(InMemoryCustomerStore::new().health_check().await.is_ok());
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InMemoryCustomerStore>();
    }
}
