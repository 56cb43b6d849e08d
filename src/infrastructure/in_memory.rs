use crate::domain::payment::{BillingEntity, PaymentRecord};
use crate::domain::ports::{BillingEntityStore, PaymentStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for payment records.
///
/// `Clone` shares the underlying map, so a test can keep a handle and inspect
/// what the gateway wrote.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<HashMap<u64, PaymentRecord>>>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn store(&self, payment: PaymentRecord) -> Result<()> {
        let mut payments = self.payments.write().await;
        payments.insert(payment.id, payment);
        Ok(())
    }

    async fn get(&self, payment_id: u64) -> Result<Option<PaymentRecord>> {
        let payments = self.payments.read().await;
        Ok(payments.get(&payment_id).cloned())
    }
}

/// A thread-safe in-memory store for billing entities.
#[derive(Default, Clone)]
pub struct InMemoryBillingEntityStore {
    entities: Arc<RwLock<HashMap<u64, BillingEntity>>>,
}

impl InMemoryBillingEntityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BillingEntityStore for InMemoryBillingEntityStore {
    async fn store(&self, entity: BillingEntity) -> Result<()> {
        let mut entities = self.entities.write().await;
        entities.insert(entity.id, entity);
        Ok(())
    }

    async fn get(&self, entity_id: u64) -> Result<Option<BillingEntity>> {
        let entities = self.entities.read().await;
        Ok(entities.get(&entity_id).cloned())
    }
}
