use super::payment::{BillingEntity, PaymentRecord};
use super::request::GatewayRequest;
use crate::error::Result;
use async_trait::async_trait;

/// One outbound call to the gateway.
#[derive(Debug, Clone, Copy)]
pub struct Exchange<'a> {
    pub request: &'a GatewayRequest,
    /// Scenario label from the inbound fields; only the mock transport reads it.
    pub mock_scenario: Option<&'a str>,
}

#[async_trait]
pub trait GatewayTransport: Send + Sync {
    /// Returns the raw reply body, or `None` when the call could not complete.
    async fn send(&self, exchange: Exchange<'_>) -> Result<Option<String>>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn store(&self, payment: PaymentRecord) -> Result<()>;
    async fn get(&self, payment_id: u64) -> Result<Option<PaymentRecord>>;
}

#[async_trait]
pub trait BillingEntityStore: Send + Sync {
    async fn store(&self, entity: BillingEntity) -> Result<()>;
    async fn get(&self, entity_id: u64) -> Result<Option<BillingEntity>>;
}

pub type GatewayTransportBox = Box<dyn GatewayTransport>;
pub type PaymentStoreBox = Box<dyn PaymentStore>;
pub type BillingEntityStoreBox = Box<dyn BillingEntityStore>;
