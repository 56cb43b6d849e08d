#![allow(dead_code)]

use pxpay::application::gateway::PxPayGateway;
use pxpay::config::GatewayConfig;
use pxpay::domain::payment::{BillingEntity, PaymentRecord};
use pxpay::domain::ports::{BillingEntityStore, PaymentStore};
use pxpay::infrastructure::in_memory::{InMemoryBillingEntityStore, InMemoryPaymentStore};
use pxpay::infrastructure::mock::MockTransport;
use std::path::Path;

pub const MOCK_DPS_TXN_REF: &str = "0000000106502ae12-mock";

pub fn mock_config() -> GatewayConfig {
    GatewayConfig {
        user_id: "ShopUser".to_string(),
        return_url: "https://shop.example/PxPay/check/1".to_string(),
        cancel_url: "https://shop.example/PxPay/cancel/1".to_string(),
        ..GatewayConfig::default()
    }
}

/// A mock-backed gateway with payment 1 paid by billing entity 7.
pub async fn mock_gateway() -> (PxPayGateway, InMemoryPaymentStore, InMemoryBillingEntityStore) {
    let config = mock_config();
    let payments = InMemoryPaymentStore::new();
    let entities = InMemoryBillingEntityStore::new();
    payments.store(PaymentRecord::new(1).paid_by(7)).await.unwrap();
    entities
        .store(BillingEntity {
            id: 7,
            billing_id: Some("0000080023225598".to_string()),
        })
        .await
        .unwrap();

    let gateway = PxPayGateway::new(
        Box::new(MockTransport::new(&config)),
        Box::new(payments.clone()),
        Box::new(entities.clone()),
        config.callback_urls(),
    );
    (gateway, payments, entities)
}

/// Writes a JSON store file holding payment `payment_id` paid by entity 7.
pub fn seed_store(path: &Path, payment_id: u64) {
    let document = serde_json::json!({
        "payments": {
            (payment_id.to_string()): { "id": payment_id, "paid_by": 7, "dps_reference": null }
        },
        "billing_entities": {
            "7": { "id": 7, "billing_id": null }
        }
    });
    std::fs::write(path, serde_json::to_vec_pretty(&document).unwrap()).unwrap();
}
