use crate::domain::payment::{BillingEntity, PaymentRecord};
use crate::domain::ports::{BillingEntityStore, PaymentStore};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    payments: BTreeMap<u64, PaymentRecord>,
    #[serde(default)]
    billing_entities: BTreeMap<u64, BillingEntity>,
}

/// Payment records and billing entities kept in a single JSON document.
///
/// Every call reads the file, and writes go back in full. A missing file reads
/// as an empty store. Clones share one lock so writes from the same process
/// don't interleave.
#[derive(Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    async fn load(&self) -> Result<StoreDocument> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(StoreDocument::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoreDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, document: &StoreDocument) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(document)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl PaymentStore for JsonFileStore {
    async fn store(&self, payment: PaymentRecord) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        document.payments.insert(payment.id, payment);
        self.save(&document).await
    }

    async fn get(&self, payment_id: u64) -> Result<Option<PaymentRecord>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.payments.remove(&payment_id))
    }
}

#[async_trait]
impl BillingEntityStore for JsonFileStore {
    async fn store(&self, entity: BillingEntity) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        document.billing_entities.insert(entity.id, entity);
        self.save(&document).await
    }

    async fn get(&self, entity_id: u64) -> Result<Option<BillingEntity>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.billing_entities.remove(&entity_id))
    }
}
