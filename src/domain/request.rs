use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use std::fmt;
use uuid::Uuid;

pub const TXN_TYPE_AUTH: &str = "Auth";
const TXN_ID_PREFIX: &str = "ID";
// PxPay rejects TxnId values longer than 16 characters.
const TXN_ID_LEN: usize = 16;

/// User-supplied fields for a hosted payment.
///
/// Field names match the checkout form keys (`Amount`, `Currency`, `TxnData1`, ...).
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct PaymentFields {
    #[serde(rename = "Amount")]
    pub amount: Decimal,
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "Reference", default)]
    pub reference: Option<String>,
    #[serde(rename = "EmailAddress", default)]
    pub email_address: Option<String>,
    #[serde(
        rename = "EnableAddBillCard",
        default,
        deserialize_with = "deserialize_flag"
    )]
    pub enable_add_bill_card: Option<bool>,
    #[serde(rename = "TxnData1", default)]
    pub txn_data1: Option<String>,
    #[serde(rename = "TxnData2", default)]
    pub txn_data2: Option<String>,
    #[serde(rename = "TxnData3", default)]
    pub txn_data3: Option<String>,
    /// Scenario label read by the mock transport.
    #[serde(default)]
    pub mock: Option<String>,
}

impl PaymentFields {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            ..Self::default()
        }
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(u8),
        Text(String),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Flag::Bool(b)) => Ok(Some(b)),
        Some(Flag::Int(i)) => Ok(Some(i != 0)),
        Some(Flag::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(Some(true)),
            "0" | "false" | "" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "invalid EnableAddBillCard value: {other}"
            ))),
        },
    }
}

/// Where the hosted page sends the shopper afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallbackUrls {
    pub success: String,
    pub fail: String,
}

/// Merchant-side transaction identifier, unique per initiate attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxnId(String);

impl TxnId {
    pub fn generate() -> Self {
        let random = Uuid::new_v4().simple().to_string();
        let mut id = String::with_capacity(TXN_ID_LEN);
        id.push_str(TXN_ID_PREFIX);
        id.push_str(&random[..TXN_ID_LEN - TXN_ID_PREFIX.len()]);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An initiate-payment request, ready to be encoded for the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub amount_input: String,
    pub currency_input: String,
    pub merchant_reference: Option<String>,
    pub email_address: Option<String>,
    pub enable_add_bill_card: Option<bool>,
    pub txn_data1: Option<String>,
    pub txn_data2: Option<String>,
    pub txn_data3: Option<String>,
    pub url_fail: String,
    pub url_success: String,
    pub txn_id: TxnId,
    pub txn_type: &'static str,
}

impl GenerateRequest {
    /// Builds a request with a freshly generated `TxnId`.
    ///
    /// Currency is copied as given; checking it against the supported set is
    /// the caller's job.
    pub fn build(fields: &PaymentFields, urls: &CallbackUrls) -> Self {
        Self {
            amount_input: format_amount(fields.amount, &fields.currency),
            currency_input: fields.currency.clone(),
            merchant_reference: fields.reference.clone(),
            email_address: fields.email_address.clone(),
            enable_add_bill_card: fields.enable_add_bill_card,
            txn_data1: fields.txn_data1.clone(),
            txn_data2: fields.txn_data2.clone(),
            txn_data3: fields.txn_data3.clone(),
            url_fail: urls.fail.clone(),
            url_success: urls.success.clone(),
            txn_id: TxnId::generate(),
            txn_type: TXN_TYPE_AUTH,
        }
    }
}

/// Status lookup for a completed hosted-page session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// The opaque `result` token from the return URL.
    pub response: String,
}

impl LookupRequest {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            response: token.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayRequest {
    Generate(GenerateRequest),
    Lookup(LookupRequest),
}

/// Number of decimal places the currency is quoted in.
pub fn minor_units(currency: &str) -> u32 {
    match currency {
        "BIF" | "CLP" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "PYG" | "RWF" | "UGX"
        | "VND" | "VUV" | "XAF" | "XOF" | "XPF" => 0,
        "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
        _ => 2,
    }
}

pub fn format_amount(amount: Decimal, currency: &str) -> String {
    let scale = minor_units(currency);
    let mut scaled = amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    scaled.rescale(scale);
    scaled.to_string()
}
