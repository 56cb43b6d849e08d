use crate::config::Credentials;
use crate::domain::request::{GatewayRequest, GenerateRequest, LookupRequest};
use crate::error::Result;
use serde::Serialize;

#[derive(Serialize)]
struct GenerateEnvelope<'a> {
    #[serde(rename = "PxPayUserId")]
    user_id: &'a str,
    #[serde(rename = "PxPayKey")]
    key: &'a str,
    #[serde(rename = "TxnType")]
    txn_type: &'a str,
    #[serde(rename = "AmountInput")]
    amount_input: &'a str,
    #[serde(rename = "CurrencyInput")]
    currency_input: &'a str,
    #[serde(rename = "MerchantReference", skip_serializing_if = "Option::is_none")]
    merchant_reference: Option<&'a str>,
    #[serde(rename = "TxnData1", skip_serializing_if = "Option::is_none")]
    txn_data1: Option<&'a str>,
    #[serde(rename = "TxnData2", skip_serializing_if = "Option::is_none")]
    txn_data2: Option<&'a str>,
    #[serde(rename = "TxnData3", skip_serializing_if = "Option::is_none")]
    txn_data3: Option<&'a str>,
    #[serde(rename = "EmailAddress", skip_serializing_if = "Option::is_none")]
    email_address: Option<&'a str>,
    #[serde(rename = "EnableAddBillCard", skip_serializing_if = "Option::is_none")]
    enable_add_bill_card: Option<u8>,
    #[serde(rename = "TxnId")]
    txn_id: &'a str,
    #[serde(rename = "UrlSuccess")]
    url_success: &'a str,
    #[serde(rename = "UrlFail")]
    url_fail: &'a str,
}

impl<'a> GenerateEnvelope<'a> {
    fn new(request: &'a GenerateRequest, credentials: &'a Credentials) -> Self {
        Self {
            user_id: &credentials.user_id,
            key: &credentials.key,
            txn_type: request.txn_type,
            amount_input: &request.amount_input,
            currency_input: &request.currency_input,
            merchant_reference: request.merchant_reference.as_deref(),
            txn_data1: request.txn_data1.as_deref(),
            txn_data2: request.txn_data2.as_deref(),
            txn_data3: request.txn_data3.as_deref(),
            email_address: request.email_address.as_deref(),
            enable_add_bill_card: request.enable_add_bill_card.map(u8::from),
            txn_id: request.txn_id.as_str(),
            url_success: &request.url_success,
            url_fail: &request.url_fail,
        }
    }
}

#[derive(Serialize)]
struct LookupEnvelope<'a> {
    #[serde(rename = "PxPayUserId")]
    user_id: &'a str,
    #[serde(rename = "PxPayKey")]
    key: &'a str,
    #[serde(rename = "Response")]
    response: &'a str,
}

impl<'a> LookupEnvelope<'a> {
    fn new(request: &'a LookupRequest, credentials: &'a Credentials) -> Self {
        Self {
            user_id: &credentials.user_id,
            key: &credentials.key,
            response: &request.response,
        }
    }
}

/// Serializes a request into the PxPay XML body, credentials included.
///
/// The returned string contains the shared key and must not be logged.
pub fn encode(request: &GatewayRequest, credentials: &Credentials) -> Result<String> {
    let xml = match request {
        GatewayRequest::Generate(generate) => quick_xml::se::to_string_with_root(
            "GenerateRequest",
            &GenerateEnvelope::new(generate, credentials),
        )?,
        GatewayRequest::Lookup(lookup) => quick_xml::se::to_string_with_root(
            "ProcessResponse",
            &LookupEnvelope::new(lookup, credentials),
        )?,
    };
    Ok(xml)
}
