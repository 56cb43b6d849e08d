use crate::domain::outcome::PaymentOutcome;
use crate::domain::ports::{
    BillingEntityStoreBox, Exchange, GatewayTransportBox, PaymentStoreBox,
};
use crate::domain::request::{
    CallbackUrls, GatewayRequest, GenerateRequest, LookupRequest, PaymentFields,
};
use crate::error::{PxPayError, Result};
use crate::interfaces::xml::GatewayMessage;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use tracing::{Span, debug, info, warn};

/// Query parameters on the gateway's redirect back to the shop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub url: Option<String>,
    /// Opaque token identifying the completed hosted-page session.
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub userid: Option<String>,
    /// Scenario label read by the mock transport.
    #[serde(default)]
    pub mock: Option<String>,
}

impl CallbackParams {
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            ..Self::default()
        }
    }
}

/// Drives the two PxPay round-trips: initiate (`process`) and verify (`check`).
///
/// Holds no per-call state. Log events are parented to the span handed in
/// with [`PxPayGateway::with_span`].
pub struct PxPayGateway {
    transport: GatewayTransportBox,
    payments: PaymentStoreBox,
    billing_entities: BillingEntityStoreBox,
    urls: CallbackUrls,
    span: Span,
}

impl PxPayGateway {
    pub fn new(
        transport: GatewayTransportBox,
        payments: PaymentStoreBox,
        billing_entities: BillingEntityStoreBox,
        urls: CallbackUrls,
    ) -> Self {
        Self {
            transport,
            payments,
            billing_entities,
            urls,
            span: Span::none(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Requests a hosted payment page for `fields`.
    ///
    /// Returns `Redirect` with the page URI when the gateway accepts the
    /// request. Nothing is persisted.
    pub async fn process(&self, fields: &PaymentFields) -> Result<PaymentOutcome> {
        let generate = GenerateRequest::build(fields, &self.urls);
        debug!(parent: &self.span, txn_id = %generate.txn_id, amount = %generate.amount_input,
            currency = %generate.currency_input, "requesting PxPay payment page");
        let request = GatewayRequest::Generate(generate);

        let body = self
            .transport
            .send(Exchange {
                request: &request,
                mock_scenario: fields.mock.as_deref(),
            })
            .await?;
        let message = GatewayMessage::parse(body.as_deref());

        let valid = numeric(message.root_attribute("valid"));
        let uri = message.element_text("URI").unwrap_or_default();

        let outcome = match valid {
            Some(v) if v == Decimal::ONE => PaymentOutcome::Redirect {
                uri: uri.to_string(),
            },
            Some(v) if v.is_zero() => PaymentOutcome::Failure { detail: None },
            _ => PaymentOutcome::Incomplete,
        };
        info!(parent: &self.span, outcome = ?outcome, "PxPay process finished");
        Ok(outcome)
    }

    /// Verifies a completed hosted-page session for payment `payment_id`.
    ///
    /// Always records the gateway transaction reference on the payment, and
    /// updates the payer's billing id when the reply carries one.
    pub async fn check(&self, payment_id: u64, params: &CallbackParams) -> Result<PaymentOutcome> {
        let request = GatewayRequest::Lookup(LookupRequest::new(params.result.clone()));
        let body = self
            .transport
            .send(Exchange {
                request: &request,
                mock_scenario: params.mock.as_deref(),
            })
            .await?;
        debug!(parent: &self.span, payment_id, response = body.as_deref().unwrap_or_default(),
            "PxPay check response");

        let message = GatewayMessage::parse(body.as_deref());
        let success = numeric(message.element_text("Success"));
        // Billing ids are kept on any set, non-zero indicator, numeric or not.
        let keep_billing_id = truthy(message.element_text("Success"));
        let dps_txn_ref = non_empty(message.element_text("DpsTxnRef"));
        let dps_billing_id = message
            .element_text("DpsBillingId")
            .filter(|id| truthy(Some(*id)));

        let mut payment = self
            .payments
            .get(payment_id)
            .await?
            .ok_or(PxPayError::PaymentNotFound(payment_id))?;

        // Only present for transactions that can be billed again later.
        if let Some(billing_id) = dps_billing_id {
            match payment.paid_by {
                Some(entity_id) => match self.billing_entities.get(entity_id).await? {
                    Some(mut entity) => {
                        // A failed check clears the token so nothing bills against it.
                        entity.billing_id = keep_billing_id.then(|| billing_id.to_string());
                        self.billing_entities.store(entity).await?;
                    }
                    None => warn!(parent: &self.span, payment_id, entity_id,
                        "billing entity not found, billing id not stored"),
                },
                None => warn!(parent: &self.span, payment_id,
                    "payment has no billing entity, billing id not stored"),
            }
        }

        payment.dps_reference = dps_txn_ref.map(str::to_string);
        self.payments.store(payment).await?;

        let outcome = match success {
            Some(s) if s > Decimal::ZERO => PaymentOutcome::Success,
            Some(s) if s.is_zero() => {
                PaymentOutcome::failure(message.element_text("CardHolderHelpText"))
            }
            _ => PaymentOutcome::Incomplete,
        };
        info!(parent: &self.span, payment_id, dps_txn_ref, outcome = ?outcome, "PxPay check finished");
        Ok(outcome)
    }
}

/// Reads a gateway status indicator; `None` unless it is a number.
fn numeric(raw: Option<&str>) -> Option<Decimal> {
    let raw = raw?.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Set and neither empty nor `"0"`.
fn truthy(raw: Option<&str>) -> bool {
    raw.is_some_and(|s| !s.is_empty() && s != "0")
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.is_empty())
}
