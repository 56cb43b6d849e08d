use crate::config::GatewayConfig;
use crate::domain::ports::{Exchange, GatewayTransport};
use crate::domain::request::GatewayRequest;
use crate::error::{PxPayError, Result};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockScenario {
    /// The gateway could not be reached; no body comes back.
    Incomplete,
    Failure,
    Success,
}

impl MockScenario {
    /// Unrecognised labels fall back to `Success`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "incomplete" => Self::Incomplete,
            "failure" => Self::Failure,
            _ => Self::Success,
        }
    }
}

/// Stands in for the HTTP transport with canned gateway replies.
///
/// The reply is chosen by the scenario label carried on the exchange; a call
/// without one is a configuration error.
#[derive(Debug, Clone)]
pub struct MockTransport {
    url: String,
    user_id: String,
}

impl MockTransport {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            url: config.url.clone(),
            user_id: config.user_id.clone(),
        }
    }

    fn generate_reply(&self, scenario: MockScenario) -> Option<String> {
        match scenario {
            MockScenario::Incomplete => None,
            MockScenario::Failure => Some(
                r#"
                <Request valid="0">
                    <URI></URI>
                </Request>"#
                    .to_string(),
            ),
            MockScenario::Success => Some(format!(
                r#"
                <Request valid="1">
                    <URI>{}?userid={}&amp;request=v52CRsqBR5-mock</URI>
                </Request>"#,
                self.url, self.user_id
            )),
        }
    }
}

fn lookup_reply(scenario: MockScenario) -> Option<String> {
    let success = match scenario {
        MockScenario::Incomplete => return None,
        MockScenario::Failure => 0,
        MockScenario::Success => 1,
    };
    Some(format!(
        r#"
        <Response valid="1">
            <Success>{success}</Success>
            <TxnType>Purchase</TxnType>
            <CurrencyInput>NZD</CurrencyInput>
            <MerchantReference></MerchantReference>
            <TxnData1></TxnData1>
            <TxnData2></TxnData2>
            <TxnData3></TxnData3>
            <AuthCode>150715</AuthCode>
            <CardName>Visa</CardName>
            <CardHolderName>Joe Bloggs</CardHolderName>
            <CardNumber>411111........11</CardNumber>
            <DateExpiry>1213</DateExpiry>
            <ClientInfo>123.255.12.345</ClientInfo>
            <TxnId>ID5192f4a180c796-mock</TxnId>
            <EmailAddress></EmailAddress>
            <DpsTxnRef>0000000106502ae12-mock</DpsTxnRef>
            <BillingId></BillingId>
            <DpsBillingId></DpsBillingId>
            <AmountSettlement>50.00</AmountSettlement>
            <CurrencySettlement>NZD</CurrencySettlement>
            <DateSettlement>20130515</DateSettlement>
            <TxnMac></TxnMac>
            <ResponseText>APPROVED</ResponseText>
            <CardNumber2></CardNumber2>
            <IssuerCountryId>0</IssuerCountryId>
            <Cvc2ResultCode>NotUsed</Cvc2ResultCode>
            <ReCo>00</ReCo>
        </Response>"#
    ))
}

#[async_trait]
impl GatewayTransport for MockTransport {
    async fn send(&self, exchange: Exchange<'_>) -> Result<Option<String>> {
        // Empty and "0" labels count as not supplied.
        let label = exchange
            .mock_scenario
            .filter(|label| !label.is_empty() && *label != "0")
            .ok_or(PxPayError::MockScenarioMissing)?;
        let scenario = MockScenario::from_label(label);

        Ok(match exchange.request {
            GatewayRequest::Generate(_) => self.generate_reply(scenario),
            GatewayRequest::Lookup(_) => lookup_reply(scenario),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::LookupRequest;
    use crate::interfaces::xml::GatewayMessage;

    fn transport() -> MockTransport {
        let config = GatewayConfig {
            user_id: "ShopUser".to_string(),
            ..GatewayConfig::default()
        };
        MockTransport::new(&config)
    }

    #[tokio::test]
    async fn test_missing_label_is_an_error() {
        let request = GatewayRequest::Lookup(LookupRequest::new("token"));
        let result = transport()
            .send(Exchange {
                request: &request,
                mock_scenario: None,
            })
            .await;

        assert!(matches!(result, Err(PxPayError::MockScenarioMissing)));
    }

    #[tokio::test]
    async fn test_blank_label_is_an_error() {
        let request = GatewayRequest::Lookup(LookupRequest::new("token"));
        for label in ["", "0"] {
            let result = transport()
                .send(Exchange {
                    request: &request,
                    mock_scenario: Some(label),
                })
                .await;

            assert!(
                matches!(result, Err(PxPayError::MockScenarioMissing)),
                "label: {label:?}"
            );
        }
    }

    async fn lookup(label: &str) -> Option<String> {
        let request = GatewayRequest::Lookup(LookupRequest::new("token"));
        transport()
            .send(Exchange {
                request: &request,
                mock_scenario: Some(label),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_lookup_fixtures() {
        assert_eq!(lookup("incomplete").await, None);

        let declined = GatewayMessage::parse(lookup("failure").await.as_deref());
        assert_eq!(declined.element_text("Success"), Some("0"));
        assert_eq!(declined.element_text("CardHolderHelpText"), None);

        let approved = GatewayMessage::parse(lookup("success").await.as_deref());
        assert_eq!(approved.element_text("Success"), Some("1"));
        assert_eq!(approved.element_text("DpsTxnRef"), Some("0000000106502ae12-mock"));
        assert_eq!(approved.element_text("CardNumber"), Some("411111........11"));
    }

    #[test]
    fn test_unknown_label_defaults_to_success() {
        assert_eq!(MockScenario::from_label("banana"), MockScenario::Success);
        assert_eq!(MockScenario::from_label("failure"), MockScenario::Failure);
    }
}
