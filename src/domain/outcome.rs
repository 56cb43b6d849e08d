use serde::Serialize;

/// What the checkout flow should do after a gateway round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PaymentOutcome {
    /// Send the shopper's browser to the gateway-hosted page.
    Redirect { uri: String },
    Success,
    /// The gateway declined, optionally with text meant for the card holder.
    Failure { detail: Option<String> },
    /// The gateway could not be reached or its reply could not be interpreted.
    Incomplete,
}

impl PaymentOutcome {
    pub fn failure(detail: Option<&str>) -> Self {
        Self::Failure {
            detail: detail.filter(|d| !d.is_empty()).map(str::to_string),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_failure_detail_is_dropped() {
        assert_eq!(
            PaymentOutcome::failure(Some("")),
            PaymentOutcome::Failure { detail: None }
        );
    }

    #[test]
    fn test_outcome_json_shape() {
        let redirect = PaymentOutcome::Redirect {
            uri: "https://pay.example/?a=1&b=2".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&redirect).unwrap(),
            r#"{"status":"redirect","uri":"https://pay.example/?a=1&b=2"}"#
        );
        assert_eq!(
            serde_json::to_string(&PaymentOutcome::Incomplete).unwrap(),
            r#"{"status":"incomplete"}"#
        );
        assert_eq!(
            serde_json::to_string(&PaymentOutcome::failure(Some("Card declined"))).unwrap(),
            r#"{"status":"failure","detail":"Card declined"}"#
        );
    }
}
