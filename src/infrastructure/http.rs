use crate::config::{Credentials, GatewayConfig};
use crate::domain::ports::{Exchange, GatewayTransport};
use crate::error::{PxPayError, Result};
use crate::interfaces::xml;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::warn;

/// Posts PxPay XML envelopes to the gateway over HTTPS.
///
/// One POST per exchange, no retries. Anything that stops the call from
/// producing a body comes back as `Ok(None)`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: reqwest::Url,
    credentials: Credentials,
}

impl HttpTransport {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        if config.user_id.is_empty() || config.key.is_empty() {
            return Err(PxPayError::Config(
                "PxPay user id and key are required".to_string(),
            ));
        }
        let url = reqwest::Url::parse(&config.url)
            .map_err(|e| PxPayError::Config(format!("invalid gateway url {}: {e}", config.url)))?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| PxPayError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url,
            credentials: config.credentials(),
        })
    }
}

#[async_trait]
impl GatewayTransport for HttpTransport {
    async fn send(&self, exchange: Exchange<'_>) -> Result<Option<String>> {
        let body = match xml::encode(exchange.request, &self.credentials) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "failed to encode PxPay request");
                return Ok(None);
            }
        };

        let response = match self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/xml")
            .body(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %self.url, error = %e, "PxPay gateway unreachable");
                return Ok(None);
            }
        };

        let status = response.status();
        match response.text().await {
            Ok(text) if text.trim().is_empty() => {
                warn!(%status, "PxPay gateway returned an empty body");
                Ok(None)
            }
            Ok(text) => Ok(Some(text)),
            Err(e) => {
                warn!(%status, error = %e, "failed to read PxPay response body");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::{GatewayRequest, LookupRequest};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn config(url: String) -> GatewayConfig {
        GatewayConfig {
            url,
            user_id: "ShopUser".to_string(),
            key: "s3cr3t".to_string(),
            timeout_secs: Some(5),
            ..GatewayConfig::default()
        }
    }

    /// Accepts one connection, captures the request, answers with `reply`.
    async fn serve_once(listener: TcpListener, reply: &'static str) -> String {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&raw);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if raw.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            reply.len(),
            reply
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&raw).into_owned()
    }

    #[test]
    fn test_requires_credentials() {
        let mut missing_key = config("https://sec.paymentexpress.com/pxaccess/pxpay.aspx".into());
        missing_key.key.clear();
        assert!(matches!(
            HttpTransport::new(&missing_key),
            Err(PxPayError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_url() {
        assert!(matches!(
            HttpTransport::new(&config("not a url".into())),
            Err(PxPayError::Config(_))
        ));
    }

    #[test]
    fn test_debug_hides_key() {
        let transport = HttpTransport::new(&config("https://gateway.example/pxpay".into())).unwrap();
        assert!(!format!("{:?}", transport).contains("s3cr3t"));
    }

    #[tokio::test]
    async fn test_posts_envelope_and_returns_body() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(serve_once(
            listener,
            r#"<Response valid="1"><Success>1</Success></Response>"#,
        ));

        let transport = HttpTransport::new(&config(format!("http://{addr}/pxaccess/pxpay.aspx"))).unwrap();
        let request = GatewayRequest::Lookup(LookupRequest::new("result-token"));
        let body = transport
            .send(Exchange {
                request: &request,
                mock_scenario: None,
            })
            .await
            .unwrap();

        assert_eq!(
            body.as_deref(),
            Some(r#"<Response valid="1"><Success>1</Success></Response>"#)
        );

        let captured = server.await.unwrap();
        assert!(captured.starts_with("POST /pxaccess/pxpay.aspx"));
        assert!(captured.to_ascii_lowercase().contains("content-type: application/xml"));
        assert!(captured.contains("<Response>result-token</Response>"));
        assert!(captured.contains("<PxPayUserId>ShopUser</PxPayUserId>"));
    }

    #[tokio::test]
    async fn test_unreachable_gateway_yields_no_body() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new(&config(format!("http://{addr}/"))).unwrap();
        let request = GatewayRequest::Lookup(LookupRequest::new("result-token"));
        let body = transport
            .send(Exchange {
                request: &request,
                mock_scenario: None,
            })
            .await
            .unwrap();

        assert!(body.is_none());
    }
}
