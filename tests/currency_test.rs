use pxpay::config::GatewayConfig;
use pxpay::domain::request::{CallbackUrls, GenerateRequest, PaymentFields};
use pxpay::error::PxPayError;
use rand::Rng;
use rust_decimal_macros::dec;

fn random_code(rng: &mut impl Rng) -> String {
    (0..3).map(|_| rng.gen_range(b'A'..=b'Z') as char).collect()
}

#[test]
fn test_builder_accepts_unsupported_currencies() {
    let config = GatewayConfig::default();
    let mut rng = rand::thread_rng();

    let mut checked = 0;
    while checked < 200 {
        let code = random_code(&mut rng);
        if config.supported_currencies().contains_key(&code) {
            continue;
        }

        let request = GenerateRequest::build(&PaymentFields::new(dec!(9.99), code.clone()), &CallbackUrls::default());
        assert_eq!(request.currency_input, code);
        assert!(matches!(
            config.ensure_supported_currency(&code),
            Err(PxPayError::UnsupportedCurrency(c)) if c == code
        ));
        checked += 1;
    }
}

#[test]
fn test_config_file_currency_table() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(
        file.path(),
        r#"
        url = "https://uat.paymentexpress.com/pxaccess/pxpay.aspx"

        [supported_currencies]
        NZD = "New Zealand Dollar"
        JPY = "Japanese Yen"
        "#,
    )
    .unwrap();

    let config = GatewayConfig::from_path(file.path()).unwrap();

    assert_eq!(config.url, "https://uat.paymentexpress.com/pxaccess/pxpay.aspx");
    assert!(config.ensure_supported_currency("JPY").is_ok());
    assert!(config.ensure_supported_currency("USD").is_err());
}
