use artemis_core::{Context, Result};
use artemis_http_send_reqwest::ReqwestHttpSend;
use bytes::Bytes;
use std::time::Duration;

/// Sends an unsigned request through a custom reqwest client.
///
/// Artemis platforms are frequently deployed with self-signed certificates,
/// which is what the TLS override below is for.
#[tokio::main]
async fn main() -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .danger_accept_invalid_certs(true)
        .build()
        .map_err(|e| artemis_core::Error::config_invalid("invalid reqwest client").with_source(e))?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

    let endpoint = std::env::var("ARTEMIS_ENDPOINT").unwrap_or_else(|_| "https://127.0.0.1".into());
    let req = http::Request::get(format!("{endpoint}/artemis/api/video/v1/preview"))
        .body(Bytes::new())?;

    let resp = ctx.http_send_as_string(req).await?;
    println!("status: {}", resp.status());
    println!("body: {}", resp.body());
    Ok(())
}
