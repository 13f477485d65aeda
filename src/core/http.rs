use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING};
use reqwest::Client;
use tracing::info;

use crate::core::error::{ActionError, ActionResult};

const APP_USER_AGENT: &str = concat!("fabric-ci-action/", env!("CARGO_PKG_VERSION"));

pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    Client::builder()
        .user_agent(APP_USER_AGENT)
        .default_headers(default_headers)
        .connect_timeout(Duration::from_secs(10))
        .timeout(timeout)
        .build()
}

/// GET `url` and return the body as text.
///
/// Any non-success status is reported as [`ActionError::RequestFailed`].
pub async fn get_text(client: &Client, url: &str) -> ActionResult<String> {
    info!("Requesting data via HTTPS GET from {}", url);

    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ActionError::RequestFailed {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(resp.text().await?)
}

/// Serve one canned raw HTTP response on a loopback port.
#[cfg(test)]
pub(crate) async fn serve_once(response: &'static str) -> std::net::SocketAddr {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = vec![0u8; 4096];
        let _ = socket.read(&mut request).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });
    addr
}
