//! Helpers shared by the unit tests.

use octocrab::Octocrab;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use url::Url;

/// Builds the API client after installing the process-wide TLS crypto provider.
pub(crate) fn client() -> Octocrab {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    crate::fetch::build_client().unwrap()
}

/// Serves one canned HTTP response on a local port.
///
/// Returns the base URL to point the client at and a receiver yielding the
/// raw request head that was received.
pub(crate) async fn serve_once(
    status: &'static str,
    body: &'static str,
) -> (Url, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let (sender, receiver) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buffer = [0u8; 1024];

        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let read = socket.read(&mut buffer).await.unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buffer[..read]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        let _ = sender.send(String::from_utf8_lossy(&request).into_owned());
    });

    (Url::parse(&format!("http://{address}")).unwrap(), receiver)
}
