//! WebSocket [`Connector`] built on `tokio-tungstenite`.

use crate::connector::{Connector, Frame, Link};
use crate::error::TransportError;
use futures::future::{self, BoxFuture};
use futures::{FutureExt, SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::{HeaderValue, ORIGIN};
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use url::Url;

/// Dials `endpoint` with an `Origin` header on every attempt.
#[derive(Debug, Clone)]
pub struct WsConnector {
    endpoint: Url,
    origin: HeaderValue,
}

impl WsConnector {
    /// Validate the endpoint and origin up front so that configuration
    /// mistakes surface before any dial.
    pub fn new(endpoint: &str, origin: &str) -> Result<Self, TransportError> {
        let invalid = |reason: String| TransportError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason,
        };
        let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
        if !url.has_host() {
            return Err(invalid("missing host".to_string()));
        }
        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(invalid(format!("unsupported scheme {:?} (expected ws or wss)", url.scheme())));
        }
        let origin = HeaderValue::from_str(origin)
            .map_err(|_| TransportError::InvalidOrigin(origin.to_string()))?;
        Ok(Self { endpoint: url, origin })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Map one WebSocket message onto the frame feed. Control frames are
/// answered by tungstenite and never surface.
fn to_frame(message: Result<Message, WsError>) -> Option<Result<Frame, TransportError>> {
    match message {
        Ok(Message::Text(text)) => Some(Ok(text.into_bytes())),
        Ok(Message::Binary(data)) => Some(Ok(data)),
        Ok(Message::Close(_)) => Some(Err(TransportError::Closed)),
        Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => None,
        Err(err) => Some(Err(err.into())),
    }
}

impl Connector for WsConnector {
    fn connect(&self) -> BoxFuture<'static, Result<Link, TransportError>> {
        let endpoint = self.endpoint.clone();
        let origin = self.origin.clone();
        if endpoint.scheme() == "wss" {
            // Fails only when a provider is already installed.
            let _ = rustls::crypto::ring::default_provider().install_default();
        }
        async move {
            let mut request = endpoint.as_str().into_client_request()?;
            request.headers_mut().insert(ORIGIN, origin);
            let (ws_stream, _response) = connect_async(request).await?;
            tracing::info!(%endpoint, "stream: connected");

            let (ws_write, ws_read) = ws_stream.split();
            let frames = ws_read.filter_map(|msg| future::ready(to_frame(msg))).boxed();
            let pings = ws_write
                .sink_map_err(TransportError::from)
                .with(|()| future::ready(Ok::<_, TransportError>(Message::Ping(Vec::new()))));
            Ok(Link::new(frames).with_keepalive(Box::pin(pings)))
        }
        .boxed()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_tls_endpoints() {
        assert!(WsConnector::new("ws://127.0.0.1:12001", "http://localhost/").is_ok());
        let wss = WsConnector::new("wss://collector.example/stream", "http://localhost/").unwrap();
        assert_eq!(wss.endpoint().host_str(), Some("collector.example"));
    }

    #[test]
    fn rejects_endpoint_without_scheme_or_host() {
        for bad in ["127.0.0.1:12001", "not a url", "unix:/tmp/socket", ""] {
            let err = WsConnector::new(bad, "http://localhost/").unwrap_err();
            assert!(
                matches!(err, TransportError::InvalidEndpoint { .. }),
                "{bad:?} gave {err:?}"
            );
            assert!(err.is_config());
        }
    }

    #[tokio::test]
    async fn wss_dials_attempt_a_tls_handshake() {
        // A plain TCP peer that hangs up: the dial must fail in the handshake,
        // not because TLS is missing from the build.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let peer = tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.unwrap();
            drop(tcp);
        });

        let connector = WsConnector::new(&format!("wss://{addr}/"), "http://localhost/").unwrap();
        let err = connector.connect().await.err().expect("no TLS server behind the socket");
        assert!(!err.to_string().contains("not compiled"), "{err}");
        peer.await.unwrap();
    }

    #[test]
    fn rejects_non_websocket_schemes() {
        for bad in ["http://127.0.0.1:12001/", "https://collector.example/", "ftp://host/"] {
            match WsConnector::new(bad, "http://localhost/") {
                Err(TransportError::InvalidEndpoint { reason, .. }) => {
                    assert!(reason.contains("unsupported scheme"), "{bad:?}: {reason}");
                }
                other => panic!("{bad:?} gave {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_origin_with_control_characters() {
        let err = WsConnector::new("ws://127.0.0.1:1", "http://local\nhost/").unwrap_err();
        assert!(matches!(err, TransportError::InvalidOrigin(_)));
    }

    #[test]
    fn control_messages_are_not_frames() {
        assert!(to_frame(Ok(Message::Ping(vec![1]))).is_none());
        assert!(to_frame(Ok(Message::Pong(vec![]))).is_none());
        assert_eq!(to_frame(Ok(Message::Text("{}".into()))).unwrap().unwrap(), b"{}".to_vec());
        assert_eq!(to_frame(Ok(Message::Binary(vec![0, 1]))).unwrap().unwrap(), vec![0, 1]);
        assert!(matches!(to_frame(Ok(Message::Close(None))), Some(Err(TransportError::Closed))));
    }
}
