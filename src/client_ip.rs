use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};

/// Submitter identity for ratings and personalized filtering. The first
/// `X-Forwarded-For` entry wins; otherwise the peer address of the
/// connection. `None` when neither yields a parseable address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub Option<IpAddr>);

impl ClientIp {
    /// Canonical string form used as the rating key.
    pub fn key(&self) -> Option<String> {
        self.0.map(|ip| ip.to_string())
    }
}

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .and_then(|first| first.trim().parse::<IpAddr>().ok());

        let ip = forwarded.or_else(|| {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip())
        });

        Ok(Self(ip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> ClientIp {
        let (mut parts, ()) = request.into_parts();
        ClientIp::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn forwarded_header_takes_precedence() {
        let mut request = Request::builder()
            .uri("/")
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo::<SocketAddr>("10.0.0.1:5000".parse().unwrap()));

        let ip = extract(request).await;
        assert_eq!(ip.key().as_deref(), Some("203.0.113.7"));
    }

    #[tokio::test]
    async fn falls_back_to_peer_address() {
        let mut request = Request::builder().uri("/").body(()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo::<SocketAddr>("192.0.2.4:41000".parse().unwrap()));

        let ip = extract(request).await;
        assert_eq!(ip.key().as_deref(), Some("192.0.2.4"));
    }

    #[tokio::test]
    async fn garbage_header_is_ignored() {
        let mut request = Request::builder()
            .uri("/")
            .header("x-forwarded-for", "not-an-address")
            .body(())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo::<SocketAddr>("192.0.2.4:41000".parse().unwrap()));

        let ip = extract(request).await;
        assert_eq!(ip.key().as_deref(), Some("192.0.2.4"));
    }

    #[tokio::test]
    async fn nothing_available_yields_none() {
        let request = Request::builder().uri("/").body(()).unwrap();
        let ip = extract(request).await;
        assert_eq!(ip, ClientIp(None));
    }

    #[tokio::test]
    async fn ipv6_forwarded_entry_parses() {
        let request = Request::builder()
            .uri("/")
            .header("x-forwarded-for", "2001:db8::1")
            .body(())
            .unwrap();

        let ip = extract(request).await;
        assert_eq!(ip.key().as_deref(), Some("2001:db8::1"));
    }
}
