//! Forwarding to delegated upstream services.
//!
//! # Responsibilities
//! - Rewrite the request URI to the upstream authority (path and query kept)
//! - Propagate X-Request-ID and X-Forwarded-* headers
//! - Stream the upstream response back to the client

use axum::{
    body::Body,
    http::{
        uri::{Authority, PathAndQuery, Scheme},
        HeaderValue, Request, Uri,
    },
    response::Response,
};
use http_body_util::LengthLimitError;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use std::error::Error as StdError;
use std::net::SocketAddr;
use std::time::Duration;

use crate::http::request::X_REQUEST_ID;
use crate::http::response::SiteError;
use crate::security::headers::{add_forwarded_headers, strip_hop_by_hop};

pub type UpstreamClient = Client<HttpConnector, Body>;

/// Build the shared upstream client.
pub fn build_client(connect_timeout: Duration) -> UpstreamClient {
    let mut connector = HttpConnector::new();
    connector.set_connect_timeout(Some(connect_timeout));
    connector.set_nodelay(true);

    Client::builder(hyper_util::rt::TokioExecutor::new()).build(connector)
}

/// Per-request forwarding context.
#[derive(Debug, Clone, Copy)]
pub struct Forward<'a> {
    pub upstream: &'a str,
    pub request_id: &'a str,
    pub client: Option<SocketAddr>,
    pub timeout: Duration,
}

/// Send `request` to the upstream and return its response.
pub async fn forward(
    client: &UpstreamClient,
    ctx: Forward<'_>,
    request: Request<Body>,
) -> Result<Response, SiteError> {
    let (mut parts, body) = request.into_parts();

    let authority = Authority::try_from(ctx.upstream)
        .map_err(|e| SiteError::BadGateway(format!("invalid upstream {}: {}", ctx.upstream, e)))?;
    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(authority);
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    parts.uri = Uri::from_parts(uri_parts).map_err(|e| SiteError::BadGateway(e.to_string()))?;

    strip_hop_by_hop(&mut parts.headers);
    add_forwarded_headers(&mut parts.headers, ctx.client.map(|addr| addr.ip()));
    if let Ok(value) = HeaderValue::from_str(ctx.request_id) {
        parts.headers.insert(X_REQUEST_ID, value);
    }

    let upstream_request = Request::from_parts(parts, body);
    let sent = tokio::time::timeout(ctx.timeout, client.request(upstream_request)).await;
    let response = match sent {
        Ok(Ok(response)) => response,
        Ok(Err(e)) if exceeded_body_limit(&e) => {
            tracing::warn!(
                request_id = %ctx.request_id,
                upstream = %ctx.upstream,
                "Request body over limit while forwarding"
            );
            return Err(SiteError::PayloadTooLarge);
        }
        Ok(Err(e)) => {
            tracing::error!(
                request_id = %ctx.request_id,
                upstream = %ctx.upstream,
                error = %e,
                "Upstream error"
            );
            return Err(SiteError::BadGateway(ctx.upstream.to_string()));
        }
        Err(_) => {
            tracing::warn!(
                request_id = %ctx.request_id,
                upstream = %ctx.upstream,
                timeout = ?ctx.timeout,
                "Upstream timed out"
            );
            return Err(SiteError::GatewayTimeout(ctx.timeout.as_secs()));
        }
    };

    let (mut parts, body) = response.into_parts();
    strip_hop_by_hop(&mut parts.headers);
    Ok(Response::from_parts(parts, Body::new(body)))
}

/// Whether a send failure was caused by the request body limit.
///
/// Bodies without a Content-Length are only cut off once streaming has begun,
/// so the limit error surfaces nested inside the client error.
fn exceeded_body_limit(err: &(dyn StdError + 'static)) -> bool {
    std::iter::successors(Some(err), |e| (*e).source()).any(|e| e.is::<LengthLimitError>())
}
