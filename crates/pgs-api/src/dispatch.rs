// Single-flight request dispatcher
//
// Wraps `reqwest::Client` with the backend's conventions: every request
// carries a JSON content type, every response body is parsed as JSON no
// matter the HTTP status, and transport failures come back as a
// localized message instead of an error. Only one request may be in
// flight per dispatcher (and its clones); a concurrent call is dropped.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Message shown to the user for any transport-level failure.
pub const CONNECTION_ERROR_MESSAGE: &str = "Erro de conexão. Tente novamente.";

// ── Endpoint ─────────────────────────────────────────────────────────

/// A backend path plus query parameters, relative to the dispatcher's
/// base URL.
///
/// Segments are percent-encoded individually when resolved, so values
/// such as a matrícula containing `/` stay inside their own segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
        }
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Join this endpoint onto `base`, keeping any path prefix `base` has.
    pub fn resolve(&self, base: &Url) -> Result<Url, Error> {
        let mut url = base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| Error::CannotBeABase(base.to_string()))?;
            path.pop_if_empty();
            path.extend(&self.segments);
        }
        url.set_query(None);
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

/// Log form only. Segments and query values are printed raw; the URL
/// actually sent is the one [`Endpoint::resolve`] builds.
impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

// ── RequestOptions ───────────────────────────────────────────────────

/// Method, body and header overrides for a single dispatch.
///
/// Defaults to a bodyless GET.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::with_method(Method::POST)
    }

    pub fn put() -> Self {
        Self::with_method(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::with_method(Method::DELETE)
    }

    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: &impl Serialize) -> Result<Self, Error> {
        self.body = Some(serde_json::to_value(body).map_err(Error::Encode)?);
        Ok(self)
    }

    /// Add or override a request header. Overrides win over the default
    /// `Content-Type: application/json`.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

// ── Dispatch result ──────────────────────────────────────────────────

/// What a dispatch produced: the parsed body with its status, or a
/// localized transport error.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Completed { data: Value, status: StatusCode },
    Failed { error: String },
}

/// A dispatch result with both error channels resolved in order:
/// transport first, then the business-level `error` field.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The server could not be reached or answered with something
    /// other than JSON.
    Unreachable(String),
    /// The server answered with an `error` field.
    Rejected(String),
    /// The server answered with a payload.
    Accepted(Value),
}

impl Dispatch {
    pub(crate) fn connection_error() -> Self {
        Self::Failed {
            error: CONNECTION_ERROR_MESSAGE.into(),
        }
    }

    /// The transport-level error, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error } => Some(error),
            Self::Completed { .. } => None,
        }
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Completed { data, .. } => Some(data),
            Self::Failed { .. } => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Completed { status, .. } => Some(*status),
            Self::Failed { .. } => None,
        }
    }

    /// Resolve the two error channels. Never inspects the HTTP status.
    pub fn outcome(self) -> Outcome {
        match self {
            Self::Failed { error } => Outcome::Unreachable(error),
            Self::Completed { data, .. } => match business_error(&data) {
                Some(message) => Outcome::Rejected(message),
                None => Outcome::Accepted(data),
            },
        }
    }
}

fn business_error(data: &Value) -> Option<String> {
    match data.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ── Dispatcher ───────────────────────────────────────────────────────

/// Single-flight HTTP dispatcher for the backend.
///
/// Cheaply cloneable; clones share the in-flight flag, so a second
/// dispatch from any clone while one is outstanding returns `None`.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    http: reqwest::Client,
    base_url: Url,
    in_flight: Arc<AtomicBool>,
}

impl Dispatcher {
    /// Create a dispatcher from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a dispatcher around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether a dispatch is currently outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Send a request unless another one is already in flight.
    ///
    /// Returns `None` when dropped by the single-flight guard. Never
    /// returns an error: transport failures become `Dispatch::Failed`.
    pub async fn dispatch(&self, endpoint: &Endpoint, options: RequestOptions) -> Option<Dispatch> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!(%endpoint, "request already in flight, dropping");
            return None;
        };

        match self.send(endpoint, options).await {
            Ok((data, status)) => Some(Dispatch::Completed { data, status }),
            Err(e) => {
                error!(error = %e, %endpoint, "request failed");
                Some(Dispatch::connection_error())
            }
        }
    }

    async fn send(
        &self,
        endpoint: &Endpoint,
        options: RequestOptions,
    ) -> Result<(Value, StatusCode), Error> {
        let url = endpoint.resolve(&self.base_url)?;
        debug!(method = %options.method, %url, "dispatching request");

        let mut builder = self
            .http
            .request(options.method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !options.headers.is_empty() {
            builder = builder.headers(options.headers);
        }
        if let Some(body) = &options.body {
            builder = builder.body(serde_json::to_vec(body).map_err(Error::Encode)?);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        trace!(%status, len = body.len(), "response received");

        let data = serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (HTTP {status})"),
            body: body.chars().take(200).collect(),
        })?;
        Ok((data, status))
    }
}

/// Holds the in-flight flag; releases it on drop so a failed or
/// cancelled request never leaves the dispatcher blocked.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
