//! Response wrapper
//!
//! `HttpResponse` owns the final response of a call. The body is read lazily
//! and at most once from the wire; reads are bounded by the same deadline and
//! cancellation token as the request that produced it.

use std::path::Path;

use bytes::Bytes;
use http::header::{CONTENT_ENCODING, CONTENT_LENGTH};
use http::{HeaderMap, StatusCode, Version};
use http_body_util::BodyExt;
use hyper::body::Incoming;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use url::Url;

use super::compression;
use crate::client::CallGuard;
use crate::error::{self, Result};

pub struct HttpResponse {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    url: Url,
    body: Option<Incoming>,
    decode_gzip: bool,
    guard: CallGuard,
    buffer: Option<Bytes>,
    closed: bool,
}

impl HttpResponse {
    /// Wrap a response. When gzip was requested by the transport and the
    /// server used it, the body is decoded on read and the encoding headers
    /// are removed.
    pub(crate) fn new(
        response: http::Response<Incoming>,
        url: Url,
        gzip_requested: bool,
        guard: CallGuard,
    ) -> Self {
        let (parts, body) = response.into_parts();
        let mut headers = parts.headers;
        let decode_gzip = gzip_requested && compression::is_gzip(&headers);
        if decode_gzip {
            headers.remove(CONTENT_ENCODING);
            headers.remove(CONTENT_LENGTH);
        }

        Self {
            status: parts.status,
            version: parts.version,
            headers,
            url,
            body: Some(body),
            decode_gzip,
            guard,
            buffer: None,
            closed: false,
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// True for 2xx statuses.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of `name`, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// URL of the request that produced this response, after redirects.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    /// The whole body. Read from the wire on first use, then served from the
    /// internal buffer until [`HttpResponse::clear_buffer`].
    pub async fn bytes(&mut self) -> Result<Bytes> {
        if let Some(buffer) = &self.buffer {
            return Ok(buffer.clone());
        }
        if self.closed {
            return Err(error::body("response body is closed").with_url(self.url.clone()));
        }
        let Some(body) = self.body.take() else {
            return Ok(Bytes::new());
        };

        let raw = self
            .guard
            .run(body.collect())
            .await
            .map_err(|e| e.with_url(self.url.clone()))?
            .map_err(|e| error::body(e).with_url(self.url.clone()))?
            .to_bytes();

        let bytes = if self.decode_gzip {
            Bytes::from(compression::decompress_gzip(&raw).map_err(|e| e.with_url(self.url.clone()))?)
        } else {
            raw
        };
        self.buffer = Some(bytes.clone());
        Ok(bytes)
    }

    /// The body as text. Invalid UTF-8 is replaced.
    pub async fn text(&mut self) -> Result<String> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub async fn json<T: DeserializeOwned>(&mut self) -> Result<T> {
        let bytes = self.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| error::decode(e).with_url(self.url.clone()))
    }

    /// Write the body to `path`, creating or truncating it. Returns the number
    /// of bytes written. Plain bodies are streamed frame by frame.
    pub async fn download_to_file(&mut self, path: impl AsRef<Path>) -> Result<u64> {
        let path = path.as_ref();
        if self.closed {
            return Err(error::body("response body is closed").with_url(self.url.clone()));
        }
        if self.body.is_none() && self.buffer.is_none() {
            return Err(error::body("response body was already consumed").with_url(self.url.clone()));
        }
        let mut file = tokio::fs::File::create(path).await.map_err(error::body)?;

        if self.buffer.is_some() || self.decode_gzip {
            let bytes = self.bytes().await?;
            file.write_all(&bytes).await.map_err(error::body)?;
            file.flush().await.map_err(error::body)?;
            return Ok(bytes.len() as u64);
        }

        let Some(mut body) = self.body.take() else {
            return Err(error::body("response body was already consumed").or_url(&self.url));
        };
        let url = self.url.clone();
        let written = self
            .guard
            .run(async move {
                let mut written = 0_u64;
                while let Some(frame) = body.frame().await {
                    let frame = frame.map_err(error::body)?;
                    if let Ok(chunk) = frame.into_data() {
                        file.write_all(&chunk).await.map_err(error::body)?;
                        written += chunk.len() as u64;
                    }
                }
                file.flush().await.map_err(error::body)?;
                Ok::<_, error::Error>(written)
            })
            .await
            .and_then(|r| r)
            .map_err(|e| e.or_url(&url))?;

        tracing::debug!(path = %path.display(), bytes = written, "response body saved");
        Ok(written)
    }

    /// Drop the buffered body. The wire body is not re-read; later reads
    /// return an empty body.
    pub fn clear_buffer(&mut self) {
        self.buffer = None;
    }

    /// Release the body stream and buffer. Idempotent.
    pub fn close(&mut self) {
        self.body = None;
        self.buffer = None;
        self.closed = true;
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("url", &self.url.as_str())
            .field("status", &self.status)
            .field("version", &self.version)
            .field("headers", &self.headers)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
