//! Catalog service client
//!
//! `CatalogClient` is the seam between this crate and the remote service.
//! The shipped implementation is a blocking `reqwest` client intended to
//! run on worker threads (see `catalog::store`); tests and demos use the
//! in-memory mock instead.

use super::error::ApiError;
use super::types::{Creature, ErrorBody, QueryParams};
use std::time::Duration;
use tracing::debug;

/// Client-side view of the catalog service
///
/// Implementations must be shareable across worker threads, hence the
/// `Send + Sync` bound.
pub trait CatalogClient: Send + Sync {
    /// Fetch the unfiltered entry list
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the body cannot be
    /// decoded.
    fn list(&self) -> Result<Vec<Creature>, ApiError>;

    /// Fetch the entry list filtered by `params`
    ///
    /// An empty parameter set resets the server-side filter, making this
    /// equivalent to [`CatalogClient::list`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the body cannot be
    /// decoded.
    fn search(&self, params: &QueryParams) -> Result<Vec<Creature>, ApiError>;

    /// Submit an image for identification
    ///
    /// On success the service registers the identified creature and
    /// returns its record. Failures carry the service's `detail` message.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the upload fails, the service rejects the
    /// image, or the response cannot be decoded.
    fn identify(&self, png: Vec<u8>, file_name: &str) -> Result<Creature, ApiError>;
}

/// Blocking HTTP implementation of [`CatalogClient`]
pub struct HttpCatalogClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl HttpCatalogClient {
    /// Create a client for the service at `base_url`
    ///
    /// `base_url` is the API prefix, e.g. `http://localhost:8000/api/v1`.
    /// A trailing slash is tolerated.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// The configured service base URL (no trailing slash)
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turn a non-success response into `ApiError::Status`
    ///
    /// The service reports failures as `{"detail": "..."}`; when the body
    /// does not parse, the canonical status reason is used instead.
    fn status_error(response: reqwest::blocking::Response) -> ApiError {
        let status = response.status();
        let detail = response
            .json::<ErrorBody>()
            .map(|body| body.detail)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        ApiError::Status {
            status: status.as_u16(),
            detail,
        }
    }

    fn fetch_list(&self, url: String, params: &QueryParams) -> Result<Vec<Creature>, ApiError> {
        let mut request = self.http.get(&url);
        for (name, value) in params {
            request = request.query(&[(name, value)]);
        }

        debug!(%url, params = params.len(), "fetching entry list");

        let response = request.send()?;
        if !response.status().is_success() {
            return Err(Self::status_error(response));
        }

        response
            .json::<Vec<Creature>>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl CatalogClient for HttpCatalogClient {
    fn list(&self) -> Result<Vec<Creature>, ApiError> {
        self.fetch_list(format!("{}/creature/", self.base_url), &QueryParams::new())
    }

    fn search(&self, params: &QueryParams) -> Result<Vec<Creature>, ApiError> {
        self.fetch_list(format!("{}/creature/search", self.base_url), params)
    }

    fn identify(&self, png: Vec<u8>, file_name: &str) -> Result<Creature, ApiError> {
        let part = reqwest::blocking::multipart::Part::bytes(png)
            .file_name(file_name.to_string())
            .mime_str("image/png")
            .map_err(ApiError::Transport)?;
        let form = reqwest::blocking::multipart::Form::new().part("image", part);

        let url = format!("{}/creature/identify", self.base_url);
        debug!(%url, "submitting image for identification");

        let response = self.http.post(&url).multipart(form).send()?;
        if !response.status().is_success() {
            return Err(Self::status_error(response));
        }

        response
            .json::<Creature>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
