//! Image links fetched from a remote place listing.
//!
//! [`HttpImageSource`] implements the synchronous
//! [`ImageSource`](placerank_core::ImageSource) trait by blocking on an
//! async HTTP request, so the corpus loader stays usable outside async
//! contexts. [`PlaceholderImages`] stands in when no listing is configured.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use placerank_core::ImageSource;
//! use placerank_data::{HttpImageSource, HttpImageSourceConfig};
//!
//! let config = HttpImageSourceConfig::new("https://listing.example/api/places")
//!     .with_timeout(Duration::from_secs(10));
//! let source = HttpImageSource::with_config(config)?;
//!
//! let images = source.images()?;
//! println!("{} places have images", images.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod listing;

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use log::{debug, info};
use placerank_core::{ImageSource, PlaceId, SourceError};
use reqwest::Client;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

pub use listing::{ListingEntry, ListingImage, ListingResponse, convert_listing};

const COLLABORATOR: &str = "image listing";

/// Default user agent for listing requests.
pub const DEFAULT_USER_AGENT: &str = "placerank-images/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error type for [`HttpImageSource`] construction failures.
#[derive(Debug)]
pub enum ImageSourceBuildError {
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl fmt::Display for ImageSourceBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ImageSourceBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Configuration for [`HttpImageSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpImageSourceConfig {
    /// Full URL of the listing endpoint, query string included.
    pub url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpImageSourceConfig {
    /// Create a configuration for the listing at `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// [`ImageSource`] backed by an HTTP place listing.
///
/// The source owns a current-thread Tokio runtime reused across calls.
/// Inside a multi-threaded runtime it borrows the caller's handle through
/// [`tokio::task::block_in_place`] instead.
pub struct HttpImageSource {
    client: Client,
    config: HttpImageSourceConfig,
    runtime: Runtime,
}

impl fmt::Debug for HttpImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpImageSource")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HttpImageSource {
    /// Create a source for the listing at `url` with default settings.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(url: impl Into<String>) -> Result<Self, ImageSourceBuildError> {
        Self::with_config(HttpImageSourceConfig::new(url))
    }

    /// Create a source with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpImageSourceConfig) -> Result<Self, ImageSourceBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ImageSourceBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ImageSourceBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// The configuration this source was built with.
    #[must_use]
    pub const fn config(&self) -> &HttpImageSourceConfig {
        &self.config
    }

    async fn fetch_listing(&self) -> Result<ListingResponse, SourceError> {
        let url = self.config.url.as_str();
        debug!("fetching image listing from {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err))?;

        response
            .json()
            .await
            .map_err(|err| SourceError::Malformed {
                collaborator: COLLABORATOR,
                message: err.to_string(),
            })
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error) -> SourceError {
        if error.is_timeout() {
            return SourceError::Timeout {
                url: self.config.url.clone(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return SourceError::HttpStatus {
                url: self.config.url.clone(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        SourceError::Unavailable {
            collaborator: COLLABORATOR,
            message: error.to_string(),
        }
    }
}

impl ImageSource for HttpImageSource {
    fn images(&self) -> Result<HashMap<PlaceId, String>, SourceError> {
        let future = self.fetch_listing();
        let listing = match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }?;
        let images = convert_listing(listing);
        info!("image listing supplied {} places", images.len());
        Ok(images)
    }
}

/// [`ImageSource`] that knows no images, so every place shows the
/// placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderImages;

impl ImageSource for PlaceholderImages {
    fn images(&self) -> Result<HashMap<PlaceId, String>, SourceError> {
        Ok(HashMap::new())
    }
}
