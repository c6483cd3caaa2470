//! Builder-style entry point

use std::path::PathBuf;

use courier_client::RequestOptions;
use courier_client::operations::{
    DeleteOperation, DownloadOperation, GetOperation, HeadOperation, OptionsOperation,
    PatchOperation, PostOperation, PutOperation,
};

/// Starts an operation that is configured fluently and sent with
/// [`crate::HttpOperation::execute`].
///
/// ```no_run
/// use courier::{Courier, HttpOperation};
///
/// # async fn run() -> courier::Result<()> {
/// let response = Courier::get("https://example.com/search")
///     .query_param("q", "rust")
///     .header("Accept", "text/html")
///     .execute()
///     .await?;
/// # let _ = response;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Courier;

impl Courier {
    #[must_use]
    pub fn get(url: impl Into<String>) -> GetOperation {
        GetOperation::new(url, None)
    }

    #[must_use]
    pub fn put(url: impl Into<String>) -> PutOperation {
        PutOperation::new(url, None)
    }

    #[must_use]
    pub fn patch(url: impl Into<String>) -> PatchOperation {
        PatchOperation::new(url, None)
    }

    #[must_use]
    pub fn delete(url: impl Into<String>) -> DeleteOperation {
        DeleteOperation::new(url, None)
    }

    #[must_use]
    pub fn post(url: impl Into<String>) -> PostOperation {
        PostOperation::new(url, None)
    }

    #[must_use]
    pub fn head(url: impl Into<String>) -> HeadOperation {
        HeadOperation::new(url, None)
    }

    #[must_use]
    pub fn options(url: impl Into<String>) -> OptionsOperation {
        OptionsOperation::new(url, None)
    }

    /// GET `url` into `destination`; fails on a non-2xx final response.
    #[must_use]
    pub fn download(url: impl Into<String>, destination: impl Into<PathBuf>) -> DownloadOperation {
        DownloadOperation::new(url, destination, None)
    }

    /// Operations configured with `options` up front.
    #[must_use]
    pub fn with_options(options: RequestOptions) -> Configured {
        Configured { options }
    }
}

/// Pre-configured options waiting for a verb and a URL.
#[derive(Debug)]
pub struct Configured {
    options: RequestOptions,
}

impl Configured {
    #[must_use]
    pub fn get(self, url: impl Into<String>) -> GetOperation {
        GetOperation::new(url, Some(self.options))
    }

    #[must_use]
    pub fn post(self, url: impl Into<String>) -> PostOperation {
        PostOperation::new(url, Some(self.options))
    }

    #[must_use]
    pub fn put(self, url: impl Into<String>) -> PutOperation {
        PutOperation::new(url, Some(self.options))
    }

    #[must_use]
    pub fn patch(self, url: impl Into<String>) -> PatchOperation {
        PatchOperation::new(url, Some(self.options))
    }

    #[must_use]
    pub fn delete(self, url: impl Into<String>) -> DeleteOperation {
        DeleteOperation::new(url, Some(self.options))
    }

    #[must_use]
    pub fn head(self, url: impl Into<String>) -> HeadOperation {
        HeadOperation::new(url, Some(self.options))
    }

    #[must_use]
    pub fn options(self, url: impl Into<String>) -> OptionsOperation {
        OptionsOperation::new(url, Some(self.options))
    }

    #[must_use]
    pub fn download(self, url: impl Into<String>, destination: impl Into<PathBuf>) -> DownloadOperation {
        DownloadOperation::new(url, destination, Some(self.options))
    }
}
