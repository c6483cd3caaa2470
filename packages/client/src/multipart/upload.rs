//! File upload sources

use std::fmt;
use std::io;
use std::path::Path;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{self, Result};

/// MIME type sent for uploads that do not name one.
pub const DEFAULT_FILE_MIME: &str = "application/octet-stream";

/// One file part of a multipart upload.
///
/// The upload owns its content stream; the stream is consumed and dropped when
/// the request body is assembled.
pub struct FileUpload {
    /// Name reported to the server in `Content-Disposition`.
    pub file_name: String,

    /// Form field name. Empty means `file`, or `file1`..`fileN` when several
    /// uploads share a request.
    pub field_name: String,

    /// Empty means [`DEFAULT_FILE_MIME`].
    pub mime: String,

    contents: Box<dyn AsyncRead + Send + Unpin>,
}

impl FileUpload {
    pub fn new<R>(file_name: impl Into<String>, contents: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        Self {
            file_name: file_name.into(),
            field_name: String::new(),
            mime: String::new(),
            contents: Box::new(contents),
        }
    }

    pub fn from_bytes(file_name: impl Into<String>, contents: impl Into<Bytes>) -> Self {
        Self::new(file_name, io::Cursor::new(contents.into()))
    }

    /// Open `path` for upload, named after its final component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = tokio::fs::File::open(path).await.map_err(error::body)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, file))
    }

    /// Open every regular file matching `pattern`.
    pub async fn from_glob(pattern: &str) -> Result<Vec<Self>> {
        let paths = glob::glob(pattern).map_err(error::builder)?;

        let mut uploads = Vec::new();
        for entry in paths {
            let path = entry.map_err(error::body)?;
            if path.is_file() {
                uploads.push(Self::from_path(&path).await?);
            }
        }
        Ok(uploads)
    }

    #[must_use]
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    #[must_use]
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }

    pub(crate) fn mime_or_default(&self) -> &str {
        if self.mime.is_empty() { DEFAULT_FILE_MIME } else { &self.mime }
    }

    /// Drain the content stream. The stream is dropped on return, success or not.
    pub(crate) async fn read_contents(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut contents: Box<dyn AsyncRead + Send + Unpin> = Box::new(tokio::io::empty());
        std::mem::swap(&mut contents, &mut self.contents);
        contents.read_to_end(&mut buf).await?;
        Ok(buf)
    }
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("field_name", &self.field_name)
            .field("mime", &self.mime)
            .finish_non_exhaustive()
    }
}
