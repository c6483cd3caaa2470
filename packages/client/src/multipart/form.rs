//! Form implementation for multipart/form-data

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use super::upload::FileUpload;
use crate::error::{self, Result};

/// A multipart/form-data body under construction.
pub struct Form {
    boundary: String,
    fields: Vec<(String, String)>,
    files: Vec<FileUpload>,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    #[must_use]
    pub fn new() -> Self {
        Self {
            boundary: random_boundary(),
            fields: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Add a text field with supplied name and value.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn file(mut self, upload: FileUpload) -> Self {
        self.files.push(upload);
        self
    }

    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Render the body. Text fields come first, then files in insertion order.
    ///
    /// Every upload stream is consumed; the first read failure aborts and the
    /// remaining streams are dropped unread.
    pub async fn into_body(self) -> Result<Bytes> {
        let Form {
            boundary,
            fields,
            files,
        } = self;

        let mut body = BytesMut::new();

        for (name, value) in &fields {
            write_part_header(&mut body, &boundary, name, None, None);
            body.put_slice(value.as_bytes());
            body.put_slice(b"\r\n");
        }

        let numbered = files.len() > 1;
        for (index, mut upload) in files.into_iter().enumerate() {
            let field_name = match upload.field_name.as_str() {
                "" if numbered => format!("file{}", index + 1),
                "" => "file".to_string(),
                name => name.to_string(),
            };
            let mime = upload.mime_or_default().to_string();

            let contents = upload.read_contents().await.map_err(error::body)?;

            write_part_header(
                &mut body,
                &boundary,
                &field_name,
                Some(&upload.file_name),
                Some(&mime),
            );
            body.put_slice(&contents);
            body.put_slice(b"\r\n");
        }

        body.put_slice(format!("--{boundary}--\r\n").as_bytes());
        Ok(body.freeze())
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("boundary", &self.boundary)
            .field("fields", &self.fields)
            .field("files", &self.files)
            .finish()
    }
}

fn write_part_header(
    body: &mut BytesMut,
    boundary: &str,
    name: &str,
    file_name: Option<&str>,
    mime: Option<&str>,
) {
    body.put_slice(format!("--{boundary}\r\n").as_bytes());
    let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", escape_quotes(name));
    if let Some(file_name) = file_name {
        disposition.push_str(&format!("; filename=\"{}\"", escape_quotes(file_name)));
    }
    body.put_slice(disposition.as_bytes());
    body.put_slice(b"\r\n");
    if let Some(mime) = mime {
        body.put_slice(format!("Content-Type: {mime}\r\n").as_bytes());
    }
    body.put_slice(b"\r\n");
}

fn escape_quotes(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn random_boundary() -> String {
    (0..4).map(|_| format!("{:016x}", fastrand::u64(..))).collect()
}
