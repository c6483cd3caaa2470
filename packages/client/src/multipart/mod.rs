//! multipart/form-data uploads
//!
//! A [`Form`] collects text fields and [`FileUpload`]s and renders them into a
//! single request body. Each upload's stream is read to the end and dropped
//! while the body is assembled, so no file handle outlives body assembly.

mod form;
mod upload;

pub use form::Form;
pub use upload::{DEFAULT_FILE_MIME, FileUpload};
