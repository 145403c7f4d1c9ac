use thiserror::Error;

/// A file taken from an upload form, held in memory until it is pushed to
/// the media host.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("media host is unreachable: {0}")]
    Transport(String),
    #[error("media host rejected the upload ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("media host sent an unreadable response: {0}")]
    Decode(String),
}
