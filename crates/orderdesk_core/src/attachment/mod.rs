//! Opaque order attachments.
//!
//! # Responsibility
//! - Read externally selected documents (normally PDFs) into memory.
//! - Hand the bytes to order records without looking at them.
//!
//! # Invariants
//! - Bytes are kept verbatim: no parsing, compression or deduplication.
//! - Import failures never abort order creation; callers decide whether to
//!   continue without the attachment.
//! - Logs carry sizes only, never content.

use log::{debug, warn};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Opaque document bytes attached to an order.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Attachment(Vec<u8>);

impl Attachment {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Debug for Attachment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("len", &self.0.len())
            .finish()
    }
}

/// Attachment source could not be read.
#[derive(Debug)]
pub enum AttachmentError {
    Io {
        /// Human-readable origin, e.g. the picked file path.
        source_label: String,
        source: std::io::Error,
    },
}

impl Display for AttachmentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io {
                source_label,
                source,
            } => write!(f, "failed to read attachment `{source_label}`: {source}"),
        }
    }
}

impl Error for AttachmentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Reads all bytes from `source` into an attachment.
///
/// `source_label` only feeds error messages and logs.
pub fn import_attachment(
    mut source: impl Read,
    source_label: &str,
) -> Result<Attachment, AttachmentError> {
    let mut bytes = Vec::new();
    match source.read_to_end(&mut bytes) {
        Ok(size) => {
            debug!("event=attachment_import module=attachment status=ok bytes={size}");
            Ok(Attachment(bytes))
        }
        Err(err) => {
            warn!(
                "event=attachment_import module=attachment status=error error_kind={:?}",
                err.kind()
            );
            Err(AttachmentError::Io {
                source_label: source_label.to_string(),
                source: err,
            })
        }
    }
}

/// Reads the file handed over by the native document picker.
pub fn import_attachment_file(path: impl AsRef<Path>) -> Result<Attachment, AttachmentError> {
    let path = path.as_ref();
    let label = path.display().to_string();
    let file = File::open(path).map_err(|err| {
        warn!(
            "event=attachment_import module=attachment status=error error_kind={:?}",
            err.kind()
        );
        AttachmentError::Io {
            source_label: label.clone(),
            source: err,
        }
    })?;
    import_attachment(file, &label)
}
