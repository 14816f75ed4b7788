//! Input validation for a submission. Gates the network phase.

use calibra_protocol::constants::is_accepted_archive_type;

use crate::error::ValidationError;
use crate::types::{SelectedFile, SubmissionRequest};

/// Validates the file selection of a submission.
///
/// Exactly one file must be selected and its declared content type must be
/// an accepted gzip spelling (`application/gzip` or `application/x-gzip`).
/// Multi-selection is rejected outright rather than silently using the
/// first entry. On success the file is returned unchanged — no transcoding.
pub fn validate(request: &SubmissionRequest) -> Result<&SelectedFile, ValidationError> {
    let file = match request.files.as_slice() {
        [] => return Err(ValidationError::MissingFile),
        [file] => file,
        _ => return Err(ValidationError::MultipleFiles),
    };

    if !is_accepted_archive_type(&file.content_type) {
        return Err(ValidationError::UnsupportedType);
    }

    Ok(file)
}
