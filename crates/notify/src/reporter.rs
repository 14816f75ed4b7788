//! Maps a terminal upload outcome onto user-visible toasts.

use calibra_upload_flow::UploadOutcome;
use tracing::warn;

use crate::toast::ToastQueue;

/// Pushes the user-visible notice for a finished submission.
///
/// Success names the uploaded file. Failure shows generic retry/support
/// advice — the error detail goes to the log, not the toast. Infallible:
/// nothing here can fail a workflow that already finished.
pub fn report_outcome(queue: &mut ToastQueue, outcome: &UploadOutcome, file_name: &str) {
    match outcome {
        UploadOutcome::Succeeded { file_name } => {
            queue.success_with(
                "Upload complete",
                format!("File {file_name} was uploaded successfully"),
            );
        }
        UploadOutcome::Failed(error) => {
            warn!(error = %error, file = %file_name, "reporting failed upload");
            queue.error_with(
                "Upload failed",
                "Please retry in a couple of minutes or contact support.",
            );
        }
        UploadOutcome::Cancelled => {
            queue.info_with("Upload cancelled", format!("Upload of {file_name} was cancelled"));
        }
    }
}
