use crate::{JobId, SubmissionTicket, TimerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitCapture { ticket: SubmissionTicket, url: String },
    StartPolling { job_id: JobId },
    StopPolling,
    LoadCaptures,
    /// Re-fetch the capture list and resolve the captured-content address for `folder`.
    LoadComparison { folder: String },
    DeleteCapture { folder: String },
    ScheduleSuccessHide { timer: TimerId },
    OpenInNewTab { url: String },
    OpenCaptureView { folder: String },
    DownloadArchive { folder: String },
    OpenScreenshot { folder: String },
}
