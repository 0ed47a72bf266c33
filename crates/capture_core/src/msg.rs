use crate::{CaptureRecord, DisplayMode, JobId, StatusSnapshot, SubmissionTicket, TimerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Modifier+Enter: submit the current input when controls are enabled.
    Submit,
    /// Escape: leave the comparison view.
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User pressed the capture button (or Enter in the input box).
    CaptureClicked,
    /// Keyboard shortcut.
    ShortcutPressed(Shortcut),
    /// The server answered a capture submission.
    SubmitFinished {
        ticket: SubmissionTicket,
        result: Result<JobId, String>,
    },
    /// A poll returned a status snapshot.
    StatusReceived {
        job_id: JobId,
        snapshot: StatusSnapshot,
    },
    /// A poll request failed at the transport level.
    PollFailed { job_id: JobId, message: String },
    /// The success indicator's display time ran out.
    SuccessTimerElapsed { timer: TimerId },
    /// User asked for the capture list to be reloaded.
    RefreshClicked,
    /// Fresh capture list from the server.
    CapturesLoaded(Vec<CaptureRecord>),
    /// Loading the capture list failed; the list is advisory.
    CapturesLoadFailed(String),
    /// User asked to compare a capture with its original page.
    CompareClicked { folder: String },
    /// Capture list fetched for a pending comparison.
    ComparisonDataLoaded {
        folder: String,
        captures: Vec<CaptureRecord>,
        captured_url: String,
    },
    /// Fetching data for a pending comparison failed.
    ComparisonLoadFailed { folder: String, message: String },
    /// User picked a comparison display mode.
    ModeSelected(DisplayMode),
    /// User asked to open the captured page in a separate tab.
    OpenInNewTabClicked,
    /// User asked to view a capture full screen.
    ViewClicked { folder: String },
    /// User asked to download a capture archive.
    DownloadClicked { folder: String },
    /// User asked to see the page screenshot taken during capture.
    ScreenshotClicked { folder: String },
    /// User asked to delete a capture; needs confirmation.
    DeleteClicked { folder: String },
    DeleteConfirmed,
    DeleteCancelled,
    /// The server answered a delete request.
    DeleteFinished {
        folder: String,
        result: Result<(), String>,
    },
    /// User acknowledged the current notice.
    NoticeDismissed,
    /// The page is going away; stop all local work.
    PageClosing,
}
