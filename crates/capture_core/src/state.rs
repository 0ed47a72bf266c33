use crate::comparison::ComparisonController;
use crate::record::CaptureRecord;
use crate::tracker::ProgressTracker;
use crate::view_model::{AppViewModel, ComparisonView, PaneView, ProgressView, ScreenView};

pub const STARTING_MESSAGE: &str = "Starting capture...";
pub const SUCCESS_MESSAGE: &str = "Capture completed successfully!";

/// Identifies one scheduled UI timer so a stale expiry can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimerId(u64);

impl TimerId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    InvalidUrl,
    SubmitFailed,
    CaptureFailed,
    PollFailed,
    NotFound,
    ComparisonFailed,
    DeleteFailed,
}

/// Blocking message shown to the user until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Welcome,
    Comparison(ComparisonController),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProgressSurface {
    pub(crate) message: String,
    pub(crate) percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    pub(crate) tracker: ProgressTracker,
    pub(crate) progress: Option<ProgressSurface>,
    pub(crate) success_timer: Option<TimerId>,
    next_timer: u64,
    pub(crate) notice: Option<Notice>,
    pub(crate) captures: Vec<CaptureRecord>,
    pub(crate) screen: ViewState,
    pub(crate) pending_comparison: Option<String>,
    pub(crate) pending_delete: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn screen(&self) -> &ViewState {
        &self.screen
    }

    /// Input and submit controls accept interaction only while no job is in flight.
    pub fn controls_enabled(&self) -> bool {
        !self.tracker.is_busy()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            input: self.input.clone(),
            controls_enabled: self.controls_enabled(),
            progress: self.progress.as_ref().map(|surface| ProgressView {
                message: surface.message.clone(),
                percent: surface.percent,
            }),
            success_visible: self.success_timer.is_some(),
            notice: self.notice.clone(),
            captures: self.captures.clone(),
            screen: match &self.screen {
                ViewState::Welcome => ScreenView::Welcome,
                ViewState::Comparison(comparison) => {
                    let (original, captured) = comparison.panes();
                    ScreenView::Comparison(ComparisonView {
                        title: comparison.title(),
                        folder_name: comparison.folder_name().to_string(),
                        final_url: comparison.final_url().map(str::to_string),
                        mode: comparison.mode(),
                        original: PaneView {
                            source: comparison.original_source().to_string(),
                            layout: original,
                        },
                        captured: PaneView {
                            source: comparison.captured_source().to_string(),
                            layout: captured,
                        },
                    })
                }
            },
            pending_delete: self.pending_delete.clone(),
            dirty: self.dirty,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.mark_dirty();
        }
    }

    pub(crate) fn next_timer(&mut self) -> TimerId {
        self.next_timer += 1;
        TimerId(self.next_timer)
    }

    pub(crate) fn show_progress(&mut self, message: impl Into<String>, percent: u8) {
        self.progress = Some(ProgressSurface {
            message: message.into(),
            percent,
        });
        self.mark_dirty();
    }

    pub(crate) fn hide_progress(&mut self) {
        self.progress = None;
        self.mark_dirty();
    }

    pub(crate) fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn return_to_welcome(&mut self) {
        self.pending_comparison = None;
        if self.screen != ViewState::Welcome {
            self.screen = ViewState::Welcome;
            self.mark_dirty();
        }
    }
}
