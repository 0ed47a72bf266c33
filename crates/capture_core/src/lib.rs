//! Capture core: pure job lifecycle state machine and view-model helpers.
mod comparison;
mod effect;
mod job;
mod msg;
mod progress;
mod record;
mod state;
mod tracker;
mod update;
mod validate;
mod view_model;

pub use comparison::{ComparisonController, DisplayMode, PaneLayout};
pub use effect::Effect;
pub use job::{Job, JobId, JobStatus, StatusSnapshot, SubmissionTicket};
pub use msg::{Msg, Shortcut};
pub use progress::{
    phase_percent, PhaseKeywordEstimator, ProgressEstimator, INITIAL_PERCENT, PHASE_TABLE,
};
pub use record::{AssetCounts, CaptureRecord};
pub use state::{AppState, Notice, NoticeKind, TimerId, ViewState, STARTING_MESSAGE, SUCCESS_MESSAGE};
pub use tracker::{ProgressTracker, TrackerEvent, TrackerPhase};
pub use update::update;
pub use validate::{is_valid_url, validate_capture_url, ValidationError};
pub use view_model::{AppViewModel, ComparisonView, PaneView, ProgressView, ScreenView};
