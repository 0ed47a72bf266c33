use client_logging::{client_debug, client_info, client_warn};

use crate::record::find_record;
use crate::state::STARTING_MESSAGE;
use crate::tracker::TrackerEvent;
use crate::validate::validate_capture_url;
use crate::{
    AppState, ComparisonController, Effect, Msg, Notice, NoticeKind, Shortcut, ViewState,
    INITIAL_PERCENT,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            if state.controls_enabled() {
                state.set_input(text);
            } else {
                client_debug!("Input is locked while a capture is in flight");
            }
            Vec::new()
        }
        Msg::CaptureClicked => start_capture(&mut state),
        Msg::ShortcutPressed(Shortcut::Submit) => {
            if state.controls_enabled() {
                start_capture(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::ShortcutPressed(Shortcut::Escape) => {
            state.return_to_welcome();
            Vec::new()
        }
        Msg::SubmitFinished { ticket, result } => match result {
            Ok(job_id) => {
                if state.tracker.submission_accepted(ticket, job_id.clone()) {
                    client_info!("Capture accepted job_id={}", job_id);
                    vec![Effect::StartPolling { job_id }]
                } else {
                    client_debug!("Dropping stale submit response for job_id={}", job_id);
                    Vec::new()
                }
            }
            Err(message) => {
                let event = state.tracker.submission_failed(ticket, message);
                apply_tracker_event(&mut state, event, NoticeKind::SubmitFailed)
            }
        },
        Msg::StatusReceived { job_id, snapshot } => {
            let event = state.tracker.apply_snapshot(&job_id, snapshot);
            apply_tracker_event(&mut state, event, NoticeKind::CaptureFailed)
        }
        Msg::PollFailed { job_id, message } => {
            let event = state.tracker.poll_failed(&job_id, message);
            apply_tracker_event(&mut state, event, NoticeKind::PollFailed)
        }
        Msg::SuccessTimerElapsed { timer } => {
            if state.success_timer == Some(timer) {
                state.success_timer = None;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RefreshClicked => vec![Effect::LoadCaptures],
        Msg::CapturesLoaded(captures) => {
            if state.captures != captures {
                state.captures = captures;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CapturesLoadFailed(message) => {
            client_warn!("Capture list refresh failed, keeping last list: {}", message);
            Vec::new()
        }
        Msg::CompareClicked { folder } => {
            state.pending_comparison = Some(folder.clone());
            vec![Effect::LoadComparison { folder }]
        }
        Msg::ComparisonDataLoaded {
            folder,
            captures,
            captured_url,
        } => {
            if state.pending_comparison.as_deref() == Some(folder.as_str()) {
                state.pending_comparison = None;
                match find_record(&captures, &folder) {
                    Some(record) => {
                        state.screen = ViewState::Comparison(ComparisonController::open(
                            record.clone(),
                            captured_url,
                        ));
                        state.mark_dirty();
                    }
                    None => {
                        state.show_notice(Notice::new(NoticeKind::NotFound, "Capture not found"))
                    }
                }
            }
            Vec::new()
        }
        Msg::ComparisonLoadFailed { folder, message } => {
            if state.pending_comparison.as_deref() == Some(folder.as_str()) {
                state.pending_comparison = None;
                state.show_notice(Notice::new(NoticeKind::ComparisonFailed, message));
            }
            Vec::new()
        }
        Msg::ModeSelected(mode) => {
            if let ViewState::Comparison(comparison) = &mut state.screen {
                if comparison.set_mode(mode) {
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::OpenInNewTabClicked => match &state.screen {
            ViewState::Comparison(comparison) => comparison
                .new_tab_target()
                .map(|url| Effect::OpenInNewTab {
                    url: url.to_string(),
                })
                .into_iter()
                .collect(),
            ViewState::Welcome => Vec::new(),
        },
        Msg::ViewClicked { folder } => vec![Effect::OpenCaptureView { folder }],
        Msg::DownloadClicked { folder } => vec![Effect::DownloadArchive { folder }],
        Msg::ScreenshotClicked { folder } => vec![Effect::OpenScreenshot { folder }],
        Msg::DeleteClicked { folder } => {
            state.pending_delete = Some(folder);
            state.mark_dirty();
            Vec::new()
        }
        Msg::DeleteConfirmed => match state.pending_delete.take() {
            Some(folder) => {
                state.mark_dirty();
                vec![Effect::DeleteCapture { folder }]
            }
            None => Vec::new(),
        },
        Msg::DeleteCancelled => {
            if state.pending_delete.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DeleteFinished { folder, result } => match result {
            Ok(()) => {
                client_info!("Deleted capture {}", folder);
                // Always leave the comparison, whichever capture it was showing.
                state.return_to_welcome();
                vec![Effect::LoadCaptures]
            }
            Err(message) => {
                state.show_notice(Notice::new(NoticeKind::DeleteFailed, message));
                Vec::new()
            }
        },
        Msg::NoticeDismissed => {
            if state.notice.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PageClosing => {
            let was_busy = state.tracker.is_busy();
            let abandoned = state.tracker.abandon();
            if was_busy {
                state.hide_progress();
            }
            match abandoned {
                Some(job_id) => {
                    client_info!("Stopped tracking job_id={} on page close", job_id);
                    vec![Effect::StopPolling]
                }
                None => Vec::new(),
            }
        }
    };

    (state, effects)
}

fn start_capture(state: &mut AppState) -> Vec<Effect> {
    // Sent as typed, minus surrounding whitespace.
    if let Err(err) = validate_capture_url(state.input()) {
        state.show_notice(Notice::new(NoticeKind::InvalidUrl, err.to_string()));
        return Vec::new();
    }
    let url = state.input().trim().to_string();

    let (ticket, abandoned) = state.tracker.begin_submission();
    state.success_timer = None;
    state.notice = None;
    state.show_progress(STARTING_MESSAGE, INITIAL_PERCENT);

    let mut effects = Vec::with_capacity(2);
    if let Some(job_id) = abandoned {
        // The server keeps working on it; only local tracking stops.
        client_info!("Abandoning job_id={} for a new submission", job_id);
        effects.push(Effect::StopPolling);
    }
    effects.push(Effect::SubmitCapture { ticket, url });
    effects
}

fn apply_tracker_event(
    state: &mut AppState,
    event: TrackerEvent,
    failure_kind: NoticeKind,
) -> Vec<Effect> {
    match event {
        TrackerEvent::Progress { message, percent } => {
            let shown = match &state.progress {
                Some(surface) if message.is_empty() => surface.message.clone(),
                _ => message,
            };
            state.show_progress(shown, percent);
            Vec::new()
        }
        TrackerEvent::Completed { job_id, .. } => {
            client_info!("Capture completed job_id={}", job_id);
            state.hide_progress();
            let timer = state.next_timer();
            state.success_timer = Some(timer);
            vec![
                Effect::StopPolling,
                Effect::LoadCaptures,
                Effect::ScheduleSuccessHide { timer },
            ]
        }
        TrackerEvent::Failed { message } => {
            client_warn!("Capture failed: {}", message);
            state.hide_progress();
            state.show_notice(Notice::new(failure_kind, message));
            match failure_kind {
                NoticeKind::SubmitFailed => Vec::new(),
                _ => vec![Effect::StopPolling],
            }
        }
        TrackerEvent::Ignored => Vec::new(),
    }
}
