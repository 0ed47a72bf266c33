use std::sync::{mpsc, Arc};
use std::time::Duration;

use capture_client::{
    CaptureEntry, ClientError, ClientEvent, ClientHandle, ClientSettings, EventSink, JobClient,
    RemoteStatus, ReqwestJobClient,
};
use capture_core::{
    AssetCounts, CaptureRecord, Effect, JobId, JobStatus, Msg, StatusSnapshot, SubmissionTicket,
    TimerId,
};
use client_logging::{client_debug, client_info, client_warn};

use super::app::AppEvent;

/// A page the user should open; the terminal can only show its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub label: &'static str,
    pub url: String,
}

/// Executes core effects on the client runtime.
pub struct EffectRunner {
    client: ClientHandle,
    success_display: Duration,
}

impl EffectRunner {
    pub fn new(
        settings: ClientSettings,
        success_display: Duration,
        events: mpsc::Sender<AppEvent>,
    ) -> Result<Self, ClientError> {
        let client: Arc<dyn JobClient> = Arc::new(ReqwestJobClient::new(&settings)?);
        Self::with_client(client, settings.poll_interval, success_display, events)
    }

    pub fn with_client(
        client: Arc<dyn JobClient>,
        poll_interval: Duration,
        success_display: Duration,
        events: mpsc::Sender<AppEvent>,
    ) -> Result<Self, ClientError> {
        let client =
            ClientHandle::with_client(client, poll_interval, Arc::new(MsgSink::new(events)))?;
        Ok(Self {
            client,
            success_display,
        })
    }

    /// Starts every effect; returns the pages the user asked to open.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Vec<Navigation> {
        let mut navigation = Vec::new();
        for effect in effects {
            match effect {
                Effect::SubmitCapture { ticket, url } => {
                    client_info!("SubmitCapture ticket={} url={}", ticket.value(), url);
                    self.client.submit(ticket.value(), url);
                }
                Effect::StartPolling { job_id } => self.client.start_polling(job_id.as_str()),
                Effect::StopPolling => self.client.stop_polling(),
                Effect::LoadCaptures => self.client.load_captures(),
                Effect::LoadComparison { folder } => self.client.load_comparison(folder),
                Effect::DeleteCapture { folder } => {
                    client_info!("DeleteCapture folder={}", folder);
                    self.client.delete(folder);
                }
                Effect::ScheduleSuccessHide { timer } => {
                    self.client.start_timer(timer.value(), self.success_display);
                }
                Effect::OpenInNewTab { url } => navigation.push(Navigation {
                    label: "Open in new tab",
                    url,
                }),
                Effect::OpenCaptureView { folder } => navigation.push(Navigation {
                    label: "View",
                    url: self.client.view_url(&folder),
                }),
                Effect::DownloadArchive { folder } => navigation.push(Navigation {
                    label: "Download",
                    url: self.client.download_url(&folder),
                }),
                Effect::OpenScreenshot { folder } => navigation.push(Navigation {
                    label: "Screenshot",
                    url: self.client.screenshot_url(&folder),
                }),
            }
        }
        for target in &navigation {
            client_debug!("Navigation {} -> {}", target.label, target.url);
        }
        navigation
    }
}

/// Feeds client events back into the app loop as core messages.
struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl MsgSink {
    fn new(tx: mpsc::Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for MsgSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(AppEvent::Msg(event_to_msg(event)));
    }
}

pub(crate) fn event_to_msg(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::Submitted { ticket, result } => Msg::SubmitFinished {
            ticket: SubmissionTicket::new(ticket),
            result: result.map(JobId::new).map_err(|err| err.to_string()),
        },
        ClientEvent::Status { job_id, result } => {
            let job_id = JobId::new(job_id);
            match result {
                Ok(snapshot) => Msg::StatusReceived {
                    job_id,
                    snapshot: StatusSnapshot::new(map_status(snapshot.status), snapshot.message),
                },
                Err(err) => Msg::PollFailed {
                    job_id,
                    message: err.to_string(),
                },
            }
        }
        ClientEvent::CapturesListed(Ok(entries)) => Msg::CapturesLoaded(to_records(entries)),
        ClientEvent::CapturesListed(Err(err)) => Msg::CapturesLoadFailed(err.to_string()),
        ClientEvent::ComparisonListed {
            folder,
            result,
            captured_url,
        } => match result {
            Ok(entries) => Msg::ComparisonDataLoaded {
                folder,
                captures: to_records(entries),
                captured_url,
            },
            Err(err) => {
                client_warn!("Loading comparison for {} failed: {}", folder, err);
                Msg::ComparisonLoadFailed {
                    folder,
                    message: err.to_string(),
                }
            }
        },
        ClientEvent::Deleted { folder, result } => Msg::DeleteFinished {
            folder,
            result: result.map_err(|err| err.to_string()),
        },
        ClientEvent::TimerElapsed { timer_id } => Msg::SuccessTimerElapsed {
            timer: TimerId::new(timer_id),
        },
    }
}

fn map_status(status: RemoteStatus) -> JobStatus {
    match status {
        RemoteStatus::Pending => JobStatus::Pending,
        RemoteStatus::Running => JobStatus::Running,
        RemoteStatus::Completed => JobStatus::Completed,
        // An unknown job can never finish; treat it as a failure.
        RemoteStatus::Error | RemoteStatus::NotFound => JobStatus::Error,
    }
}

fn to_records(entries: Vec<CaptureEntry>) -> Vec<CaptureRecord> {
    entries
        .into_iter()
        .map(|entry| CaptureRecord {
            folder_name: entry.folder_name,
            original_url: entry.original_url,
            final_url: entry.final_url,
            capture_time: entry.capture_time,
            assets: AssetCounts {
                css: entry.assets.css,
                js: entry.assets.js,
                images: entry.assets.images,
            },
        })
        .collect()
}
