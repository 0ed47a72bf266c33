use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use client_logging::{client_debug, client_info};

use crate::poller::{EventSink, PollTask};
use crate::{ClientError, ClientEvent, ClientSettings, JobClient, ReqwestJobClient};

enum ClientCommand {
    Submit { ticket: u64, url: String },
    StartPolling { job_id: String },
    StopPolling,
    LoadCaptures,
    LoadComparison { folder: String },
    Delete { folder: String },
    StartTimer { timer_id: u64, after: Duration },
}

/// Runs client operations on a background tokio runtime.
///
/// Commands are fire-and-forget; every outcome is reported through the
/// [`EventSink`]. At most one poll task exists at a time. Dropping the handle
/// stops the command loop, cancels polling and shuts the runtime down.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    client: Arc<dyn JobClient>,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, ClientError> {
        let client: Arc<dyn JobClient> = Arc::new(ReqwestJobClient::new(&settings)?);
        Self::with_client(client, settings.poll_interval, sink)
    }

    pub fn with_client(
        client: Arc<dyn JobClient>,
        poll_interval: Duration,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, ClientError> {
        let runtime =
            tokio::runtime::Runtime::new().map_err(|err| ClientError::Runtime(err.to_string()))?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let worker_client = client.clone();

        thread::Builder::new()
            .name("capture-client".to_string())
            .spawn(move || {
                let mut poll: Option<PollTask> = None;
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        ClientCommand::StartPolling { job_id } => {
                            if let Some(previous) = poll.take() {
                                previous.cancel();
                            }
                            client_info!("Polling job {} every {:?}", job_id, poll_interval);
                            poll = Some(PollTask::spawn(
                                runtime.handle(),
                                worker_client.clone(),
                                job_id,
                                poll_interval,
                                sink.clone(),
                            ));
                        }
                        ClientCommand::StopPolling => {
                            if let Some(task) = poll.take() {
                                task.cancel();
                            }
                        }
                        command => {
                            let client = worker_client.clone();
                            let sink = sink.clone();
                            runtime.spawn(async move {
                                handle_command(client.as_ref(), command, sink.as_ref()).await;
                            });
                        }
                    }
                }
                if let Some(task) = poll.take() {
                    task.cancel();
                }
                client_debug!("Client command loop finished");
            })
            .map_err(|err| ClientError::Runtime(err.to_string()))?;

        Ok(Self { cmd_tx, client })
    }

    pub fn submit(&self, ticket: u64, url: impl Into<String>) {
        self.send(ClientCommand::Submit {
            ticket,
            url: url.into(),
        });
    }

    pub fn start_polling(&self, job_id: impl Into<String>) {
        self.send(ClientCommand::StartPolling {
            job_id: job_id.into(),
        });
    }

    pub fn stop_polling(&self) {
        self.send(ClientCommand::StopPolling);
    }

    pub fn load_captures(&self) {
        self.send(ClientCommand::LoadCaptures);
    }

    pub fn load_comparison(&self, folder: impl Into<String>) {
        self.send(ClientCommand::LoadComparison {
            folder: folder.into(),
        });
    }

    pub fn delete(&self, folder: impl Into<String>) {
        self.send(ClientCommand::Delete {
            folder: folder.into(),
        });
    }

    pub fn start_timer(&self, timer_id: u64, after: Duration) {
        self.send(ClientCommand::StartTimer { timer_id, after });
    }

    pub fn download_url(&self, folder: &str) -> String {
        self.client.download_url(folder)
    }

    pub fn view_url(&self, folder: &str) -> String {
        self.client.view_url(folder)
    }

    pub fn captured_url(&self, folder: &str) -> String {
        self.client.captured_url(folder)
    }

    pub fn screenshot_url(&self, folder: &str) -> String {
        self.client.screenshot_url(folder)
    }

    fn send(&self, command: ClientCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(client: &dyn JobClient, command: ClientCommand, sink: &dyn EventSink) {
    match command {
        ClientCommand::Submit { ticket, url } => {
            let result = client.submit(&url).await;
            sink.emit(ClientEvent::Submitted { ticket, result });
        }
        ClientCommand::LoadCaptures => {
            let result = client.try_list().await;
            sink.emit(ClientEvent::CapturesListed(result));
        }
        ClientCommand::LoadComparison { folder } => {
            let result = client.try_list().await;
            let captured_url = client.captured_url(&folder);
            sink.emit(ClientEvent::ComparisonListed {
                folder,
                result,
                captured_url,
            });
        }
        ClientCommand::Delete { folder } => {
            let result = client.remove(&folder).await;
            sink.emit(ClientEvent::Deleted { folder, result });
        }
        ClientCommand::StartTimer { timer_id, after } => {
            tokio::time::sleep(after).await;
            sink.emit(ClientEvent::TimerElapsed { timer_id });
        }
        ClientCommand::StartPolling { .. } | ClientCommand::StopPolling => {}
    }
}
