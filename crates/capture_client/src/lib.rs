//! Capture client: the capture server's HTTP contract, job polling and the
//! background runtime that executes effects.
mod client;
mod poller;
mod runtime;
mod types;

pub use client::{ClientSettings, JobClient, ReqwestJobClient};
pub use poller::{ChannelEventSink, EventSink, PollTask, MIN_POLL_INTERVAL};
pub use runtime::ClientHandle;
pub use types::{AssetTotals, CaptureEntry, ClientError, ClientEvent, RemoteStatus, StatusSnapshot};
