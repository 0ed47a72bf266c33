//! Lifecycle of the single active capture job.
//!
//! The tracker owns the job identity and decides what every submit response,
//! status snapshot and poll failure means. It never performs IO: the caller
//! runs the network calls and the poll loop, and feeds the results back in.
//! Results that carry a superseded ticket or job id are reported as
//! [`TrackerEvent::Ignored`].

use crate::job::{Job, JobId, JobStatus, StatusSnapshot, SubmissionTicket};
use crate::progress::{PhaseKeywordEstimator, ProgressEstimator, INITIAL_PERCENT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerPhase {
    #[default]
    Idle,
    Submitting,
    Polling,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    /// The job is still running; show `message` (if any) at `percent`.
    Progress { message: String, percent: u8 },
    /// The job finished successfully. Polling must stop.
    Completed { job_id: JobId, message: String },
    /// The submission or the job failed. Polling must stop.
    Failed { message: String },
    /// The input belonged to a superseded submission or job.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressTracker<E = PhaseKeywordEstimator> {
    phase: TrackerPhase,
    ticket: SubmissionTicket,
    job: Option<Job>,
    estimator: E,
}

impl ProgressTracker<PhaseKeywordEstimator> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: ProgressEstimator> ProgressTracker<E> {
    pub fn with_estimator(estimator: E) -> Self {
        Self {
            phase: TrackerPhase::Idle,
            ticket: SubmissionTicket::default(),
            job: None,
            estimator,
        }
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    pub fn current_job(&self) -> Option<&Job> {
        self.job.as_ref()
    }

    pub fn current_ticket(&self) -> SubmissionTicket {
        self.ticket
    }

    /// True while a poll loop should be running.
    pub fn is_polling(&self) -> bool {
        self.phase == TrackerPhase::Polling && self.job.is_some()
    }

    /// True while a submission or its job is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, TrackerPhase::Submitting | TrackerPhase::Polling)
    }

    /// Starts a new submission and returns its ticket together with the job
    /// whose tracking was abandoned, if one was being polled.
    pub fn begin_submission(&mut self) -> (SubmissionTicket, Option<JobId>) {
        let abandoned = self.take_polled_job();
        self.ticket = self.ticket.next();
        self.phase = TrackerPhase::Submitting;
        (self.ticket, abandoned)
    }

    /// Records the job id returned for `ticket`. Returns `false` when the
    /// ticket is stale and the response must be dropped.
    pub fn submission_accepted(&mut self, ticket: SubmissionTicket, job_id: JobId) -> bool {
        if !self.is_current_submission(ticket) {
            return false;
        }
        self.job = Some(Job::accepted(job_id, INITIAL_PERCENT));
        self.phase = TrackerPhase::Polling;
        true
    }

    pub fn submission_failed(
        &mut self,
        ticket: SubmissionTicket,
        message: impl Into<String>,
    ) -> TrackerEvent {
        if !self.is_current_submission(ticket) {
            return TrackerEvent::Ignored;
        }
        self.job = None;
        self.phase = TrackerPhase::Failed;
        TrackerEvent::Failed {
            message: message.into(),
        }
    }

    /// Applies one poll result for `job_id`.
    pub fn apply_snapshot(&mut self, job_id: &JobId, snapshot: StatusSnapshot) -> TrackerEvent {
        if !self.is_current_job(job_id) {
            return TrackerEvent::Ignored;
        }
        match snapshot.status {
            JobStatus::Pending | JobStatus::Running => {
                let Some(job) = self.job.as_mut() else {
                    return TrackerEvent::Ignored;
                };
                let previous = (job.polls > 0).then_some(job.progress);
                job.progress = self.estimator.estimate(&snapshot.message, previous);
                job.polls += 1;
                job.status = snapshot.status;
                if !snapshot.message.is_empty() {
                    job.message = snapshot.message.clone();
                }
                TrackerEvent::Progress {
                    message: snapshot.message,
                    percent: job.progress,
                }
            }
            JobStatus::Completed => {
                self.job = None;
                self.phase = TrackerPhase::Completed;
                TrackerEvent::Completed {
                    job_id: job_id.clone(),
                    message: snapshot.message,
                }
            }
            JobStatus::Error => self.fail_job(snapshot.message),
        }
    }

    /// A poll request itself failed. Fail-fast: the job is over for this client.
    pub fn poll_failed(&mut self, job_id: &JobId, message: impl Into<String>) -> TrackerEvent {
        if !self.is_current_job(job_id) {
            return TrackerEvent::Ignored;
        }
        self.fail_job(message.into())
    }

    /// Stops tracking without telling the server. Returns the abandoned job.
    ///
    /// The server keeps working on an abandoned job; there is no cancel endpoint.
    pub fn abandon(&mut self) -> Option<JobId> {
        let abandoned = self.take_polled_job();
        if self.phase == TrackerPhase::Submitting {
            // Invalidate the outstanding submit response.
            self.ticket = self.ticket.next();
        }
        self.phase = TrackerPhase::Idle;
        abandoned
    }

    fn fail_job(&mut self, message: String) -> TrackerEvent {
        self.job = None;
        self.phase = TrackerPhase::Failed;
        TrackerEvent::Failed { message }
    }

    fn take_polled_job(&mut self) -> Option<JobId> {
        if self.phase == TrackerPhase::Polling {
            self.job.take().map(|job| job.id)
        } else {
            self.job = None;
            None
        }
    }

    fn is_current_submission(&self, ticket: SubmissionTicket) -> bool {
        self.phase == TrackerPhase::Submitting && self.ticket == ticket
    }

    fn is_current_job(&self, job_id: &JobId) -> bool {
        self.phase == TrackerPhase::Polling
            && self.job.as_ref().is_some_and(|job| &job.id == job_id)
    }
}
