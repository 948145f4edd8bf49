//! The submission state machine.
//!
//! State lives behind a mutex that is only held for transitions, never across the file
//! read or the network call, so a caller can select a new file or reset while a request
//! is in flight. Each submission cycle is tagged with a [`CycleId`] and the identity of
//! the file it started from; a completion for a cycle that is no longer live is dropped.

use std::fmt;
use std::sync::Arc;

use celebrity_shared::RecognitionResult;
use tokio::sync::{broadcast, Mutex};
use uuid::Uuid;

use crate::api::RecognitionApi;
use crate::encoding::{self, EncodedPayload, FileReader};
use crate::error::ErrorInfo;
use crate::file::{FileId, SelectedFile};
use crate::preview::{PreviewHandle, PreviewStore};
use crate::validation::{validate_file, ValidationResult};

pub const NO_FILE_SELECTED: &str = "no file selected";
pub const ALREADY_IN_FLIGHT: &str = "a submission is already in progress";
pub const ALREADY_COMPLETED: &str = "reset or select a new file before submitting again";

const EVENT_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    FileSelected,
    Encoding,
    AwaitingResponse,
    Succeeded(RecognitionResult),
    Failed(ErrorInfo),
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            SubmissionState::Encoding | SubmissionState::AwaitingResponse
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::FileSelected => "file_selected",
            SubmissionState::Encoding => "encoding",
            SubmissionState::AwaitingResponse => "awaiting_response",
            SubmissionState::Succeeded(_) => "succeeded",
            SubmissionState::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleId(Uuid);

/// How a started submission ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The outcome was applied: the controller is now `Succeeded` or `Failed`.
    Applied(Result<RecognitionResult, ErrorInfo>),
    /// The cycle was abandoned (reset or re-selection) and its outcome dropped.
    Discarded,
}

impl Completion {
    pub fn into_result(self) -> Result<RecognitionResult, ErrorInfo> {
        match self {
            Completion::Applied(outcome) => outcome,
            Completion::Discarded => Err(ErrorInfo::Abandoned),
        }
    }
}

struct Ticket {
    cycle: CycleId,
    file: Arc<SelectedFile>,
}

struct Machine {
    state: SubmissionState,
    file: Option<Arc<SelectedFile>>,
    preview: Option<PreviewHandle>,
    in_flight: Option<(CycleId, FileId)>,
    last_error: Option<ErrorInfo>,
    previews: Box<dyn PreviewStore>,
    events: broadcast::Sender<SubmissionState>,
}

impl Machine {
    fn transition(&mut self, next: SubmissionState) {
        tracing::debug!(from = %self.state, to = %next, "submission state change");
        self.state = next;
        // No subscribers is fine.
        let _ = self.events.send(self.state.clone());
    }

    fn abandon_in_flight(&mut self) {
        if let Some((cycle, _)) = self.in_flight.take() {
            tracing::info!(cycle = ?cycle, "abandoning in-flight submission");
        }
    }

    fn release_file(&mut self) {
        if let Some(handle) = self.preview.take() {
            self.previews.release(handle);
        }
        self.file = None;
    }

    fn select(&mut self, file: SelectedFile) -> Result<(), ErrorInfo> {
        self.abandon_in_flight();
        self.release_file();

        match validate_file(&file) {
            ValidationResult::Invalid { reason } => {
                tracing::info!(name = %file.name, media_type = %file.media_type, size = file.size, reason, "file rejected");
                let err = ErrorInfo::validation(reason);
                self.last_error = Some(err.clone());
                self.transition(SubmissionState::Idle);
                Err(err)
            }
            ValidationResult::Valid => {
                let file = Arc::new(file);
                self.preview = Some(self.previews.create(&file));
                self.file = Some(file);
                self.last_error = None;
                self.transition(SubmissionState::FileSelected);
                Ok(())
            }
        }
    }

    fn begin(&mut self) -> Result<Ticket, ErrorInfo> {
        if self.state.is_in_flight() {
            return Err(ErrorInfo::validation(ALREADY_IN_FLIGHT));
        }
        let file = self
            .file
            .clone()
            .ok_or_else(|| ErrorInfo::validation(NO_FILE_SELECTED))?;
        if matches!(self.state, SubmissionState::Succeeded(_)) {
            return Err(ErrorInfo::validation(ALREADY_COMPLETED));
        }

        let cycle = CycleId(Uuid::new_v4());
        self.in_flight = Some((cycle, file.id()));
        self.last_error = None;
        self.transition(SubmissionState::Encoding);

        Ok(Ticket { cycle, file })
    }

    fn is_live(&self, ticket: &Ticket) -> bool {
        let current_file = self.file.as_ref().map(|f| f.id());
        self.in_flight == Some((ticket.cycle, ticket.file.id()))
            && current_file == Some(ticket.file.id())
    }

    fn dispatch(&mut self, ticket: &Ticket) -> bool {
        if !self.is_live(ticket) {
            return false;
        }
        self.transition(SubmissionState::AwaitingResponse);
        true
    }

    fn finish(
        &mut self,
        ticket: &Ticket,
        outcome: Result<RecognitionResult, ErrorInfo>,
    ) -> Completion {
        if !self.is_live(ticket) {
            tracing::info!(cycle = ?ticket.cycle, "discarding stale submission outcome");
            return Completion::Discarded;
        }

        self.in_flight = None;
        match &outcome {
            Ok(result) => self.transition(SubmissionState::Succeeded(result.clone())),
            Err(err) => {
                self.last_error = Some(err.clone());
                self.transition(SubmissionState::Failed(err.clone()));
            }
        }
        Completion::Applied(outcome)
    }

    fn reset(&mut self) {
        self.abandon_in_flight();
        self.release_file();
        self.last_error = None;
        self.transition(SubmissionState::Idle);
    }
}

/// Drives one submission cycle at a time from file selection to result or error.
pub struct SubmissionController {
    api: Arc<dyn RecognitionApi>,
    reader: Arc<dyn FileReader>,
    machine: Mutex<Machine>,
}

impl SubmissionController {
    pub fn new(
        api: Arc<dyn RecognitionApi>,
        reader: Arc<dyn FileReader>,
        previews: Box<dyn PreviewStore>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            api,
            reader,
            machine: Mutex::new(Machine {
                state: SubmissionState::Idle,
                file: None,
                preview: None,
                in_flight: None,
                last_error: None,
                previews,
                events,
            }),
        }
    }

    /// Receive every state the controller enters from now on.
    pub async fn subscribe(&self) -> broadcast::Receiver<SubmissionState> {
        self.machine.lock().await.events.subscribe()
    }

    pub async fn state(&self) -> SubmissionState {
        self.machine.lock().await.state.clone()
    }

    /// The most recent error surfaced to the caller, including rejected picks.
    pub async fn last_error(&self) -> Option<ErrorInfo> {
        self.machine.lock().await.last_error.clone()
    }

    pub async fn preview(&self) -> Option<PreviewHandle> {
        self.machine.lock().await.preview.clone()
    }

    /// Replace the current file. An invalid file is never stored and leaves the controller `Idle`.
    pub async fn select_file(&self, file: SelectedFile) -> Result<(), ErrorInfo> {
        self.machine.lock().await.select(file)
    }

    /// Abandon whatever is in progress and return to `Idle`.
    pub async fn reset(&self) {
        self.machine.lock().await.reset();
    }

    /// Encode the selected file and send it.
    ///
    /// Returns `Err` only when the submission cannot start; the state is then unchanged.
    pub async fn submit(&self) -> Result<Completion, ErrorInfo> {
        let ticket = self.machine.lock().await.begin()?;

        let payload = match encoding::encode(self.reader.as_ref(), &ticket.file).await {
            Ok(payload) => payload,
            Err(err) => return Ok(self.machine.lock().await.finish(&ticket, Err(err))),
        };

        if !self.machine.lock().await.dispatch(&ticket) {
            tracing::info!(cycle = ?ticket.cycle, "submission abandoned before dispatch");
            return Ok(Completion::Discarded);
        }

        let outcome = self.send(&ticket, &payload).await;
        Ok(self.machine.lock().await.finish(&ticket, outcome))
    }

    /// Select `file` and submit it in one step.
    pub async fn run(&self, file: SelectedFile) -> Result<RecognitionResult, ErrorInfo> {
        self.select_file(file).await?;
        self.submit().await?.into_result()
    }

    async fn send(
        &self,
        ticket: &Ticket,
        payload: &EncodedPayload,
    ) -> Result<RecognitionResult, ErrorInfo> {
        tracing::info!(
            cycle = ?ticket.cycle,
            name = %ticket.file.name,
            encoded_bytes = payload.base64.len(),
            "sending recognition request"
        );
        self.api.recognize(payload).await
    }
}
