use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use serde_json::Value;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::ApiError;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FlowError {
    #[error("{0}")]
    Input(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl FlowError {
    pub fn display(&self) -> String {
        format!("Error: {}", self)
    }
}

/// Parses a text area the user typed JSON into. The value is not inspected.
pub fn parse_field(raw: &str) -> Result<Value, FlowError> {
    serde_json::from_str(raw).map_err(|e| FlowError::Input(e.to_string()))
}

#[derive(Clone, Debug, PartialEq)]
pub enum PanelState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Per-panel generation counter; only the newest ticket may render.
#[derive(Clone, Debug, Default)]
pub struct RequestTracker {
    latest: Rc<Cell<u64>>,
}

impl RequestTracker {
    pub fn begin(&self) -> Ticket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        Ticket(next)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get() == ticket.0
    }
}

/// Shows the loading state, awaits `work`, and renders the outcome unless a
/// newer submission has been made on the same panel in the meantime.
pub fn run_panel<T, F>(
    name: &'static str,
    state: UseStateHandle<PanelState<T>>,
    tracker: RequestTracker,
    work: F,
) where
    T: 'static,
    F: Future<Output = Result<T, FlowError>> + 'static,
{
    let ticket = tracker.begin();
    state.set(PanelState::Loading);
    spawn_local(async move {
        let outcome = work.await;
        if !tracker.is_current(ticket) {
            log::debug!("{name}: dropping stale response");
            return;
        }
        state.set(match outcome {
            Ok(value) => PanelState::Ready(value),
            Err(err) => PanelState::Failed(err.display()),
        });
    });
}

/// Local input errors also supersede any request still in flight.
pub fn fail_panel<T>(
    state: &UseStateHandle<PanelState<T>>,
    tracker: &RequestTracker,
    err: FlowError,
) {
    tracker.begin();
    state.set(PanelState::Failed(err.display()));
}

pub fn render_panel<T>(state: &PanelState<T>, ready: impl FnOnce(&T) -> Html) -> Html {
    match state {
        PanelState::Idle => html! {},
        PanelState::Loading => loading_indicator(),
        PanelState::Failed(msg) => error_alert(msg),
        PanelState::Ready(value) => ready(value),
    }
}

pub fn loading_indicator() -> Html {
    html! {
        <div class="flex items-center justify-center py-8">
            <div class="w-8 h-8 border-4 border-[#D8E1E8] border-t-[#173E63] rounded-full animate-spin"></div>
        </div>
    }
}

pub fn error_alert(msg: &str) -> Html {
    html! {
        <div class="p-4 rounded-[10px] border border-red-200 bg-red-50 text-sm text-red-600">
            { msg.to_string() }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn newer_ticket_supersedes_older() {
        let tracker = RequestTracker::default();
        let first = tracker.begin();
        assert!(tracker.is_current(first));

        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn clones_share_the_counter() {
        let tracker = RequestTracker::default();
        let ticket = tracker.begin();
        tracker.clone().begin();
        assert!(!tracker.is_current(ticket));
    }

    #[test]
    fn parse_field_passes_any_json_through() {
        assert_eq!(parse_field(r#"{"Salary": 5000}"#).unwrap(), json!({"Salary": 5000}));
        assert_eq!(parse_field("[1, 2]").unwrap(), json!([1, 2]));
    }

    #[test]
    fn malformed_input_is_an_input_error() {
        let err = parse_field("{Salary: 5000").unwrap_err();
        assert!(matches!(err, FlowError::Input(_)));
        assert!(err.display().starts_with("Error: "));
    }

    #[test]
    fn api_errors_display_their_message() {
        let err = FlowError::from(ApiError::Network("connection refused".into()));
        assert_eq!(err.display(), "Error: connection refused");
    }
}
