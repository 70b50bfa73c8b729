// ── Section controllers ──
//
// One async workflow per user action. Each follows the same shape:
// read and validate the form, mark the submit control busy, dispatch,
// then render the outcome through the presenter. The busy control is
// restored when its guard drops, on every path.

mod form;
mod grades;
pub mod layout;
mod modules;
mod students;

use std::sync::Arc;

use pgs_api::{CONNECTION_ERROR_MESSAGE, Dispatch, GradeClient, Outcome};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

pub use layout::{GradeForm, KeyForm, Layout, LayoutPreset, SearchForm, StudentForm, Submit, View};

use crate::config::{SessionConfig, Timing};
use crate::error::CoreError;
use crate::page::{BusyControl, Page};
use crate::view::Severity;

const FALLBACK_SUCCESS: &str = "Operação realizada com sucesso!";

/// How a section action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    Success,
    /// Local validation failed; nothing was sent.
    Invalid(String),
    /// The backend answered with an `error` field.
    Rejected(String),
    /// The backend could not be reached or answered garbage.
    Unreachable(String),
    /// Another request was in flight, so this one was never sent.
    Dropped,
}

impl Settled {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// The message shown to the user, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Invalid(m) | Self::Rejected(m) | Self::Unreachable(m) => Some(m),
            Self::Success | Self::Dropped => None,
        }
    }
}

/// The section controllers for one page.
#[derive(Debug, Clone)]
pub struct Sections {
    client: GradeClient,
    page: Page,
    layout: Arc<Layout>,
    timing: Timing,
}

impl Sections {
    /// Wire controllers to `page`, mounting every region and control the
    /// layout names.
    pub fn new(client: GradeClient, page: Page, layout: Layout, timing: Timing) -> Self {
        layout.mount(&page);
        page.set_dismiss_delay(timing.dismiss_delay);
        Self {
            client,
            page,
            layout: Arc::new(layout),
            timing,
        }
    }

    /// Build a client and a fresh page from a session config.
    pub fn connect(config: &SessionConfig) -> Result<Self, CoreError> {
        let client = GradeClient::new(config.base_url.clone(), &config.transport())?;
        Ok(Self::new(
            client,
            Page::new(),
            config.layout.clone(),
            config.timing,
        ))
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn client(&self) -> &GradeClient {
        &self.client
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    // ── Shared steps ─────────────────────────────────────────────────

    /// Show a local validation warning.
    fn invalid(&self, region: &str, message: impl Into<String>) -> Settled {
        let message = message.into();
        debug!(region, %message, "validation failed");
        self.page.show_message(region, message.clone(), Severity::Warning);
        Settled::Invalid(message)
    }

    fn busy(&self, submit: &Submit) -> BusyControl {
        self.page.begin_busy(&submit.id, &submit.busy_label)
    }

    /// Check both error channels in order, rendering a failure into
    /// `region`. Returns the accepted payload.
    fn accept(&self, region: &str, dispatch: Option<Dispatch>) -> Result<Value, Settled> {
        let Some(dispatch) = dispatch else {
            debug!(region, "request dropped, another one is in flight");
            return Err(Settled::Dropped);
        };
        match dispatch.outcome() {
            Outcome::Unreachable(message) => {
                self.page.show_message(region, message.clone(), Severity::Danger);
                Err(Settled::Unreachable(message))
            }
            Outcome::Rejected(message) => {
                warn!(region, %message, "request rejected");
                self.page.show_message(region, message.clone(), Severity::Danger);
                Err(Settled::Rejected(message))
            }
            Outcome::Accepted(data) => Ok(data),
        }
    }

    /// A dropped request leaves nothing to show in place of the loading
    /// indicator.
    fn clear_if_dropped(&self, region: &str, settled: &Settled) {
        if *settled == Settled::Dropped {
            self.page.clear_message(region);
        }
    }

    /// Decode an accepted payload. A shape mismatch is treated like an
    /// unreadable response.
    fn decode<T: DeserializeOwned>(&self, region: &str, data: Value) -> Result<T, Settled> {
        pgs_api::decode(data).map_err(|e| {
            error!(region, error = %e, "unexpected response shape");
            self.page
                .show_message(region, CONNECTION_ERROR_MESSAGE, Severity::Danger);
            Settled::Unreachable(CONNECTION_ERROR_MESSAGE.into())
        })
    }

    /// Render the backend's success message.
    fn confirm(&self, region: &str, data: &Value) {
        let message = data
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(FALLBACK_SUCCESS);
        self.page.show_message(region, message, Severity::Success);
    }

    /// After a successful create, wait so the confirmation can be read,
    /// then close the modal and run `refresh`. Cancelled with the page.
    fn after_create<F, Fut>(&self, modal: Option<&str>, refresh: F)
    where
        F: FnOnce(Sections) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let sections = self.clone();
        let modal = modal.map(str::to_owned);
        self.page.schedule(
            self.page.child_token(),
            self.timing.refresh_delay,
            move |page| async move {
                if let Some(modal) = modal {
                    page.close_modal(&modal);
                }
                refresh(sections).await;
            },
        );
    }
}

/// Fold an action's internal result into its settled state.
fn settled(result: Result<(), Settled>) -> Settled {
    result.err().unwrap_or(Settled::Success)
}
