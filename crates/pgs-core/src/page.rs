// ── In-memory page model ──
//
// The page the section controllers drive: named regions holding typed
// fragments, form fields, buttons, and modal dialogs. Cheaply cloneable
// via `Arc<PageInner>` so timers and delayed tasks can hold a handle.
//
// Every scheduled task is tied to a `CancellationToken` derived from the
// page lifetime. Region timers get their own child token, cancelled when
// the region content is replaced or the region is disposed.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::view::Fragment;

/// Default delay before a banner dismisses itself.
pub const DEFAULT_DISMISS_DELAY: Duration = Duration::from_secs(5);

/// A button's visible state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Control {
    pub label: String,
    pub disabled: bool,
}

#[derive(Debug, Default)]
struct Region {
    content: Fragment,
    /// Bumped on every write; a timer only acts on the generation it
    /// was scheduled for.
    generation: u64,
    pending: Option<CancellationToken>,
}

impl Region {
    fn replace(&mut self, content: Fragment, pending: Option<CancellationToken>) -> u64 {
        if let Some(old) = self.pending.take() {
            old.cancel();
        }
        self.content = content;
        self.generation += 1;
        self.pending = pending;
        self.generation
    }
}

#[derive(Debug)]
struct PageState {
    regions: HashMap<String, Region>,
    fields: HashMap<String, String>,
    controls: HashMap<String, Control>,
    modals: HashMap<String, bool>,
    focused: Option<String>,
    reload_requests: u32,
    dismiss_delay: Duration,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            regions: HashMap::new(),
            fields: HashMap::new(),
            controls: HashMap::new(),
            modals: HashMap::new(),
            focused: None,
            reload_requests: 0,
            dismiss_delay: DEFAULT_DISMISS_DELAY,
        }
    }
}

struct PageInner {
    state: Mutex<PageState>,
    lifetime: CancellationToken,
}

/// Handle to the page. Clones share state.
#[derive(Clone)]
pub struct Page {
    inner: Arc<PageInner>,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("state", &*self.state())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(PageInner {
                state: Mutex::new(PageState::default()),
                lifetime: CancellationToken::new(),
            }),
        }
    }

    /// Create a page with the given regions already mounted.
    pub fn with_regions<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let page = Self::new();
        for id in regions {
            page.mount(id);
        }
        page
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // ── Regions ──────────────────────────────────────────────────────

    /// Mount an empty region. Mounting an existing region is a no-op.
    pub fn mount(&self, id: impl Into<String>) {
        self.state().regions.entry(id.into()).or_default();
    }

    /// Remove a region, cancelling any timer pending on it.
    pub fn dispose(&self, id: &str) {
        if let Some(region) = self.state().regions.remove(id) {
            if let Some(pending) = region.pending {
                pending.cancel();
            }
        }
    }

    pub fn is_mounted(&self, id: &str) -> bool {
        self.state().regions.contains_key(id)
    }

    /// Current content of a region, `None` if it is not mounted.
    pub fn region(&self, id: &str) -> Option<Fragment> {
        self.state().regions.get(id).map(|r| r.content.clone())
    }

    pub fn region_html(&self, id: &str) -> Option<String> {
        self.state().regions.get(id).map(|r| r.content.to_html())
    }

    /// Ids of all mounted regions, sorted.
    pub fn region_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.state().regions.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Replace a region's content. Writing to an unmounted region is a
    /// silent no-op; returns whether anything was written.
    pub fn render(&self, id: &str, content: Fragment) -> bool {
        self.replace(id, content, None).is_some()
    }

    /// Replace content and attach an optional pending-timer token.
    /// Returns the new generation when the region exists.
    pub(crate) fn replace(
        &self,
        id: &str,
        content: Fragment,
        pending: Option<CancellationToken>,
    ) -> Option<u64> {
        let mut state = self.state();
        let Some(region) = state.regions.get_mut(id) else {
            trace!(region = id, "region not mounted, skipping render");
            if let Some(pending) = pending {
                pending.cancel();
            }
            return None;
        };
        Some(region.replace(content, pending))
    }

    /// Clear a region if it is still at `generation`.
    pub(crate) fn expire(&self, id: &str, generation: u64) {
        let mut state = self.state();
        match state.regions.get_mut(id) {
            Some(region) if region.generation == generation => {
                region.pending = None;
                region.content = Fragment::Empty;
                region.generation += 1;
            }
            _ => trace!(region = id, "region changed before expiry"),
        }
    }

    /// Whether a region has a timer pending.
    pub fn has_pending_timer(&self, id: &str) -> bool {
        self.state()
            .regions
            .get(id)
            .and_then(|r| r.pending.as_ref())
            .is_some_and(|t| !t.is_cancelled())
    }

    pub fn scroll_into_view(&self, id: &str) {
        self.state().focused = Some(id.to_owned());
    }

    /// The region most recently scrolled into view.
    pub fn focused(&self) -> Option<String> {
        self.state().focused.clone()
    }

    // ── Form fields ──────────────────────────────────────────────────

    pub fn set_field(&self, name: impl Into<String>, value: impl Into<String>) {
        self.state().fields.insert(name.into(), value.into());
    }

    /// A field's raw value; missing fields read as empty.
    pub fn field(&self, name: &str) -> String {
        self.state().fields.get(name).cloned().unwrap_or_default()
    }

    pub fn clear_fields<'a>(&self, names: impl IntoIterator<Item = &'a str>) {
        let mut state = self.state();
        for name in names {
            state.fields.insert(name.to_owned(), String::new());
        }
    }

    // ── Controls ─────────────────────────────────────────────────────

    pub fn add_control(&self, id: impl Into<String>, label: impl Into<String>) {
        self.state().controls.insert(
            id.into(),
            Control {
                label: label.into(),
                disabled: false,
            },
        );
    }

    pub fn control(&self, id: &str) -> Option<Control> {
        self.state().controls.get(id).cloned()
    }

    /// Disable a control and show a busy label until the guard drops.
    /// A missing control yields a guard that does nothing.
    pub fn begin_busy(&self, id: &str, busy_label: &str) -> BusyControl {
        let mut state = self.state();
        let original = state.controls.get_mut(id).map(|control| {
            let original = control.clone();
            control.label = busy_label.to_owned();
            control.disabled = true;
            original
        });
        BusyControl {
            page: self.clone(),
            id: id.to_owned(),
            original,
        }
    }

    // ── Modals ───────────────────────────────────────────────────────

    pub fn open_modal(&self, id: impl Into<String>) {
        self.state().modals.insert(id.into(), true);
    }

    pub fn close_modal(&self, id: &str) {
        self.state().modals.insert(id.to_owned(), false);
    }

    pub fn is_modal_open(&self, id: &str) -> bool {
        self.state().modals.get(id).copied().unwrap_or(false)
    }

    // ── Reload requests ──────────────────────────────────────────────

    /// Ask whoever hosts the page to reload it.
    pub fn request_reload(&self) {
        self.state().reload_requests += 1;
    }

    pub fn reload_requests(&self) -> u32 {
        self.state().reload_requests
    }

    // ── Lifetime & timers ────────────────────────────────────────────

    pub fn dismiss_delay(&self) -> Duration {
        self.state().dismiss_delay
    }

    pub fn set_dismiss_delay(&self, delay: Duration) {
        self.state().dismiss_delay = delay;
    }

    /// Cancel every pending timer and delayed task.
    pub fn close(&self) {
        self.inner.lifetime.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lifetime.is_cancelled()
    }

    pub(crate) fn child_token(&self) -> CancellationToken {
        self.inner.lifetime.child_token()
    }

    /// Run `task` after `delay` unless `token` is cancelled first.
    ///
    /// Outside a Tokio runtime nothing is scheduled.
    pub(crate) fn schedule<F, Fut>(&self, token: CancellationToken, delay: Duration, task: F)
    where
        F: FnOnce(Page) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            trace!("no runtime, timer not scheduled");
            return;
        };
        let page = self.clone();
        handle.spawn(async move {
            tokio::select! {
                () = token.cancelled() => trace!("timer cancelled"),
                () = tokio::time::sleep(delay) => task(page).await,
            }
        });
    }
}

/// Restores a control's label and enabled state when dropped.
#[must_use = "the control is restored as soon as the guard drops"]
pub struct BusyControl {
    page: Page,
    id: String,
    original: Option<Control>,
}

impl Drop for BusyControl {
    fn drop(&mut self) {
        if let Some(original) = self.original.take() {
            self.page.state().controls.insert(self.id.clone(), original);
        }
    }
}
