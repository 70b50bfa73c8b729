// ── Message/loading presenter ──
//
// Transient status rendering into a named region. None of these fail:
// a region that is not mounted turns every call into a no-op.

use tracing::trace;

use crate::page::Page;
use crate::view::{Banner, Fragment, Severity};

impl Page {
    /// Replace a region's content with the loading indicator.
    pub fn show_loading(&self, region: &str) {
        self.render(region, Fragment::Loading);
    }

    /// Show a dismissible banner, scroll it into view, and schedule its
    /// removal after the page's dismiss delay.
    ///
    /// The pending dismissal is cancelled if the region is rewritten or
    /// disposed first, or if the page closes.
    pub fn show_message(&self, region: &str, text: impl Into<String>, severity: Severity) {
        let banner = Fragment::Banner(Banner {
            severity,
            text: text.into(),
        });
        let token = self.child_token();
        let Some(generation) = self.replace(region, banner, Some(token.clone())) else {
            return;
        };
        self.scroll_into_view(region);

        let region = region.to_owned();
        self.schedule(token, self.dismiss_delay(), move |page| async move {
            trace!(region = %region, "auto-dismissing banner");
            page.expire(&region, generation);
        });
    }

    /// Empty a region.
    pub fn clear_message(&self, region: &str) {
        self.render(region, Fragment::Empty);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn banner_text(page: &Page, region: &str) -> Option<String> {
        page.region(region)
            .and_then(|f| f.banner().map(|b| b.text.clone()))
    }

    #[test]
    fn missing_region_is_silent() {
        let page = Page::new();
        page.show_loading("ghost");
        page.show_message("ghost", "oi", Severity::Info);
        page.clear_message("ghost");
        assert!(page.focused().is_none());
    }

    #[test]
    fn message_without_runtime_still_renders() {
        let page = Page::with_regions(["msg"]);
        page.show_message("msg", "Salvo", Severity::default());
        let fragment = page.region("msg").unwrap();
        assert_eq!(fragment.banner().unwrap().severity, Severity::Success);
        assert_eq!(page.focused().as_deref(), Some("msg"));
    }

    #[test]
    fn loading_is_idempotent() {
        let page = Page::with_regions(["msg"]);
        page.show_loading("msg");
        page.show_loading("msg");
        assert_eq!(page.region("msg"), Some(Fragment::Loading));
    }

    #[tokio::test(start_paused = true)]
    async fn banner_dismisses_after_delay() {
        let page = Page::with_regions(["msg"]);
        page.show_message("msg", "Aluno adicionado", Severity::Success);
        assert!(page.has_pending_timer("msg"));

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert_eq!(banner_text(&page, "msg").as_deref(), Some("Aluno adicionado"));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(page.region("msg"), Some(Fragment::Empty));
        assert!(!page.has_pending_timer("msg"));
    }

    #[tokio::test(start_paused = true)]
    async fn replaced_banner_is_not_dismissed_by_stale_timer() {
        let page = Page::with_regions(["msg"]);
        page.show_message("msg", "primeiro", Severity::Info);
        tokio::time::sleep(Duration::from_secs(3)).await;

        page.show_loading("msg");
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(page.region("msg"), Some(Fragment::Loading));
    }

    #[tokio::test(start_paused = true)]
    async fn newer_banner_gets_full_delay() {
        let page = Page::with_regions(["msg"]);
        page.show_message("msg", "primeiro", Severity::Info);
        tokio::time::sleep(Duration::from_secs(3)).await;
        page.show_message("msg", "segundo", Severity::Warning);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(banner_text(&page, "msg").as_deref(), Some("segundo"));

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(page.region("msg"), Some(Fragment::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn closing_the_page_cancels_timers() {
        let page = Page::with_regions(["msg"]);
        page.show_message("msg", "fica", Severity::Danger);
        page.close();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(banner_text(&page, "msg").as_deref(), Some("fica"));
        assert!(!page.has_pending_timer("msg"));
    }

    #[tokio::test(start_paused = true)]
    async fn disposed_region_cancels_timer() {
        let page = Page::with_regions(["msg"]);
        page.show_message("msg", "tchau", Severity::Info);
        page.dispose("msg");
        page.mount("msg");
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(page.region("msg"), Some(Fragment::Empty));
    }
}
