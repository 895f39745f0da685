//! The page: every behavior, wired together once at start.
//!
//! A [`Page`] is built from a [`BehaviorConfig`] when the document is ready
//! and then fed [`PageEvent`]s by the host. Each call to [`Page::handle`]
//! first runs the tasks that came due since the last event, then dispatches
//! the event, then runs anything the event scheduled for right now.

use crate::config::BehaviorConfig;
use crate::contact::{ContactForm, SubmitOutcome};
use crate::counter::Counters;
use crate::host::{Channel, Context, ElementId};
use crate::notify::{NotificationKind, Toaster};
use crate::reveal::{scan_reveals, scan_skill_bars, RevealScheduler};
use crate::timers::{TaskKey, TaskQueue};
use crate::toggles::{
    AnchorScroller, HeaderScroll, HoverFloat, MobileMenu, Parallax, ProjectFilter, ScrollTopButton,
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Keys the page reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other,
}

/// Something the host observed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PageEvent {
    /// Every resource finished loading.
    Loaded,
    Scroll { y: f64 },
    Intersection {
        channel: Channel,
        target: ElementId,
        visible: bool,
    },
    Click { target: ElementId },
    Submit { form: ElementId },
    Key { key: Key, target: Option<ElementId> },
    PointerEnter { target: ElementId },
    PointerLeave { target: ElementId },
    /// An animation frame; drives frame-strategy counters.
    Frame,
}

/// Every behavior of one page plus the queue of pending work.
///
/// The page holds no reference to the document; each call gets a fresh
/// [`Context`].
pub struct Page {
    config: BehaviorConfig,
    tasks: TaskQueue,
    reveals: RevealScheduler,
    skill_bars: RevealScheduler,
    counters: Counters,
    menu: Option<MobileMenu>,
    filter: Option<ProjectFilter>,
    header: Option<HeaderScroll>,
    scroll_top: Option<ScrollTopButton>,
    parallax: Parallax,
    anchors: AnchorScroller,
    hover: HoverFloat,
    contact: Option<ContactForm>,
    toaster: Toaster,
    body: Option<ElementId>,
}

impl Page {
    /// Capture the document and initialise every behavior.
    ///
    /// Behaviors whose nodes are missing stay inert.
    pub fn start(config: BehaviorConfig, cx: &mut Context<'_>) -> Self {
        let selectors = &config.selectors;
        let document = &*cx.document;

        let menu = MobileMenu::capture(document, selectors);
        let filter = ProjectFilter::capture(document, selectors, config.filter_fade_ms);
        let header = document.query(&selectors.header).map(|header| {
            HeaderScroll::new(
                header,
                config.header_hide_after_px,
                config.header_scrolled_after_px,
            )
        });
        let scroll_top = document
            .query(&selectors.scroll_top)
            .map(|button| ScrollTopButton::new(button, config.scroll_top_after_px));
        let parallax = Parallax::capture(document, &selectors.parallax, config.parallax_speed);
        let anchors = AnchorScroller::capture(document, &selectors.anchors, config.anchor_offset_px);
        let hover = HoverFloat::capture(document, &selectors.hover);
        let contact = ContactForm::capture(document, selectors);
        let toaster = Toaster::new(
            document.query(&selectors.notification),
            document.query(&selectors.notification_close),
            config.toast_lifetime_ms,
        );
        let body = document.query(&selectors.body);
        let year = document.query(&selectors.current_year);

        if let Some(year) = year {
            let current = chrono::Utc::now().year().to_string();
            if let Err(err) = cx.document.set_text(year, &current) {
                tracing::debug!(error = %err, "footer year not set");
            }
        }
        if let Some(body) = body {
            if let Err(err) = cx.document.set_style(body, "opacity", "0") {
                tracing::debug!(error = %err, "body fade skipped");
            }
        }
        if let (Some(filter), true) = (&filter, config.stagger_enabled) {
            filter.stagger(&mut *cx.document, config.stagger_step_ms);
        }

        let reveals = scan_reveals(cx, &config);
        let skill_bars = scan_skill_bars(cx, &config);
        let counters = Counters::scan(cx, &config);

        tracing::info!(
            reveals = reveals.registered(),
            skill_bars = skill_bars.registered(),
            counters = counters.len(),
            menu = menu.is_some(),
            filter = filter.is_some(),
            contact = contact.is_some(),
            "page started"
        );

        Self {
            config,
            tasks: TaskQueue::new(),
            reveals,
            skill_bars,
            counters,
            menu,
            filter,
            header,
            scroll_top,
            parallax,
            anchors,
            hover,
            contact,
            toaster,
            body,
        }
    }

    /// Handle one host event at `cx.now_ms`.
    pub fn handle(&mut self, cx: &mut Context<'_>, event: PageEvent) {
        self.advance(cx);
        match event {
            PageEvent::Loaded => {
                self.tasks
                    .schedule(TaskKey::BodyFadeIn, cx.now_ms.saturating_add(self.config.body_fade_delay_ms));
            }
            PageEvent::Scroll { y } => self.on_scroll(cx, y),
            PageEvent::Intersection {
                channel,
                target,
                visible,
            } => self.on_intersection(cx, channel, target, visible),
            PageEvent::Click { target } => self.on_click(cx, target),
            PageEvent::Submit { form } => {
                self.on_submit(cx, form);
            }
            PageEvent::Key { key, target } => self.on_key(cx, key, target),
            PageEvent::PointerEnter { target } => self.hover.on_enter(&mut *cx.document, target),
            PageEvent::PointerLeave { target } => self.hover.on_leave(&mut *cx.document, target),
            PageEvent::Frame => self.counters.on_frame(cx),
        }
        self.advance(cx);
    }

    /// Run every task due at or before `cx.now_ms`, in due order.
    pub fn advance(&mut self, cx: &mut Context<'_>) {
        while let Some(task) = self.tasks.pop_due(cx.now_ms) {
            match task.key {
                TaskKey::Reveal(Channel::Reveal, id) => self.reveals.run_delayed(cx, id),
                TaskKey::Reveal(Channel::SkillBars, id) => self.skill_bars.run_delayed(cx, id),
                TaskKey::Reveal(Channel::Counters, _) => {}
                TaskKey::FilterHide(card) => {
                    if let Some(filter) = &self.filter {
                        filter.on_hide_due(&mut *cx.document, card);
                    }
                }
                TaskKey::CounterStep(id) => {
                    self.counters.on_step(cx, &mut self.tasks, id, task.due_ms)
                }
                TaskKey::ToastDismiss(id) => {
                    self.toaster.on_dismiss_due(&mut *cx.document, id);
                }
                TaskKey::BodyFadeIn => self.fade_in_body(cx),
            }
        }
    }

    /// Show a toast through the page's notification slot.
    pub fn notify(&mut self, cx: &mut Context<'_>, message: &str, kind: NotificationKind) -> Uuid {
        self.toaster
            .notify(&mut *cx.document, &mut self.tasks, cx.now_ms, message, kind)
    }

    fn on_scroll(&mut self, cx: &mut Context<'_>, y: f64) {
        if let Some(header) = &mut self.header {
            if let Err(err) = header.on_scroll(&mut *cx.document, y) {
                tracing::debug!(error = %err, "header scroll skipped");
            }
        }
        if let Some(button) = &mut self.scroll_top {
            if let Err(err) = button.on_scroll(&mut *cx.document, y) {
                tracing::debug!(error = %err, "scroll-to-top skipped");
            }
        }
        self.parallax.on_scroll(&mut *cx.document, y);
    }

    fn on_intersection(&mut self, cx: &mut Context<'_>, channel: Channel, target: ElementId, visible: bool) {
        match channel {
            Channel::Reveal => {
                self.reveals.on_intersection(cx, &mut self.tasks, target, visible);
            }
            Channel::SkillBars => {
                self.skill_bars
                    .on_intersection(cx, &mut self.tasks, target, visible);
            }
            Channel::Counters => {
                self.counters
                    .on_intersection(cx, &mut self.tasks, target, visible);
            }
        }
    }

    // A nav link is also an anchor, so every control sees the click.
    fn on_click(&mut self, cx: &mut Context<'_>, target: ElementId) {
        if let Some(menu) = &mut self.menu {
            if let Err(err) = menu.on_click(&mut *cx.document, target) {
                tracing::debug!(error = %err, "menu click skipped");
            }
        }
        self.anchors.on_click(&mut *cx.document, target);
        if let Some(filter) = &mut self.filter {
            filter.on_click(&mut *cx.document, &mut self.tasks, cx.now_ms, target);
        }
        if let Some(button) = &self.scroll_top {
            button.on_click(&mut *cx.document, target);
        }
        if self.toaster.close_button() == Some(target) {
            self.toaster.dismiss(&mut *cx.document, &mut self.tasks);
        }
    }

    fn on_submit(&mut self, cx: &mut Context<'_>, form: ElementId) -> Option<SubmitOutcome> {
        let contact = self.contact.as_ref().filter(|contact| contact.form() == form)?;
        Some(contact.submit(&mut *cx.document, &mut self.toaster, &mut self.tasks, cx.now_ms))
    }

    fn on_key(&mut self, cx: &mut Context<'_>, key: Key, target: Option<ElementId>) {
        match key {
            Key::Escape => {
                if let Some(menu) = &mut self.menu {
                    if let Err(err) = menu.close(&mut *cx.document) {
                        tracing::debug!(error = %err, "menu close skipped");
                    }
                }
                self.toaster.dismiss(&mut *cx.document, &mut self.tasks);
            }
            Key::Enter | Key::Space => {
                if let (Some(filter), Some(target)) = (&mut self.filter, target) {
                    filter.on_click(&mut *cx.document, &mut self.tasks, cx.now_ms, target);
                }
            }
            Key::Other => {}
        }
    }

    fn fade_in_body(&mut self, cx: &mut Context<'_>) {
        let Some(body) = self.body else {
            return;
        };
        let faded = cx
            .document
            .set_style(body, "opacity", "1")
            .and_then(|()| cx.document.set_style(body, "transition", "opacity 0.5s ease"));
        if let Err(err) = faded {
            tracing::debug!(error = %err, "body fade-in skipped");
        }
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn tasks(&self) -> &TaskQueue {
        &self.tasks
    }

    /// When the host should next call [`Page::advance`], if ever.
    pub fn next_due(&self) -> Option<u64> {
        self.tasks.next_due()
    }

    pub fn reveals(&self) -> &RevealScheduler {
        &self.reveals
    }

    pub fn skill_bars(&self) -> &RevealScheduler {
        &self.skill_bars
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn menu(&self) -> Option<&MobileMenu> {
        self.menu.as_ref()
    }

    pub fn filter(&self) -> Option<&ProjectFilter> {
        self.filter.as_ref()
    }

    pub fn header(&self) -> Option<&HeaderScroll> {
        self.header.as_ref()
    }

    pub fn scroll_top(&self) -> Option<&ScrollTopButton> {
        self.scroll_top.as_ref()
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }
}
