//! End-to-end flows driving a `Page` over the in-memory host.

use vitrine::config::{BehaviorConfig, ConfigBuilder, CounterStrategy};
use vitrine::core::RevealState;
use vitrine::host::memory::{ElementSpec, MemoryDocument, RecordingObserver, ScrollRequest};
use vitrine::host::{Channel, Context, Document, ElementId, ScrollBehavior};
use vitrine::notify::NotificationKind;
use vitrine::page::{Key, Page, PageEvent};
use vitrine::reveal::{DELAY_ATTRIBUTE, REVEALED_CLASS, WIDTH_ATTRIBUTE};

/// Node handles of the sample portfolio.
struct Portfolio {
    header: ElementId,
    menu_button: ElementId,
    nav_links: ElementId,
    overlay: ElementId,
    nav_about: ElementId,
    about: ElementId,
    delayed_tile: ElementId,
    skills: ElementId,
    bar: ElementId,
    stat: ElementId,
    filter_all: ElementId,
    filter_web: ElementId,
    web_card: ElementId,
    app_card: ElementId,
    form: ElementId,
    name: ElementId,
    email: ElementId,
    subject: ElementId,
    message: ElementId,
    notification: ElementId,
    notification_close: ElementId,
    scroll_top: ElementId,
}

fn portfolio(doc: &mut MemoryDocument) -> Portfolio {
    let body = doc.insert(ElementSpec::new("body"));
    let header = doc.insert_child(body, ElementSpec::new("header").id("header"));
    let menu_button = doc.insert_child(header, ElementSpec::new("button").id("mobileMenuBtn"));
    let nav_links = doc.insert_child(header, ElementSpec::new("ul").id("navLinks").class("nav-links"));
    let nav_about = doc.insert_child(nav_links, ElementSpec::new("a").attr("href", "#about"));
    let overlay = doc.insert_child(body, ElementSpec::new("div").id("mobileMenuOverlay"));

    let about = doc.insert_child(body, ElementSpec::new("section").id("about").offset_top(900.0));
    let delayed_tile = doc.insert_child(
        about,
        ElementSpec::new("div")
            .attr("data-animate", "zoom-in")
            .attr(DELAY_ATTRIBUTE, "300"),
    );
    let stat = doc.insert_child(
        about,
        ElementSpec::new("span")
            .class("stat-item")
            .attr("data-count", "50+")
            .text("50+"),
    );

    let skills = doc.insert_child(body, ElementSpec::new("section").id("skills").offset_top(1800.0));
    let bar = doc.insert_child(
        skills,
        ElementSpec::new("div").class("progress").attr(WIDTH_ATTRIBUTE, "90"),
    );

    let projects = doc.insert_child(body, ElementSpec::new("section").id("projects"));
    let filter_all = doc.insert_child(
        projects,
        ElementSpec::new("button").class("filter-btn").attr("data-filter", "all"),
    );
    let filter_web = doc.insert_child(
        projects,
        ElementSpec::new("button").class("filter-btn").attr("data-filter", "web"),
    );
    let web_card = doc.insert_child(
        projects,
        ElementSpec::new("div").class("project-card").attr("data-category", "web"),
    );
    let app_card = doc.insert_child(
        projects,
        ElementSpec::new("div").class("project-card").attr("data-category", "app"),
    );

    let form = doc.insert_child(body, ElementSpec::new("form").id("contactForm"));
    let name = doc.insert_child(form, ElementSpec::new("input").id("name"));
    let email = doc.insert_child(form, ElementSpec::new("input").id("email"));
    let subject = doc.insert_child(form, ElementSpec::new("input").id("subject"));
    let message = doc.insert_child(form, ElementSpec::new("textarea").id("message"));

    let notification = doc.insert_child(body, ElementSpec::new("div").id("notification"));
    let notification_close = doc.insert_child(
        notification,
        ElementSpec::new("button").class("notification-close"),
    );
    let scroll_top = doc.insert_child(body, ElementSpec::new("button").id("scrollTop"));

    Portfolio {
        header,
        menu_button,
        nav_links,
        overlay,
        nav_about,
        about,
        delayed_tile,
        skills,
        bar,
        stat,
        filter_all,
        filter_web,
        web_card,
        app_card,
        form,
        name,
        email,
        subject,
        message,
        notification,
        notification_close,
        scroll_top,
    }
}

fn seen(channel: Channel, target: ElementId) -> PageEvent {
    PageEvent::Intersection {
        channel,
        target,
        visible: true,
    }
}

fn fill(doc: &mut MemoryDocument, p: &Portfolio, values: [&str; 4]) {
    for (field, value) in [p.name, p.email, p.subject, p.message].into_iter().zip(values) {
        doc.set_value(field, value).unwrap();
    }
}

#[test]
fn start_observes_every_participant() {
    let mut doc = MemoryDocument::new();
    let mut observer = RecordingObserver::new();
    let p = portfolio(&mut doc);

    let mut cx = Context::new(&mut doc, &mut observer, 0);
    let page = Page::start(BehaviorConfig::default(), &mut cx);

    assert_eq!(page.reveals().registered(), 4);
    assert!(observer.is_observed(Channel::Reveal, p.about));
    assert!(observer.is_observed(Channel::Reveal, p.delayed_tile));
    assert!(observer.is_observed(Channel::SkillBars, p.skills));
    assert!(observer.is_observed(Channel::Counters, p.stat));
    assert_eq!(doc.style(p.web_card, "animation-delay"), Some("0s"));
    assert_eq!(doc.style(p.app_card, "animation-delay"), Some("0.2s"));
}

#[test]
fn reveals_fire_once_and_stop_observing() {
    let mut doc = MemoryDocument::new();
    let mut observer = RecordingObserver::new();
    let p = portfolio(&mut doc);

    let mut cx = Context::new(&mut doc, &mut observer, 0);
    let mut page = Page::start(BehaviorConfig::default(), &mut cx);
    for now in [10, 20, 30] {
        cx.now_ms = now;
        page.handle(&mut cx, seen(Channel::Reveal, p.about));
    }

    let history = page.reveals().history(p.about).unwrap().clone();
    assert_eq!(page.reveals().state_of(p.about), Some(RevealState::Fired));
    assert_eq!(history.entered_at(&RevealState::Fired), Some(10));
    assert_eq!(history.transitions().len(), 2);
    assert!(!observer.is_observed(Channel::Reveal, p.about));
    assert!(doc.has_class(p.about, REVEALED_CLASS));
    assert!(doc.has_class(p.about, "fade-up"));
    assert_eq!(doc.style(p.about, "opacity"), Some("1"));
}

#[test]
fn delayed_reveal_waits_for_its_delay() {
    let mut doc = MemoryDocument::new();
    let mut observer = RecordingObserver::new();
    let p = portfolio(&mut doc);

    let mut cx = Context::new(&mut doc, &mut observer, 0);
    let mut page = Page::start(BehaviorConfig::default(), &mut cx);
    cx.now_ms = 1_000;
    page.handle(&mut cx, seen(Channel::Reveal, p.delayed_tile));
    assert_eq!(page.reveals().state_of(p.delayed_tile), Some(RevealState::Firing));
    assert_eq!(page.next_due(), Some(1_300));

    cx.now_ms = 1_299;
    page.advance(&mut cx);
    assert_eq!(page.reveals().state_of(p.delayed_tile), Some(RevealState::Firing));

    cx.now_ms = 1_300;
    page.advance(&mut cx);
    assert_eq!(page.reveals().state_of(p.delayed_tile), Some(RevealState::Fired));
    assert!(doc.has_class(p.delayed_tile, "zoom-in"));
}

#[test]
fn maximal_reveal_delay_stays_pending() {
    let mut doc = MemoryDocument::new();
    let mut observer = RecordingObserver::new();
    let p = portfolio(&mut doc);
    doc.set_attribute(p.delayed_tile, DELAY_ATTRIBUTE, "18446744073709551615")
        .unwrap();

    let mut cx = Context::new(&mut doc, &mut observer, 10);
    let mut page = Page::start(BehaviorConfig::default(), &mut cx);
    page.handle(&mut cx, seen(Channel::Reveal, p.delayed_tile));

    assert_eq!(page.reveals().state_of(p.delayed_tile), Some(RevealState::Firing));
    assert_eq!(page.next_due(), Some(u64::MAX));
    assert!(!doc.has_class(p.delayed_tile, REVEALED_CLASS));
}

#[test]
fn delayed_reveal_of_removed_element_is_skipped() {
    let mut doc = MemoryDocument::new();
    let mut observer = RecordingObserver::new();
    let p = portfolio(&mut doc);

    let mut page = {
        let mut cx = Context::new(&mut doc, &mut observer, 0);
        let mut page = Page::start(BehaviorConfig::default(), &mut cx);
        page.handle(&mut cx, seen(Channel::Reveal, p.delayed_tile));
        page
    };
    doc.remove(p.delayed_tile);

    let mut cx = Context::new(&mut doc, &mut observer, 500);
    page.advance(&mut cx);

    assert_eq!(page.reveals().state_of(p.delayed_tile), Some(RevealState::Fired));
    assert!(page.tasks().is_empty());
}

#[test]
fn skill_bars_fill_when_section_appears() {
    let mut doc = MemoryDocument::new();
    let mut observer = RecordingObserver::new();
    let p = portfolio(&mut doc);

    let mut cx = Context::new(&mut doc, &mut observer, 0);
    let mut page = Page::start(BehaviorConfig::default(), &mut cx);
    page.handle(&mut cx, seen(Channel::SkillBars, p.skills));

    assert_eq!(page.skill_bars().state_of(p.skills), Some(RevealState::Fired));
    assert_eq!(page.reveals().state_of(p.skills), Some(RevealState::Pending));
    assert_eq!(doc.style(p.bar, "width"), Some("90%"));
}

#[test]
fn counter_counts_to_fifty_plus() {
    let mut doc = MemoryDocument::new();
    let mut observer = RecordingObserver::new();
    let p = portfolio(&mut doc);

    let mut cx = Context::new(&mut doc, &mut observer, 0);
    let mut page = Page::start(BehaviorConfig::default(), &mut cx);
    page.handle(&mut cx, seen(Channel::Counters, p.stat));

    let mut shown = vec![page.counters().displayed(p.stat).unwrap()];
    for now in (100..=2_100).step_by(100) {
        cx.now_ms = now;
        page.advance(&mut cx);
        shown.push(page.counters().displayed(p.stat).unwrap());
    }

    assert!(shown.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(shown.iter().all(|&value| value <= 50));
    assert_eq!(shown.last(), Some(&50));
    assert_eq!(page.counters().state_of(p.stat), Some(RevealState::Fired));
    assert_eq!(doc.text(p.stat).as_deref(), Some("50+"));
}

#[test]
fn frame_counter_finishes_on_frames() {
    let mut doc = MemoryDocument::new();
    let mut observer = RecordingObserver::new();
    let p = portfolio(&mut doc);
    let config = ConfigBuilder::new()
        .counter_strategy(CounterStrategy::Frame)
        .build()
        .unwrap();

    let mut cx = Context::new(&mut doc, &mut observer, 0);
    let mut page = Page::start(config, &mut cx);
    page.handle(&mut cx, seen(Channel::Counters, p.stat));

    let mut last = 0;
    for now in (16..=2_016).step_by(16) {
        cx.now_ms = now;
        page.handle(&mut cx, PageEvent::Frame);
        let value = page.counters().displayed(p.stat).unwrap();
        assert!(value >= last);
        last = value;
    }

    assert_eq!(last, 50);
    assert_eq!(doc.text(p.stat).as_deref(), Some("50+"));
}

#[test]
fn filter_shows_exactly_the_selected_category() {
    let mut doc = MemoryDocument::new();
    let mut observer = RecordingObserver::new();
    let p = portfolio(&mut doc);

    let mut cx = Context::new(&mut doc, &mut observer, 0);
    let mut page = Page::start(BehaviorConfig::default(), &mut cx);
    page.handle(&mut cx, PageEvent::Click { target: p.filter_web });
    cx.now_ms = 300;
    page.advance(&mut cx);

    assert_eq!(doc.style(p.web_card, "display"), Some("block"));
    assert_eq!(doc.style(p.app_card, "display"), Some("none"));

    let mut cx = Context::new(&mut doc, &mut observer, 400);
    page.handle(&mut cx, PageEvent::Click { target: p.filter_all });
    cx.now_ms = 1_000;
    page.advance(&mut cx);

    assert_eq!(doc.style(p.web_card, "display"), Some("block"));
    assert_eq!(doc.style(p.app_card, "display"), Some("block"));
    assert_eq!(doc.style(p.app_card, "opacity"), Some("1"));
}

#[test]
fn keyboard_activates_filter_buttons() {
    let mut doc = MemoryDocument::new();
    let mut observer = RecordingObserver::new();
    let p = portfolio(&mut doc);

    let mut cx = Context::new(&mut doc, &mut observer, 0);
    let mut page = Page::start(BehaviorConfig::default(), &mut cx);
    page.handle(
        &mut cx,
        PageEvent::Key {
            key: Key::Space,
            target: Some(p.filter_web),
        },
    );

    assert_eq!(page.filter().map(|filter| filter.selected()), Some("web"));
    assert_eq!(doc.attribute(p.filter_web, "aria-pressed").as_deref(), Some("true"));
}

#[test]
fn contact_form_rejects_missing_subject() {
    let mut doc = MemoryDocument::new();
    let mut observer = RecordingObserver::new();
    let p = portfolio(&mut doc);
    fill(&mut doc, &p, ["Jo", "jo@x.co", "", "Hello"]);

    let mut cx = Context::new(&mut doc, &mut observer, 0);
    let mut page = Page::start(BehaviorConfig::default(), &mut cx);
    page.handle(&mut cx, PageEvent::Submit { form: p.form });

    let toast = page.toaster().current().unwrap();
    assert_eq!(toast.kind, NotificationKind::Error);
    assert_eq!(doc.value(p.name).as_deref(), Some("Jo"));
    assert_eq!(doc.value(p.message).as_deref(), Some("Hello"));
    assert!(doc.has_class(p.notification, "error"));
}

#[test]
fn contact_form_accepts_and_clears() {
    let mut doc = MemoryDocument::new();
    let mut observer = RecordingObserver::new();
    let p = portfolio(&mut doc);
    fill(&mut doc, &p, ["Jo", "jo@x.co", "Hi", "Hello"]);

    let mut cx = Context::new(&mut doc, &mut observer, 0);
    let mut page = Page::start(BehaviorConfig::default(), &mut cx);
    page.handle(&mut cx, PageEvent::Submit { form: p.form });

    let toast = page.toaster().current().unwrap().clone();
    assert_eq!(toast.kind, NotificationKind::Success);
    assert!(toast.message.contains("Jo"));
    assert!(toast.message.contains("jo@x.co"));

    cx.now_ms = 5_000;
    page.advance(&mut cx);
    assert!(page.toaster().current().is_none());

    for field in [p.name, p.email, p.subject, p.message] {
        assert_eq!(doc.value(field).as_deref(), Some(""));
    }
    assert!(!doc.has_class(p.notification, "show"));
}

#[test]
fn toast_close_button_and_escape_dismiss() {
    let mut doc = MemoryDocument::new();
    let mut observer = RecordingObserver::new();
    let p = portfolio(&mut doc);

    let mut cx = Context::new(&mut doc, &mut observer, 0);
    let mut page = Page::start(BehaviorConfig::default(), &mut cx);

    page.notify(&mut cx, "Hello", NotificationKind::Success);
    page.handle(&mut cx, PageEvent::Click { target: p.notification_close });
    assert!(page.toaster().current().is_none());

    page.notify(&mut cx, "Again", NotificationKind::Error);
    page.handle(&mut cx, PageEvent::Key { key: Key::Escape, target: None });
    assert!(page.toaster().current().is_none());
    assert!(page.tasks().is_empty());
}

#[test]
fn header_hides_and_returns() {
    let mut doc = MemoryDocument::new();
    let mut observer = RecordingObserver::new();
    let p = portfolio(&mut doc);

    let mut cx = Context::new(&mut doc, &mut observer, 0);
    let mut page = Page::start(BehaviorConfig::default(), &mut cx);
    for y in [0.0, 50.0, 100.0, 150.0] {
        page.handle(&mut cx, PageEvent::Scroll { y });
    }
    assert!(page.header().unwrap().is_hidden());

    page.handle(&mut cx, PageEvent::Scroll { y: 80.0 });
    assert!(!page.header().unwrap().is_hidden());
    assert!(page.header().unwrap().is_scrolled());

    page.handle(&mut cx, PageEvent::Scroll { y: 30.0 });
    assert!(!page.header().unwrap().is_scrolled());
    assert!(!doc.has_class(p.header, "scrolled"));
}

#[test]
fn scroll_top_appears_and_scrolls_home() {
    let mut doc = MemoryDocument::new();
    let mut observer = RecordingObserver::new();
    let p = portfolio(&mut doc);

    let mut cx = Context::new(&mut doc, &mut observer, 0);
    let mut page = Page::start(BehaviorConfig::default(), &mut cx);
    page.handle(&mut cx, PageEvent::Scroll { y: 640.0 });
    assert!(page.scroll_top().unwrap().is_visible());
    page.handle(&mut cx, PageEvent::Click { target: p.scroll_top });

    assert!(doc.has_class(p.scroll_top, "visible"));
    assert_eq!(
        doc.scroll_requests().last(),
        Some(&ScrollRequest {
            top: 0.0,
            behavior: ScrollBehavior::Smooth
        })
    );
}

#[test]
fn nav_link_closes_menu_and_scrolls_to_section() {
    let mut doc = MemoryDocument::new();
    let mut observer = RecordingObserver::new();
    let p = portfolio(&mut doc);

    let mut cx = Context::new(&mut doc, &mut observer, 0);
    let mut page = Page::start(BehaviorConfig::default(), &mut cx);
    page.handle(&mut cx, PageEvent::Click { target: p.menu_button });
    assert!(page.menu().unwrap().is_open());

    page.handle(&mut cx, PageEvent::Click { target: p.nav_about });

    assert!(!page.menu().unwrap().is_open());
    assert!(!doc.has_class(p.nav_links, "active"));
    assert!(!doc.has_class(p.overlay, "active"));
    assert_eq!(
        doc.scroll_requests().last(),
        Some(&ScrollRequest {
            top: 820.0,
            behavior: ScrollBehavior::Smooth
        })
    );
}

#[test]
fn escape_closes_the_menu() {
    let mut doc = MemoryDocument::new();
    let mut observer = RecordingObserver::new();
    let p = portfolio(&mut doc);

    let mut cx = Context::new(&mut doc, &mut observer, 0);
    let mut page = Page::start(BehaviorConfig::default(), &mut cx);
    page.handle(&mut cx, PageEvent::Click { target: p.menu_button });
    page.handle(&mut cx, PageEvent::Key { key: Key::Escape, target: None });

    assert!(!page.menu().unwrap().is_open());
    assert_eq!(doc.attribute(p.menu_button, "aria-expanded").as_deref(), Some("false"));
}

#[test]
fn hover_floats_cards() {
    let mut doc = MemoryDocument::new();
    let mut observer = RecordingObserver::new();
    let p = portfolio(&mut doc);

    let mut cx = Context::new(&mut doc, &mut observer, 0);
    let mut page = Page::start(BehaviorConfig::default(), &mut cx);
    page.handle(&mut cx, PageEvent::PointerEnter { target: p.web_card });
    assert!(cx.document.has_class(p.web_card, "float-animation"));
    page.handle(&mut cx, PageEvent::PointerLeave { target: p.web_card });

    assert!(!doc.has_class(p.web_card, "float-animation"));
}
