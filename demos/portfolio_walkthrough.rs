//! Portfolio Walkthrough
//!
//! Drives a small portfolio page through a simulated visit: the page loads,
//! the visitor scrolls down past the about section and the stats, filters the
//! projects and sends the contact form.
//!
//! Key concepts:
//! - Page built once from configuration
//! - Intersection events arming one-shot reveals
//! - Delayed work drained on the host clock
//!
//! Run with: RUST_LOG=vitrine=trace cargo run --example portfolio_walkthrough

use tracing_subscriber::EnvFilter;
use vitrine::host::memory::{ElementSpec, MemoryDocument, RecordingObserver};
use vitrine::host::{Channel, Context, Document};
use vitrine::page::{Page, PageEvent};
use vitrine::{BehaviorConfig, ElementId};

fn seen(channel: Channel, target: ElementId) -> PageEvent {
    PageEvent::Intersection {
        channel,
        target,
        visible: true,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Portfolio Walkthrough ===\n");

    let mut doc = MemoryDocument::new();
    let body = doc.insert(ElementSpec::new("body"));
    doc.insert_child(body, ElementSpec::new("header").id("header"));
    let about = doc.insert_child(body, ElementSpec::new("section").id("about"));
    let stat = doc.insert_child(about, ElementSpec::new("span").attr("data-count", "120+"));
    let projects = doc.insert_child(body, ElementSpec::new("section").id("projects"));
    let web = doc.insert_child(
        projects,
        ElementSpec::new("button").class("filter-btn").attr("data-filter", "web"),
    );
    let cards = ["web", "app", "web"].map(|category| {
        doc.insert_child(
            projects,
            ElementSpec::new("div").class("project-card").attr("data-category", category),
        )
    });
    let form = doc.insert_child(body, ElementSpec::new("form").id("contactForm"));
    for (id, value) in [("name", "Jo"), ("email", "jo@x.co"), ("subject", "Hi"), ("message", "Hello")] {
        doc.insert_child(form, ElementSpec::new("input").id(id).value(value));
    }

    let mut observer = RecordingObserver::new();
    let mut cx = Context::new(&mut doc, &mut observer, 0);
    let mut page = Page::start(BehaviorConfig::default(), &mut cx);
    page.handle(&mut cx, PageEvent::Loaded);
    println!("Page started, {} reveal participants", page.reveals().registered());

    cx.now_ms = 400;
    page.handle(&mut cx, PageEvent::Scroll { y: 420.0 });
    page.handle(&mut cx, seen(Channel::Reveal, about));
    page.handle(&mut cx, seen(Channel::Counters, stat));
    println!("About section: {:?}", page.reveals().state_of(about));

    cx.now_ms = 2_400;
    page.advance(&mut cx);
    println!("Counter shows {:?}", cx.document.text(stat));

    page.handle(&mut cx, PageEvent::Click { target: web });
    cx.now_ms = 2_700;
    page.advance(&mut cx);
    let visible = cards
        .iter()
        .filter(|&&card| page.filter().is_some_and(|filter| filter.matches(&*cx.document, card)))
        .count();
    println!("Filter 'web' keeps {visible} of {} cards", cards.len());

    page.handle(&mut cx, PageEvent::Submit { form });
    if let Some(toast) = page.toaster().current() {
        println!("Toast ({:?}): {}", toast.kind, toast.message);
    }

    println!("\n=== Walkthrough Complete ===");
}
