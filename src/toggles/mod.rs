//! Small stateful page controls.
//!
//! Each control captures its nodes once at start and becomes `None` (or
//! empty) when they are missing, so the page never has to check for them
//! again.

mod anchors;
mod filter;
mod header;
mod hover;
mod menu;
mod parallax;
mod scroll_top;

pub use anchors::AnchorScroller;
pub use filter::{ProjectFilter, ALL, CATEGORY_ATTRIBUTE, FILTER_ATTRIBUTE};
pub use header::{HeaderScroll, SCROLLED_CLASS};
pub use hover::{HoverFloat, FLOAT_CLASS};
pub use menu::{MobileMenu, ACTIVE_CLASS, CLOSED_ICON, OPEN_ICON};
pub use parallax::{Parallax, SPEED_ATTRIBUTE};
pub use scroll_top::{ScrollTopButton, VISIBLE_CLASS};
