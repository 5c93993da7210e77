//! HTML parsing.
//!
//! Turns fetched HTML into a [`PageModel`], the read-only view the SEO rules
//! evaluate. All parsing is done using CSS selectors via the `scraper` crate.

mod page;

// Re-export public API
pub use page::{Anchor, EmbeddedElement, LinkTag, MetaTag, PageModel, Script};
