//! Page model extraction.
//!
//! Parses an HTML document once and keeps only what the SEO rules query:
//! title, meta tags, link tags, images, iframes, anchors, scripts, `h1`
//! headings and body text.

use std::collections::HashMap;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::utils::parse_selector_with_fallback;

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("title", "title extraction"));
static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("meta", "meta tag extraction"));
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("link", "link tag extraction"));
static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("img", "image extraction"));
static IFRAME_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("iframe", "iframe extraction"));
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("a", "anchor extraction"));
static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("script", "script extraction"));
static H1_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("h1", "heading extraction"));
static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("body", "body text extraction"));

/// A `<meta>` tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaTag {
    pub name: Option<String>,
    pub property: Option<String>,
    pub content: Option<String>,
}

/// A `<link>` tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkTag {
    pub rel: Option<String>,
    pub href: Option<String>,
    pub hreflang: Option<String>,
}

impl LinkTag {
    /// Returns true when `rel` contains `token` (rel is a space-separated list).
    pub fn has_rel(&self, token: &str) -> bool {
        self.rel
            .as_deref()
            .is_some_and(|rel| rel.split_whitespace().any(|t| t.eq_ignore_ascii_case(token)))
    }
}

/// An embedded element (`<img>`, `<iframe>`) and its attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddedElement {
    pub attributes: HashMap<String, String>,
}

impl EmbeddedElement {
    /// Returns true when the attribute is present, even with an empty value.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}

/// An `<a>` element. `href` is `None` when the attribute is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anchor {
    pub href: Option<String>,
}

/// A `<script>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub script_type: Option<String>,
}

/// Read-only view of a parsed page.
///
/// Built once per audit by [`PageModel::parse`] and never mutated afterwards.
/// Elements keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageModel {
    pub title: Option<String>,
    pub meta_tags: Vec<MetaTag>,
    pub link_tags: Vec<LinkTag>,
    pub images: Vec<EmbeddedElement>,
    pub iframes: Vec<EmbeddedElement>,
    pub anchors: Vec<Anchor>,
    pub scripts: Vec<Script>,
    pub h1_texts: Vec<String>,
    pub body_text: String,
}

impl PageModel {
    /// Parses an HTML document into a page model.
    ///
    /// Parsing is lenient: malformed markup yields whatever html5ever recovers,
    /// never an error.
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        Self::from_document(&document)
    }

    /// Builds a page model from an already parsed document.
    pub fn from_document(document: &Html) -> Self {
        let title = document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|element| element_text(&element))
            .filter(|title| !title.is_empty());

        let meta_tags = document
            .select(&META_SELECTOR)
            .map(|element| MetaTag {
                name: attr(&element, "name"),
                property: attr(&element, "property"),
                content: attr(&element, "content"),
            })
            .collect();

        let link_tags = document
            .select(&LINK_SELECTOR)
            .map(|element| LinkTag {
                rel: attr(&element, "rel"),
                href: attr(&element, "href"),
                hreflang: attr(&element, "hreflang"),
            })
            .collect();

        let anchors = document
            .select(&ANCHOR_SELECTOR)
            .map(|element| Anchor {
                href: attr(&element, "href"),
            })
            .collect();

        let scripts = document
            .select(&SCRIPT_SELECTOR)
            .map(|element| Script {
                script_type: attr(&element, "type"),
            })
            .collect();

        let h1_texts = document
            .select(&H1_SELECTOR)
            .map(|element| element_text(&element))
            .collect();

        // Text nodes are joined with a space so words in adjacent elements
        // (`<p>one</p><p>two</p>`) are not glued together
        let body_text = document
            .select(&BODY_SELECTOR)
            .next()
            .map(|body| body.text().collect::<Vec<_>>().join(" "))
            .unwrap_or_default();

        let page = Self {
            title,
            meta_tags,
            link_tags,
            images: embedded(document, &IMG_SELECTOR),
            iframes: embedded(document, &IFRAME_SELECTOR),
            anchors,
            scripts,
            h1_texts,
            body_text,
        };

        log::debug!(
            "Parsed page: {} meta, {} link, {} img, {} iframe, {} anchors, {} scripts, {} words",
            page.meta_tags.len(),
            page.link_tags.len(),
            page.images.len(),
            page.iframes.len(),
            page.anchors.len(),
            page.scripts.len(),
            page.word_count()
        );

        page
    }

    /// Content of the first `<meta name=...>` with the given name.
    ///
    /// Returns `None` when the tag is missing or has an empty `content`.
    pub fn meta_by_name(&self, name: &str) -> Option<&str> {
        self.meta_tags
            .iter()
            .find(|meta| {
                meta.name
                    .as_deref()
                    .is_some_and(|n| n.eq_ignore_ascii_case(name))
            })
            .and_then(|meta| non_empty(meta.content.as_deref()))
    }

    /// Content of the first `<meta property=...>` with the given property.
    pub fn meta_by_property(&self, property: &str) -> Option<&str> {
        self.meta_tags
            .iter()
            .find(|meta| {
                meta.property
                    .as_deref()
                    .is_some_and(|p| p.eq_ignore_ascii_case(property))
            })
            .and_then(|meta| non_empty(meta.content.as_deref()))
    }

    /// `href` of the first `<link>` whose `rel` contains `rel`.
    pub fn link_href_by_rel(&self, rel: &str) -> Option<&str> {
        self.link_tags
            .iter()
            .find(|link| link.has_rel(rel))
            .and_then(|link| non_empty(link.href.as_deref()))
    }

    /// Returns true when any `<link rel="alternate">` carries an `hreflang` attribute.
    pub fn has_hreflang_alternate(&self) -> bool {
        self.link_tags
            .iter()
            .any(|link| link.has_rel("alternate") && link.hreflang.is_some())
    }

    /// Returns true when any `<script>` declares the given `type`.
    pub fn has_script_type(&self, script_type: &str) -> bool {
        self.scripts.iter().any(|script| {
            script
                .script_type
                .as_deref()
                .is_some_and(|t| t.trim().eq_ignore_ascii_case(script_type))
        })
    }

    /// Returns true when at least one `<h1>` has non-blank text.
    pub fn has_h1(&self) -> bool {
        self.h1_texts.iter().any(|text| !text.is_empty())
    }

    /// Number of images without an `alt` attribute.
    pub fn images_missing_alt(&self) -> usize {
        self.images
            .iter()
            .filter(|img| !img.has_attribute("alt"))
            .count()
    }

    /// Number of iframes without a `title` attribute.
    pub fn iframes_missing_title(&self) -> usize {
        self.iframes
            .iter()
            .filter(|iframe| !iframe.has_attribute("title"))
            .count()
    }

    /// Number of whitespace-separated words in the body text.
    ///
    /// Runs of whitespace count as one separator and empty tokens are never
    /// counted, so a blank body has zero words.
    pub fn word_count(&self) -> usize {
        self.body_text.split_whitespace().count()
    }

    /// Hrefs of all anchors that have one, in document order.
    pub fn hrefs(&self) -> impl Iterator<Item = &str> {
        self.anchors.iter().filter_map(|a| a.href.as_deref())
    }
}

fn attr(element: &ElementRef<'_>, name: &str) -> Option<String> {
    element.value().attr(name).map(str::to_string)
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn embedded(document: &Html, selector: &Selector) -> Vec<EmbeddedElement> {
    document
        .select(selector)
        .map(|element| EmbeddedElement {
            attributes: element
                .value()
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        })
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
