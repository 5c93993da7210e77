//! SEO rule engine.
//!
//! Each rule is a pure function over the parsed page, the audited URL and the
//! link summary. [`SEO_RULES`] fixes both the rule set and the order issues are
//! reported in; every rule is evaluated, whatever the others return.

use std::sync::LazyLock;

use regex::Regex;
use strum_macros::{EnumIter, IntoStaticStr};

use super::links::LinkSummary;
use super::report::{assemble, AuditReport, Finding, Issue, ScorePolicy};
use crate::app::AuditTarget;
use crate::config::{MAX_META_DESCRIPTION_CHARS, MIN_BODY_WORD_COUNT, MIN_INTERNAL_LINKS};
use crate::parse::PageModel;

static URL_PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[a-z0-9-]+").expect("URL path pattern is a valid regex - this is a programming error")
});

/// Identifies an SEO rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum SeoCheck {
    Title,
    MetaDescription,
    MetaDescriptionLength,
    MetaKeywords,
    H1,
    RobotsMeta,
    ImageAlt,
    BrokenLinks,
    Canonical,
    OpenGraphTitle,
    Viewport,
    Hreflang,
    UrlPath,
    Https,
    SchemaMarkup,
    ContentLength,
    IframeTitles,
    InternalLinks,
}

/// Everything an SEO rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct SeoInput<'a> {
    pub page: &'a PageModel,
    pub target: &'a AuditTarget,
    pub links: &'a LinkSummary,
}

/// One row of the SEO rule table.
pub struct SeoRule {
    pub check: SeoCheck,
    pub deduction: i32,
    /// Returns the issue message when the rule is violated
    evaluate: fn(&SeoInput<'_>) -> Option<String>,
}

impl SeoRule {
    /// Evaluates the rule, returning a finding when it is violated.
    pub fn evaluate(&self, input: &SeoInput<'_>) -> Option<Finding> {
        (self.evaluate)(input).map(|message| Finding {
            issue: Issue::new(message),
            deduction: self.deduction,
        })
    }
}

/// SEO rules in reporting order.
pub static SEO_RULES: &[SeoRule] = &[
    SeoRule {
        check: SeoCheck::Title,
        deduction: 20,
        evaluate: |input| {
            input
                .page
                .title
                .is_none()
                .then(|| "Missing page title (<title>)".to_string())
        },
    },
    SeoRule {
        check: SeoCheck::MetaDescription,
        deduction: 20,
        evaluate: |input| {
            input
                .page
                .meta_by_name("description")
                .is_none()
                .then(|| "Missing meta description".to_string())
        },
    },
    SeoRule {
        check: SeoCheck::MetaDescriptionLength,
        deduction: 5,
        evaluate: |input| {
            input
                .page
                .meta_by_name("description")
                .filter(|description| description.chars().count() > MAX_META_DESCRIPTION_CHARS)
                .map(|_| {
                    format!(
                        "Meta description is too long (keep it under {MAX_META_DESCRIPTION_CHARS} characters)"
                    )
                })
        },
    },
    SeoRule {
        check: SeoCheck::MetaKeywords,
        deduction: 20,
        evaluate: |input| {
            input
                .page
                .meta_by_name("keywords")
                .is_none()
                .then(|| "Missing meta keywords".to_string())
        },
    },
    SeoRule {
        check: SeoCheck::H1,
        deduction: 20,
        evaluate: |input| {
            (!input.page.has_h1()).then(|| "Missing H1 heading".to_string())
        },
    },
    SeoRule {
        check: SeoCheck::RobotsMeta,
        deduction: 20,
        evaluate: |input| {
            input
                .page
                .meta_by_name("robots")
                .is_none()
                .then(|| "Missing robots meta tag".to_string())
        },
    },
    SeoRule {
        check: SeoCheck::ImageAlt,
        deduction: 10,
        evaluate: |input| match input.page.images_missing_alt() {
            0 => None,
            1 => Some("1 image is missing an alt attribute".to_string()),
            n => Some(format!("{n} images are missing an alt attribute")),
        },
    },
    SeoRule {
        check: SeoCheck::BrokenLinks,
        deduction: 10,
        evaluate: |input| match input.links.broken {
            0 => None,
            1 => Some("1 broken link found".to_string()),
            n => Some(format!("{n} broken links found")),
        },
    },
    SeoRule {
        check: SeoCheck::Canonical,
        deduction: 10,
        evaluate: |input| {
            input
                .page
                .link_href_by_rel("canonical")
                .is_none()
                .then(|| "Missing canonical link".to_string())
        },
    },
    SeoRule {
        check: SeoCheck::OpenGraphTitle,
        deduction: 10,
        evaluate: |input| {
            input
                .page
                .meta_by_property("og:title")
                .is_none()
                .then(|| "Missing Open Graph title (og:title)".to_string())
        },
    },
    SeoRule {
        check: SeoCheck::Viewport,
        deduction: 10,
        evaluate: |input| {
            input
                .page
                .meta_by_name("viewport")
                .is_none()
                .then(|| "Missing viewport meta tag".to_string())
        },
    },
    SeoRule {
        check: SeoCheck::Hreflang,
        deduction: 10,
        evaluate: |input| {
            (!input.page.has_hreflang_alternate())
                .then(|| "Missing hreflang links for alternate language versions".to_string())
        },
    },
    SeoRule {
        check: SeoCheck::UrlPath,
        deduction: 10,
        evaluate: |input| {
            (!URL_PATH_PATTERN.is_match(input.target.path()))
                .then(|| "URL path is not SEO-friendly".to_string())
        },
    },
    SeoRule {
        check: SeoCheck::Https,
        deduction: 10,
        evaluate: |input| {
            (!input.target.is_https()).then(|| "Page is not served over HTTPS".to_string())
        },
    },
    SeoRule {
        check: SeoCheck::SchemaMarkup,
        deduction: 10,
        evaluate: |input| {
            (!input.page.has_script_type("application/ld+json"))
                .then(|| "Missing schema markup (JSON-LD)".to_string())
        },
    },
    SeoRule {
        check: SeoCheck::ContentLength,
        deduction: 10,
        evaluate: |input| {
            (input.page.word_count() < MIN_BODY_WORD_COUNT).then(|| {
                format!("Content is too short (at least {MIN_BODY_WORD_COUNT} words recommended)")
            })
        },
    },
    SeoRule {
        check: SeoCheck::IframeTitles,
        deduction: 5,
        evaluate: |input| match input.page.iframes_missing_title() {
            0 => None,
            1 => Some("1 iframe is missing a title attribute".to_string()),
            n => Some(format!("{n} iframes are missing a title attribute")),
        },
    },
    SeoRule {
        check: SeoCheck::InternalLinks,
        deduction: 5,
        evaluate: |input| {
            (count_internal_links(input.page, input.target) < MIN_INTERNAL_LINKS)
                .then(|| "Add more internal links to improve SEO".to_string())
        },
    },
];

/// Counts anchors whose href starts with the audited URL as submitted.
///
/// Anchors without an href never match.
pub fn count_internal_links(page: &PageModel, target: &AuditTarget) -> usize {
    page.hrefs()
        .filter(|href| href.starts_with(target.as_str()))
        .count()
}

/// Evaluates every SEO rule and assembles the report.
pub fn evaluate_seo(input: &SeoInput<'_>, policy: ScorePolicy) -> AuditReport {
    let findings = SEO_RULES.iter().filter_map(|rule| {
        let finding = rule.evaluate(input);
        if finding.is_some() {
            let name: &'static str = rule.check.into();
            log::trace!("SEO rule {name} triggered for {}", input.target.as_str());
        }
        finding
    });
    assemble(input.target.as_str(), findings, policy)
}
