//! Listing page extraction strategies
//!
//! Google Play markup changes over time, so each field is read by an ordered
//! list of strategies and the first non-empty hit wins. Supporting a new
//! layout means adding a strategy here; the lookup flow does not change.

use scraper::{Html, Selector};

/// Suffix Google Play appends to listing page titles
pub const TITLE_SUFFIX: &str = " - Apps on Google Play";

/// Reads one text value out of a parsed page
pub trait TextExtractor: Send + Sync {
    /// Short identifier used in logs
    fn describe(&self) -> String;

    /// Return the trimmed value, or `None` when this layout does not match
    fn extract(&self, doc: &Html) -> Option<String>;
}

/// Text of the first element matching a CSS selector
#[derive(Debug, Clone)]
pub struct FirstText {
    selector: String,
}

impl FirstText {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }
}

impl TextExtractor for FirstText {
    fn describe(&self) -> String {
        format!("first-text({})", self.selector)
    }

    fn extract(&self, doc: &Html) -> Option<String> {
        let selector = Selector::parse(&self.selector).ok()?;
        let element = doc.select(&selector).next()?;
        non_empty(element.text().collect::<String>())
    }
}

/// Page `<title>` with a known suffix removed.
///
/// Titles without the suffix are not listing pages and yield nothing.
#[derive(Debug, Clone)]
pub struct TitleWithSuffix {
    suffix: String,
}

impl TitleWithSuffix {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl TextExtractor for TitleWithSuffix {
    fn describe(&self) -> String {
        format!("title-suffix({})", self.suffix.trim())
    }

    fn extract(&self, doc: &Html) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        let title = doc.select(&selector).next()?.text().collect::<String>();
        let title = title.trim();
        let stripped = title.strip_suffix(&self.suffix)?;
        non_empty(stripped.to_string())
    }
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Fields read from a listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFields {
    pub name: Option<String>,
    pub publisher: Option<String>,
}

/// Ordered strategy lists for each listing field
pub struct ListingExtractor {
    name: Vec<Box<dyn TextExtractor>>,
    publisher: Vec<Box<dyn TextExtractor>>,
}

impl ListingExtractor {
    /// An extractor with no strategies
    pub fn empty() -> Self {
        Self {
            name: Vec::new(),
            publisher: Vec::new(),
        }
    }

    /// Append a name strategy, tried after the existing ones
    pub fn with_name<E: TextExtractor + 'static>(mut self, extractor: E) -> Self {
        self.name.push(Box::new(extractor));
        self
    }

    /// Append a publisher strategy, tried after the existing ones
    pub fn with_publisher<E: TextExtractor + 'static>(mut self, extractor: E) -> Self {
        self.publisher.push(Box::new(extractor));
        self
    }

    /// Parse a page and run every strategy list
    pub fn extract(&self, html: &str) -> ListingFields {
        let doc = Html::parse_document(html);
        ListingFields {
            name: first_hit(&self.name, &doc),
            publisher: first_hit(&self.publisher, &doc),
        }
    }
}

impl Default for ListingExtractor {
    /// Layouts seen on Google Play so far, oldest first
    fn default() -> Self {
        Self::empty()
            .with_name(FirstText::new("h1 span"))
            .with_name(TitleWithSuffix::new(TITLE_SUFFIX))
            .with_publisher(FirstText::new("div[itemprop='author'] a span"))
            .with_publisher(FirstText::new("a[href^='/store/apps/dev'] span"))
    }
}

fn first_hit(strategies: &[Box<dyn TextExtractor>], doc: &Html) -> Option<String> {
    strategies.iter().find_map(|strategy| {
        let hit = strategy.extract(doc);
        if hit.is_some() {
            tracing::trace!(strategy = %strategy.describe(), "extraction strategy matched");
        }
        hit
    })
}
