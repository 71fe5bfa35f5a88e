//! HTML page querying
//!
//! A fetched page is parsed once into a [`Page`]; extractors then query it with
//! CSS selectors and receive [`Element`] handles in document order.

use crate::HarvestError;
use scraper::{ElementRef, Html, Selector};

/// Parses a CSS selector, mapping failures to [`HarvestError::Selector`]
pub fn selector(css: &str) -> Result<Selector, HarvestError> {
    Selector::parse(css).map_err(|_| HarvestError::Selector(css.to_string()))
}

/// A parsed HTML document together with the URL it was fetched from
pub struct Page {
    url: String,
    document: Html,
}

impl Page {
    /// Parses `html` fetched from `url`
    ///
    /// # Example
    ///
    /// ```
    /// use thesis_harvester::crawler::Page;
    ///
    /// let page = Page::parse("<div class=\"x\"><a href=\"/a\">A</a></div>", "https://example.com/");
    /// let links = page.select(".x a").unwrap();
    /// assert_eq!(links[0].text(), "A");
    /// assert_eq!(links[0].attr("href"), Some("/a"));
    /// ```
    pub fn parse(html: &str, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(html),
        }
    }

    /// The URL the page was fetched from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns every element matching `css`, in document order
    pub fn select(&self, css: &str) -> Result<Vec<Element<'_>>, HarvestError> {
        let selector = selector(css)?;
        Ok(self.document.select(&selector).map(Element).collect())
    }

    /// Builds a structural-mismatch error for this page
    pub fn structure_error(&self, message: impl Into<String>) -> HarvestError {
        HarvestError::PageStructure {
            url: self.url.clone(),
            message: message.into(),
        }
    }
}

/// Handle to a matched element
#[derive(Clone, Copy)]
pub struct Element<'a>(ElementRef<'a>);

impl<'a> Element<'a> {
    /// Concatenated text content, untrimmed
    pub fn text(&self) -> String {
        self.0.text().collect()
    }

    /// Text content on one line, whitespace runs (newlines included) collapsed
    pub fn text_line(&self) -> String {
        self.0
            .text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Raw markup inside the element
    pub fn inner_html(&self) -> String {
        self.0.inner_html()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// Returns every descendant matching `css`, in document order
    pub fn select(&self, css: &str) -> Result<Vec<Element<'a>>, HarvestError> {
        let selector = selector(css)?;
        Ok(self.0.select(&selector).map(Element).collect())
    }

    /// Returns the first descendant matching `css`
    pub fn first(&self, css: &str) -> Result<Option<Element<'a>>, HarvestError> {
        let selector = selector(css)?;
        Ok(self.0.select(&selector).next().map(Element))
    }
}
