//! Resource link extraction from chapter markup
//!
//! A rule names an element, a marker attribute with an exact value, and the
//! attribute that carries the link. Two passes run over the raw markup:
//!
//! 1. **Primary** - marker attribute before the source attribute
//! 2. **Fallback** - source attribute before the marker attribute
//!
//! The fallback only runs when the primary pass finds nothing, and results
//! from the two passes are never mixed. Matching is confined to a single tag
//! (`[^>]*`), so unbalanced or malformed markup can only reduce the result,
//! never fail it.

use crate::config::ExtractConfig;
use crate::ConfigError;
use regex::Regex;

/// Which attributes identify a resource element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRule {
    pub tag: String,
    pub marker_attribute: String,
    pub marker_value: String,
    pub source_attribute: String,
}

impl Default for ExtractionRule {
    fn default() -> Self {
        Self::from(&ExtractConfig::default())
    }
}

impl From<&ExtractConfig> for ExtractionRule {
    fn from(config: &ExtractConfig) -> Self {
        Self {
            tag: config.tag.clone(),
            marker_attribute: config.marker_attribute.clone(),
            marker_value: config.marker_value.clone(),
            source_attribute: config.source_attribute.clone(),
        }
    }
}

/// The links extracted for one chapter, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLinkSet {
    pub chapter: u32,
    pub links: Vec<String>,
}

impl ExtractedLinkSet {
    pub fn extracted_count(&self) -> usize {
        self.links.len()
    }
}

/// Compiled extraction rule
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    primary: Regex,
    fallback: Regex,
}

impl LinkExtractor {
    /// Compiles both passes of a rule
    ///
    /// Rule values are escaped, so any string is matched literally.
    pub fn new(rule: &ExtractionRule) -> Result<Self, ConfigError> {
        let tag = regex::escape(&rule.tag);
        let marker = format!(
            r#"\s(?i:{})\s*=\s*["']{}["']"#,
            regex::escape(&rule.marker_attribute),
            regex::escape(&rule.marker_value)
        );
        let source = format!(
            r#"\s(?i:{})\s*=\s*["']([^"']+)["']"#,
            regex::escape(&rule.source_attribute)
        );

        let primary = format!(r"<(?i:{tag})\b[^>]*?{marker}[^>]*?{source}[^>]*>");
        let fallback = format!(r"<(?i:{tag})\b[^>]*?{source}[^>]*?{marker}[^>]*>");

        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| ConfigError::InvalidRule(e.to_string()))
        };

        Ok(Self {
            primary: compile(&primary)?,
            fallback: compile(&fallback)?,
        })
    }

    /// Extracts resource links from markup in document order
    ///
    /// # Example
    ///
    /// ```
    /// use chapter_links::crawler::{ExtractionRule, LinkExtractor};
    ///
    /// let extractor = LinkExtractor::new(&ExtractionRule::default()).unwrap();
    /// let html = r#"<img class="imgholder" src="https://cdn.example.com/1.jpg">"#;
    /// assert_eq!(extractor.extract(html), vec!["https://cdn.example.com/1.jpg"]);
    /// ```
    pub fn extract(&self, markup: &str) -> Vec<String> {
        let links = collect_sources(&self.primary, markup);
        if !links.is_empty() {
            return links;
        }

        let links = collect_sources(&self.fallback, markup);
        if !links.is_empty() {
            tracing::trace!("Primary pattern found nothing, fallback found {}", links.len());
        }
        links
    }

    /// Extracts links and tags them with their chapter
    pub fn extract_set(&self, chapter: u32, markup: &str) -> ExtractedLinkSet {
        ExtractedLinkSet {
            chapter,
            links: self.extract(markup),
        }
    }
}

fn collect_sources(pattern: &Regex, markup: &str) -> Vec<String> {
    pattern
        .captures_iter(markup)
        .filter_map(|captures| captures.get(1))
        .map(|source| source.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> LinkExtractor {
        LinkExtractor::new(&ExtractionRule::default()).unwrap()
    }

    #[test]
    fn test_primary_order() {
        let html = r#"
            <div>
                <img class="imgholder" src="https://cdn.example.com/1.jpg" alt="1">
                <img class="imgholder" src="https://cdn.example.com/2.jpg" alt="2">
            </div>
        "#;
        assert_eq!(
            extractor().extract(html),
            vec!["https://cdn.example.com/1.jpg", "https://cdn.example.com/2.jpg"]
        );
    }

    #[test]
    fn test_fallback_order() {
        let html = r#"
            <img src="https://cdn.example.com/a.png" class="imgholder">
            <img src='https://cdn.example.com/b.png' width="800" class='imgholder' />
        "#;
        assert_eq!(
            extractor().extract(html),
            vec!["https://cdn.example.com/a.png", "https://cdn.example.com/b.png"]
        );
    }

    #[test]
    fn test_passes_are_not_mixed() {
        let html = r#"
            <img src="https://cdn.example.com/fallback.png" class="imgholder">
            <img class="imgholder" src="https://cdn.example.com/primary.png">
        "#;
        assert_eq!(
            extractor().extract(html),
            vec!["https://cdn.example.com/primary.png"]
        );
    }

    #[test]
    fn test_no_matches_in_either_order() {
        let html = r#"<html><body><img src="/logo.png" class="logo"><p>text</p></body></html>"#;
        assert!(extractor().extract(html).is_empty());
    }

    #[test]
    fn test_marker_value_must_match_exactly() {
        let html = r#"
            <img class="imgholder lazy" src="/1.jpg">
            <img class="notimgholder" src="/2.jpg">
            <img class="imgholder" src="/3.jpg">
        "#;
        assert_eq!(extractor().extract(html), vec!["/3.jpg"]);
    }

    #[test]
    fn test_other_elements_ignored() {
        let html = r#"
            <div class="imgholder" src="/div.jpg"></div>
            <imgx class="imgholder" src="/imgx.jpg">
            <img class="imgholder" src="/real.jpg">
        "#;
        assert_eq!(extractor().extract(html), vec!["/real.jpg"]);
    }

    #[test]
    fn test_similar_attribute_names_ignored() {
        let html = r#"<img class="imgholder" data-src="/lazy.jpg" src="/real.jpg">"#;
        assert_eq!(extractor().extract(html), vec!["/real.jpg"]);
    }

    #[test]
    fn test_tag_and_attribute_names_case_insensitive() {
        let html = r#"<IMG CLASS="imgholder" SRC="/upper.jpg">"#;
        assert_eq!(extractor().extract(html), vec!["/upper.jpg"]);
    }

    #[test]
    fn test_whitespace_around_equals() {
        let html = "<img\n  class = \"imgholder\"\n  src = \"/spaced.jpg\"\n>";
        assert_eq!(extractor().extract(html), vec!["/spaced.jpg"]);
    }

    #[test]
    fn test_match_confined_to_one_tag() {
        // Marker in one tag and source in the next must not pair up
        let html = r#"<img class="imgholder"><img src="/other.jpg">"#;
        assert!(extractor().extract(html).is_empty());
    }

    #[test]
    fn test_malformed_markup_does_not_panic() {
        let inputs = [
            "",
            "<",
            "<img",
            "<img class=\"imgholder\" src=\"",
            "<<<>>>",
            "<img class='imgholder' src='/ok.jpg'",
            "\u{0}\u{feff}<img class=\"imgholder\" src=\"/ünïcödé.jpg\">",
        ];
        for input in inputs {
            let _ = extractor().extract(input);
        }
        assert_eq!(
            extractor().extract(inputs[6]),
            vec!["/ünïcödé.jpg".to_string()]
        );
    }

    #[test]
    fn test_duplicates_preserved_in_order() {
        let html = r#"
            <img class="imgholder" src="/same.jpg">
            <img class="imgholder" src="/same.jpg">
        "#;
        assert_eq!(extractor().extract(html).len(), 2);
    }

    #[test]
    fn test_custom_rule() {
        let rule = ExtractionRule {
            tag: "source".to_string(),
            marker_attribute: "data-role".to_string(),
            marker_value: "page.image".to_string(),
            source_attribute: "data-url".to_string(),
        };
        let extractor = LinkExtractor::new(&rule).unwrap();
        let html = r#"
            <source data-role="page.image" data-url="/p1.webp">
            <source data-role="pageXimage" data-url="/nope.webp">
        "#;
        assert_eq!(extractor.extract(html), vec!["/p1.webp"]);
    }

    #[test]
    fn test_extract_set_counts() {
        let html = r#"<img class="imgholder" src="/1.jpg"><img class="imgholder" src="/2.jpg">"#;
        let set = extractor().extract_set(4, html);

        assert_eq!(set.chapter, 4);
        assert_eq!(set.extracted_count(), 2);
    }
}
