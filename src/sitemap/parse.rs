//! Sitemap document classifier and parser
//!
//! A best-effort tag scan, deliberately not a validating XML parser:
//! real-world sitemaps frequently violate strict XML, and a malformed
//! document should degrade to partial or empty results rather than raise.

use regex::Regex;
use std::sync::LazyLock;

static INDEX_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*sitemapindex[\s>]").expect("hardcoded regex pattern is valid")
});

static URLSET_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*urlset[\s>]").expect("hardcoded regex pattern is valid")
});

static URL_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<\s*url[\s>].*?<\s*/\s*url\s*>").expect("hardcoded regex pattern is valid")
});

static LOC_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<\s*loc\s*>\s*([^<\s]+)\s*<\s*/\s*loc\s*>")
        .expect("hardcoded regex pattern is valid")
});

static BINARY_EXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp|svg|avif|pdf)(\?.*)?$")
        .expect("hardcoded regex pattern is valid")
});

/// Classification of a fetched sitemap document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    /// Entries are locations of other sitemap documents (a tree node)
    Index,
    /// Entries are final page URLs (a tree leaf)
    UrlSet,
    /// Neither marker present; treated as zero entries, not an error
    Unknown,
}

/// A classified sitemap with its extracted locations
#[derive(Debug, Clone)]
pub struct SitemapDocument {
    pub kind: SitemapKind,
    /// Absolute URL strings in document order
    pub entries: Vec<String>,
}

impl SitemapDocument {
    /// An Unknown document with no entries
    pub fn empty() -> Self {
        Self {
            kind: SitemapKind::Unknown,
            entries: Vec::new(),
        }
    }
}

/// Classifies sitemap text and extracts its candidate locations
///
/// A `sitemapindex` open tag marks Index (taking precedence over any
/// `urlset` tag); a `urlset` tag marks UrlSet; anything else is Unknown.
/// UrlSet extraction takes only the first `<loc>` inside each
/// `<url>…</url>` block, so sibling extensions like `<image:loc>` never
/// contribute entries. Index extraction takes every `<loc>`, since index
/// files have no sibling tags to disambiguate. Entries ending in an image
/// or PDF extension are dropped.
pub fn parse_sitemap(text: &str) -> SitemapDocument {
    let (kind, raw_entries) = if INDEX_TAG.is_match(text) {
        let locs = LOC_TEXT
            .captures_iter(text)
            .map(|cap| cap[1].to_string())
            .collect();
        (SitemapKind::Index, locs)
    } else if URLSET_TAG.is_match(text) {
        let locs = URL_BLOCK
            .find_iter(text)
            .filter_map(|block| {
                LOC_TEXT
                    .captures(block.as_str())
                    .map(|cap| cap[1].to_string())
            })
            .collect();
        (SitemapKind::UrlSet, locs)
    } else {
        (SitemapKind::Unknown, Vec::new())
    };

    let entries: Vec<String> = raw_entries
        .into_iter()
        .filter(|loc: &String| !BINARY_EXT.is_match(loc))
        .collect();

    SitemapDocument { kind, entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_urlset() {
        let text = r#"<?xml version="1.0"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/a</loc></url>
  <url><loc>https://example.com/b</loc><lastmod>2024-01-01</lastmod></url>
</urlset>"#;

        let doc = parse_sitemap(text);
        assert_eq!(doc.kind, SitemapKind::UrlSet);
        assert_eq!(
            doc.entries,
            vec!["https://example.com/a", "https://example.com/b"]
        );
    }

    #[test]
    fn test_classify_index() {
        let text = r#"<sitemapindex>
  <sitemap><loc>https://example.com/sitemap-1.xml</loc></sitemap>
  <sitemap><loc>https://example.com/sitemap-2.xml.gz</loc></sitemap>
</sitemapindex>"#;

        let doc = parse_sitemap(text);
        assert_eq!(doc.kind, SitemapKind::Index);
        assert_eq!(doc.entries.len(), 2);
        assert_eq!(doc.entries[1], "https://example.com/sitemap-2.xml.gz");
    }

    #[test]
    fn test_index_takes_precedence_over_urlset() {
        let text = "<sitemapindex><urlset><loc>https://example.com/s.xml</loc></urlset></sitemapindex>";
        let doc = parse_sitemap(text);
        assert_eq!(doc.kind, SitemapKind::Index);
    }

    #[test]
    fn test_unrecognized_text_is_unknown() {
        let doc = parse_sitemap("<html><body>404 not found</body></html>");
        assert_eq!(doc.kind, SitemapKind::Unknown);
        assert!(doc.entries.is_empty());
    }

    #[test]
    fn test_image_loc_sibling_excluded() {
        let text = r#"<urlset xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
  <url>
    <loc>https://example.com/page</loc>
    <image:loc>https://example.com/photo-page</image:loc>
  </url>
  <image:loc>https://example.com/stray-photo</image:loc>
</urlset>"#;

        let doc = parse_sitemap(text);
        assert_eq!(doc.entries, vec!["https://example.com/page"]);
    }

    #[test]
    fn test_binary_extensions_filtered() {
        let text = r#"<urlset>
  <url><loc>https://example.com/page</loc></url>
  <url><loc>https://example.com/photo.JPG</loc></url>
  <url><loc>https://example.com/doc.pdf?download=1</loc></url>
  <url><loc>https://example.com/pdf-guide</loc></url>
</urlset>"#;

        let doc = parse_sitemap(text);
        assert_eq!(
            doc.entries,
            vec!["https://example.com/page", "https://example.com/pdf-guide"]
        );
    }

    #[test]
    fn test_malformed_document_degrades() {
        // Truncated mid-entry: the complete blocks still parse.
        let text = "<urlset><url><loc>https://example.com/ok</loc></url><url><loc>https://example.com/trunc";
        let doc = parse_sitemap(text);
        assert_eq!(doc.kind, SitemapKind::UrlSet);
        assert_eq!(doc.entries, vec!["https://example.com/ok"]);
    }

    #[test]
    fn test_whitespace_and_case_tolerated() {
        let text = "< URLSET >< url >< loc > https://example.com/x < /loc >< /url >< /URLSET >";
        let doc = parse_sitemap(text);
        assert_eq!(doc.kind, SitemapKind::UrlSet);
        assert_eq!(doc.entries, vec!["https://example.com/x"]);
    }

    #[test]
    fn test_empty_input() {
        let doc = parse_sitemap("");
        assert_eq!(doc.kind, SitemapKind::Unknown);
        assert!(doc.entries.is_empty());
    }
}
