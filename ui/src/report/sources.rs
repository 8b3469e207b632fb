//! Source citations and the reliable-domain marker.

/// Leading marker the backend prepends to sources from trusted domains.
const RELIABLE_MARKER: &str = "* ";

/// A source citation split for display: the marker stays in the visible
/// text, the link target gets the bare URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub display: String,
    pub href: String,
    pub reliable: bool,
}

impl SourceRef {
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(RELIABLE_MARKER) {
            Some(bare) => Self {
                display: raw.to_string(),
                href: bare.to_string(),
                reliable: true,
            },
            None => Self {
                display: raw.to_string(),
                href: raw.to_string(),
                reliable: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_is_stripped_from_href_but_kept_in_display() {
        let source = SourceRef::parse("* http://example.com");
        assert_eq!(source.display, "* http://example.com");
        assert_eq!(source.href, "http://example.com");
        assert!(source.reliable);
    }

    #[test]
    fn unmarked_sources_pass_through() {
        let source = SourceRef::parse("https://example.org/article");
        assert_eq!(source.display, source.href);
        assert!(!source.reliable);
    }

    #[test]
    fn marker_requires_the_trailing_space() {
        let source = SourceRef::parse("*https://example.org");
        assert_eq!(source.href, "*https://example.org");
        assert!(!source.reliable);
    }
}
