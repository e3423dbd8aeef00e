use std::collections::BTreeMap;

use padboard_grid::{DefaultSizer, Span};

/// Per-domain default card sizes with a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SizeTable {
    /// Size for domains without an entry.
    fallback: Span,
    /// Explicit sizes keyed by domain.
    by_domain: BTreeMap<String, Span>,
}

impl SizeTable {
    /// Table with `fallback` for unknown domains.
    pub fn new(fallback: Span, by_domain: BTreeMap<String, Span>) -> Self {
        Self {
            fallback,
            by_domain,
        }
    }

    /// Size for `domain`.
    pub fn get(&self, domain: &str) -> Span {
        self.by_domain.get(domain).copied().unwrap_or(self.fallback)
    }

    /// Size for unknown domains.
    pub fn fallback(&self) -> Span {
        self.fallback
    }

    /// Domains with an explicit size.
    pub fn domains(&self) -> impl Iterator<Item = (&str, Span)> {
        self.by_domain.iter().map(|(d, s)| (d.as_str(), *s))
    }
}

impl DefaultSizer for SizeTable {
    fn default_grid_size(&self, domain_hint: &str) -> Span {
        self.get(domain_hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_domain_uses_fallback() {
        let t = SizeTable::new(
            Span::new(1, 2),
            BTreeMap::from([("camera".to_string(), Span::new(2, 2))]),
        );
        assert_eq!(t.default_grid_size("camera"), Span::new(2, 2));
        assert_eq!(t.default_grid_size("light"), Span::new(1, 2));
        assert_eq!(t.domains().count(), 1);
    }
}
