//! Paginator configuration.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Tunables of a paginator instance.
///
/// Defaults mirror the stock layout: five selectors, eight cards per
/// page, a 300x400 card footprint and at most four columns.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PaginatorConfig {
    /// Maximum number of page selectors available at any time.
    /// Must be an odd value.
    pub max_visible_pages: usize,
    /// Cards shown per page until a resize recomputes it.
    pub cards_per_page: usize,
    /// Per-card footprint used when recomputing cards per page.
    pub card_width: u32,
    pub card_height: u32,
    /// Column cap applied when recomputing cards per page.
    pub max_columns: u32,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            max_visible_pages: 5,
            cards_per_page: 8,
            card_width: 300,
            card_height: 400,
            max_columns: 4,
        }
    }
}

impl PaginatorConfig {
    /// Load and validate a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Internal(format!("cannot read {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| Error::Internal(format!("cannot parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the documented preconditions on the tunables.
    pub fn validate(&self) -> Result<()> {
        if self.max_visible_pages == 0 || self.max_visible_pages % 2 == 0 {
            return Err(Error::OutOfRange(format!(
                "max_visible_pages ({}) must be odd and at least 1",
                self.max_visible_pages
            )));
        }
        if self.cards_per_page == 0 {
            return Err(Error::OutOfRange(
                "cards_per_page must be at least 1".into(),
            ));
        }
        if self.card_width == 0 || self.card_height == 0 {
            return Err(Error::OutOfRange(
                "card footprint must be non-zero".into(),
            ));
        }
        if self.max_columns == 0 {
            return Err(Error::OutOfRange("max_columns must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PaginatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_even_selector_count_rejected() {
        let config = PaginatorConfig {
            max_visible_pages: 4,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::OutOfRange(_))));
    }

    #[test]
    fn test_zero_cards_per_page_rejected() {
        let config = PaginatorConfig {
            cards_per_page: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config: PaginatorConfig =
            toml::from_str("max_visible_pages = 7\ncards_per_page = 12\n").unwrap();
        assert_eq!(config.max_visible_pages, 7);
        assert_eq!(config.cards_per_page, 12);
        assert_eq!(config.card_width, 300);
        assert!(config.validate().is_ok());
    }
}
