//! CNN section categories and the page URL each one maps to.

use clap::ValueEnum;
use std::fmt;
use tracing::warn;

const CNN_HOME: &str = "https://www.cnn.com";
const CNN_SPORT: &str = "https://www.cnn.com/sport";

/// Top-level section selectable with `--category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Category {
    #[default]
    General,
    Politics,
    Business,
    Tech,
    Media,
    Markets,
    Sports,
    Science,
    Space,
    Life,
    Unearthed,
}

/// Sports section selectable with `--subcategory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SportsSubcategory {
    Football,
    Tennis,
    Golf,
}

impl Category {
    /// Page URL for this category when no subcategory applies.
    pub fn url(self) -> &'static str {
        match self {
            Category::General => CNN_HOME,
            Category::Politics => "https://www.cnn.com/politics",
            Category::Business => "https://www.cnn.com/business",
            Category::Tech => "https://www.cnn.com/business/tech",
            Category::Media => "https://www.cnn.com/business/media",
            Category::Markets => "https://www.cnn.com/markets",
            Category::Sports => CNN_SPORT,
            Category::Science => "https://www.cnn.com/science",
            Category::Space => "https://www.cnn.com/science/space",
            Category::Life => "https://www.cnn.com/science/life",
            Category::Unearthed => "https://www.cnn.com/science/unearthed",
        }
    }
}

impl SportsSubcategory {
    /// Page URL for this sports section.
    pub fn url(self) -> &'static str {
        match self {
            SportsSubcategory::Football => "https://www.cnn.com/sport/football",
            SportsSubcategory::Tennis => "https://www.cnn.com/sport/tennis",
            SportsSubcategory::Golf => "https://www.cnn.com/sport/golf",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default();
        f.write_str(&name)
    }
}

/// Pick the page to scrape for a category and optional sports subcategory.
///
/// The subcategory only applies to [`Category::Sports`]; with any other
/// category it is ignored.
pub fn resolve_url(category: Category, subcategory: Option<SportsSubcategory>) -> &'static str {
    match (category, subcategory) {
        (Category::Sports, Some(sub)) => sub.url(),
        (other, Some(sub)) => {
            warn!(category = %other, subcategory = ?sub, "Subcategory only applies to sports; ignoring");
            other.url()
        }
        (other, None) => other.url(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_categories() {
        assert_eq!(resolve_url(Category::General, None), "https://www.cnn.com");
        assert_eq!(
            resolve_url(Category::Tech, None),
            "https://www.cnn.com/business/tech"
        );
        assert_eq!(
            resolve_url(Category::Unearthed, None),
            "https://www.cnn.com/science/unearthed"
        );
    }

    #[test]
    fn test_sports_subcategories() {
        assert_eq!(resolve_url(Category::Sports, None), "https://www.cnn.com/sport");
        assert_eq!(
            resolve_url(Category::Sports, Some(SportsSubcategory::Golf)),
            "https://www.cnn.com/sport/golf"
        );
    }

    #[test]
    fn test_subcategory_ignored_outside_sports() {
        assert_eq!(
            resolve_url(Category::Politics, Some(SportsSubcategory::Tennis)),
            "https://www.cnn.com/politics"
        );
    }

    #[test]
    fn test_every_category_resolves_in_builtin_table() {
        let registry = crate::sites::SiteRegistry::builtin();
        for category in Category::value_variants() {
            assert!(registry.resolve(category.url()).is_some(), "{category}");
        }
        for sub in SportsSubcategory::value_variants() {
            assert!(registry.resolve(sub.url()).is_some());
        }
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Unearthed.to_string(), "unearthed");
    }
}
