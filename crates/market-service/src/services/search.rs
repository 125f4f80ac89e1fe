//! Catalog search and display helpers
//!
//! Pure functions over a catalog snapshot. Filters are conjunctive: a listing
//! is returned only when it satisfies every filter that is set.

use serde::Deserialize;
use url::Url;

use market_core::entities::{Listing, ListingStatus};

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Catalog order (insertion)
    #[default]
    Catalog,
    Newest,
    PriceAsc,
    PriceDesc,
    FollowersDesc,
}

/// Catalog filters; unset fields match everything
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingFilters {
    /// Case-insensitive substring over platform, category, description and username
    pub query: Option<String>,
    /// Case-insensitive platform name
    pub platform: Option<String>,
    /// Exact content category
    pub category: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub status: Option<ListingStatus>,
    pub sort: SortOrder,
}

impl ListingFilters {
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    #[must_use]
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn price_range(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    #[must_use]
    pub fn status(mut self, status: ListingStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Whether one listing passes every filter
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(query) = self.query.as_deref() {
            if !listing.matches_text(query) {
                return false;
            }
        }
        if let Some(platform) = non_empty(self.platform.as_deref()) {
            if !listing.platform.eq_ignore_ascii_case(platform.trim()) {
                return false;
            }
        }
        if let Some(category) = non_empty(self.category.as_deref()) {
            if listing.content_category != category {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| listing.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| listing.price > max) {
            return false;
        }
        if self.status.is_some_and(|status| listing.status != status) {
            return false;
        }
        true
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Filter and order a catalog snapshot
pub fn search(listings: &[Listing], filters: &ListingFilters) -> Vec<Listing> {
    let mut found: Vec<Listing> = listings
        .iter()
        .filter(|l| filters.matches(l))
        .cloned()
        .collect();

    match filters.sort {
        SortOrder::Catalog => {}
        SortOrder::Newest => found.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::PriceAsc => found.sort_by_key(|l| l.price),
        SortOrder::PriceDesc => found.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOrder::FollowersDesc => found.sort_by(|a, b| b.followers.cmp(&a.followers)),
    }
    found
}

/// Compact metric formatting: `1.2M`, `10.0K`, `999`
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Thousands separators: `10000` -> `10,000`
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Deep-link opening an external chat with the seller contact
///
/// Returns `None` when the contact number has no digits.
pub fn contact_link(contact_phone: &str, listing: &Listing) -> Option<Url> {
    let digits: String = contact_phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    let text = format!(
        "Hi! I'm interested in buying your {} account with {} followers for ${}. Can we discuss the details?",
        listing.platform,
        format_thousands(listing.followers),
        format_thousands(listing.price),
    );

    let mut url = Url::parse("https://wa.me/").ok()?;
    url.set_path(&digits);
    url.query_pairs_mut().append_pair("text", &text);
    Some(url)
}
