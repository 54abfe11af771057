//! Title and author heuristics for scraped catalog listings.
//!
//! Catalog scrapes mix real books with physical products, storefront links
//! and page furniture. These predicates recognise the common shapes.
//! Product keywords use word boundaries so book titles such as "Rings of
//! Power" or "The Light Fantastic" are not mistaken for products. Storefront
//! wording ("store", "seller") matches as a word ending, which catches
//! "Bookstore" and "Bestseller" but leaves "Storey" alone. "shop" has to be a
//! whole word because of names like Bishop.

use std::sync::LazyLock;

use regex::Regex;

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Title placeholder that should never replace a real title.
pub fn is_title_placeholder(title: &str) -> bool {
    let t = title.trim();
    t.is_empty() || t.eq_ignore_ascii_case("Audible") || contains_ignore_case(t, "English - USD")
}

/// Author field that is page furniture rather than a person.
pub fn is_author_noise(author: &str) -> bool {
    let a = author.trim();
    a.chars().count() < 2
        || a.eq_ignore_ascii_case("Authors")
        || a.eq_ignore_ascii_case("By:")
        || starts_with_ignore_case(a, "Sort by")
        || contains_ignore_case(a, "English - USD")
}

/// "Kindle Edition" anywhere in the title.
pub fn is_kindle_edition(title: &str) -> bool {
    contains_ignore_case(title, "Kindle Edition")
}

static PRODUCT_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(led|lamp|charger|battery|batteries|watt|volt|usb|hdmi|shirt|t-shirt|socks|decor|decoration|decorations|necklace|bracelet|earrings|plug|adapter|pack of|set of|pcs|qty|capacity|dimensions|fabric|men's|women's|official store)\b",
    )
    .expect("valid product keyword regex")
});

static STOREFRONT_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(visit the|(book)?stores?)\b").expect("valid storefront title regex")
});

static PRODUCT_MEASURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d{1,4}\s?(cm|mm|inch|inches|oz|ml)\b").expect("valid measure regex")
});

/// Titles longer than this are product descriptions, not book titles
const MAX_TITLE_CHARS: usize = 200;

/// Title that reads like a physical-product listing.
pub fn is_product_like_title(title: &str) -> bool {
    let t = title.trim();
    if t.is_empty() {
        return false;
    }

    t.chars().count() > MAX_TITLE_CHARS
        || PRODUCT_KEYWORD_RE.is_match(t)
        || PRODUCT_MEASURE_RE.is_match(t)
        || STOREFRONT_TITLE_RE.is_match(t)
        || t.matches(',').count() >= 3
}

static SELLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(stores?|sellers?)\b|\bshops?\b").expect("valid seller regex")
});

/// Author field that names a storefront or seller.
pub fn is_seller_artist(artist: &str) -> bool {
    let a = artist.trim();
    !a.is_empty() && SELLER_RE.is_match(a)
}

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+%").expect("valid percent regex"));

static PROMO_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(best of|editors?'?\s?picks?|staff picks?|curated|must[- ]listens?|visit the .*store)\b",
    )
    .expect("valid promotional phrase regex")
});

/// Promotional noise: discounts, curated collections, storefront links.
pub fn is_promotional_title(title: &str) -> bool {
    let t = title.trim();
    if t.is_empty() {
        return false;
    }
    let lower = t.to_lowercase();

    PERCENT_RE.is_match(t)
        || (lower.contains("unlock") && (lower.contains("save") || lower.contains("savings")))
        || PROMO_PHRASE_RE.is_match(t)
        || lower.starts_with("unlock ")
        || lower.starts_with("save ")
        || lower.starts_with("visit the ")
}

/// Author or title missing.
pub fn is_missing_information(title: &str, artist: &str) -> bool {
    is_blank(title) || is_blank(artist)
}

/// Case-insensitive substring search.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
