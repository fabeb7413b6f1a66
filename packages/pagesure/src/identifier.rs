//! Page identifier derivation.
//!
//! Maps a raw, user-supplied URL to the stable key under which the page's
//! record is cached. Pure: no store or network access happens here, so
//! invalid input is rejected before any I/O.
//!
//! Rules, in order:
//! 1. empty input is rejected
//! 2. the URL must contain `facebook.com/`
//! 3. the path is everything after the first `facebook.com/`, up to `?`
//! 4. `profile.php` paths resolve to `profile_<id>` using a numeric `id`
//!    query parameter found anywhere in the raw URL, or to the literal
//!    `profile.php` when there is none
//! 5. otherwise one trailing slash is stripped and the path is used as is
//!
//! Case, percent-encoding and repeated slashes are deliberately left alone.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::types::page::PageId;

/// Substring every accepted URL must contain.
pub const DOMAIN_MARKER: &str = "facebook.com/";

/// Path of numeric-id profile pages.
pub const PROFILE_PATH: &str = "profile.php";

/// Prefix for identifiers derived from a numeric profile id.
pub const PROFILE_ID_PREFIX: &str = "profile_";

static PAGE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"facebook\.com/(.+)").unwrap());

// ASCII digits only; `\d` would also accept other Unicode digits.
static PROFILE_ID_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]id=([0-9]+)").unwrap());

/// Derive the page identifier for `raw_url`.
///
/// # Example
///
/// ```rust
/// use pagesure::identifier::resolve_page_id;
///
/// let id = resolve_page_id("https://facebook.com/profile.php?id=12345").unwrap();
/// assert_eq!(id.as_str(), "profile_12345");
/// ```
pub fn resolve_page_id(raw_url: &str) -> Result<PageId, ValidationError> {
    if raw_url.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    if !raw_url.contains(DOMAIN_MARKER) {
        return Err(ValidationError::InvalidDomain);
    }

    // The marker is present but nothing (on the same line) follows it.
    let captures = PAGE_PATH
        .captures(raw_url)
        .ok_or(ValidationError::InvalidDomain)?;
    let tail = captures.get(1).map_or("", |m| m.as_str());
    let path = tail.split('?').next().unwrap_or(tail);

    if path == PROFILE_PATH {
        return Ok(profile_id(raw_url));
    }

    let path = path.strip_suffix('/').unwrap_or(path);
    if path.is_empty() {
        return Err(ValidationError::UnresolvableIdentifier);
    }

    Ok(PageId::new(path))
}

/// Identifier for a `profile.php` URL, searched in the unmodified raw URL.
fn profile_id(raw_url: &str) -> PageId {
    match PROFILE_ID_PARAM.captures(raw_url).and_then(|c| c.get(1)) {
        Some(digits) => PageId::new(format!("{}{}", PROFILE_ID_PREFIX, digits.as_str())),
        // Every id-less profile URL shares this key.
        None => PageId::new(PROFILE_PATH),
    }
}
