//! Identifier classification.

use std::sync::LazyLock;

use hub_search::Predicate;
use regex::Regex;

/// Regex for item ids: a version 1-5 UUID, dashes optional.
static GUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-?[0-9a-f]{4}-?[1-5][0-9a-f]{3}-?[89ab][0-9a-f]{3}-?[0-9a-f]{12}$")
        .expect("Invalid guid regex")
});

/// Field holding an item's type keywords, where slugs are stored.
pub const SLUG_FIELD: &str = "typekeywords";

/// Prefix of the type keyword holding a slug.
pub const SLUG_PREFIX: &str = "slug|";

/// True when `identifier` looks like an entity id rather than a slug.
pub fn is_guid(identifier: &str) -> bool {
    GUID_REGEX.is_match(identifier)
}

/// Predicate selecting the entity named by `identifier`.
///
/// Ids match on `id`; anything else is treated as a slug and matched
/// against the `slug|<identifier>` type keyword.
pub fn identifier_predicate(identifier: &str) -> Predicate {
    if is_guid(identifier) {
        Predicate::field("id", identifier)
    } else {
        Predicate::field(SLUG_FIELD, format!("{SLUG_PREFIX}{identifier}"))
    }
}
