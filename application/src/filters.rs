// Per-field search predicates. Each one is a pure function over a document and
// the matching part of a SearchRequest; an empty list or absent bound matches all.
use chrono::{DateTime, Utc};
use domain::{Document, SearchRequest};

/// Title starts with at least one of `prefixes` (case-sensitive).
pub fn matches_title_prefixes(document: &Document, prefixes: &[String]) -> bool {
    prefixes.is_empty()
        || prefixes
            .iter()
            .any(|prefix| document.title.starts_with(prefix.as_str()))
}

/// Content contains at least one of `contents` (case-sensitive).
pub fn matches_contents(document: &Document, contents: &[String]) -> bool {
    contents.is_empty()
        || contents
            .iter()
            .any(|needle| document.content.contains(needle.as_str()))
}

/// Author id is one of `author_ids` (exact match).
pub fn matches_author_ids(document: &Document, author_ids: &[String]) -> bool {
    author_ids.is_empty() || author_ids.iter().any(|id| *id == document.author.id)
}

/// `created` lies within `[from, to]`; both bounds inclusive and optional.
pub fn matches_created_range(
    document: &Document,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> bool {
    if from.is_some_and(|from| document.created < from) {
        return false;
    }
    if to.is_some_and(|to| document.created > to) {
        return false;
    }
    true
}

/// AND of all per-field predicates.
pub fn matches_request(document: &Document, request: &SearchRequest) -> bool {
    matches_title_prefixes(document, &request.title_prefixes)
        && matches_contents(document, &request.contains_contents)
        && matches_author_ids(document, &request.author_ids)
        && matches_created_range(document, request.created_from, request.created_to)
}
