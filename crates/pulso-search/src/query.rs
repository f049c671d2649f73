//! Recent-search query construction.

use pulso_core::Concept;

/// Longest query the recent-search endpoint accepts.
pub const MAX_QUERY_LEN: usize = 512;

/// Language operator appended to every query.
pub const LANGUAGE_FILTER: &str = "lang:es";

/// Builds the query for one concept:
/// `"{location}" (kw1 OR kw2 ...) [(actor OR @actor)] lang:es -is:retweet`.
///
/// Double quotes inside `location` are dropped so the phrase stays a single
/// exact-match term. The actor filter is omitted when `politician` is blank.
#[must_use]
pub fn build_concept_query(location: &str, concept: Concept, politician: Option<&str>) -> String {
    let location: String = location.chars().filter(|c| *c != '"').collect();
    let keywords = concept.keywords().join(" OR ");

    let mut query = format!("\"{}\" ({keywords})", location.trim());
    if let Some(actor) = politician.and_then(actor_filter) {
        query.push(' ');
        query.push_str(&actor);
    }
    query.push(' ');
    query.push_str(LANGUAGE_FILTER);
    query.push_str(" -is:retweet");
    query
}

/// `(name OR @handle)` for a politician, or `None` when blank.
///
/// Multi-word names are quoted; the handle is the name with whitespace removed.
fn actor_filter(politician: &str) -> Option<String> {
    let name = politician.trim().trim_start_matches('@').trim();
    if name.is_empty() {
        return None;
    }
    let handle: String = name.split_whitespace().collect();
    if name.contains(char::is_whitespace) {
        Some(format!("(\"{name}\" OR @{handle})"))
    } else {
        Some(format!("({name} OR @{handle})"))
    }
}
