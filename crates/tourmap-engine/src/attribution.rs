//! Attribution list merge

use tourmap_core::models::Attribution;

/// Merge attribution layers given lowest priority first.
///
/// Entries are keyed by text: a later layer replaces the url of an earlier
/// entry with the same text but keeps its position. Entries with empty text
/// are dropped.
pub fn merge_attribution<'a, I>(layers: I) -> Vec<Attribution>
where
    I: IntoIterator<Item = &'a [Attribution]>,
{
    let mut merged: Vec<Attribution> = Vec::new();
    for item in layers.into_iter().flatten() {
        let text = item.text.trim();
        if text.is_empty() {
            continue;
        }
        let url = item.url.clone().filter(|u| !u.trim().is_empty());
        match merged.iter_mut().find(|existing| existing.text == text) {
            Some(existing) => existing.url = url,
            None => merged.push(Attribution { text: text.to_string(), url }),
        }
    }
    merged
}
