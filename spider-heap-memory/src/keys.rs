//! Own-property key ordering.

/// Largest valid array index (2^32 - 2).
const MAX_ARRAY_INDEX: u64 = u32::MAX as u64 - 1;

/// Parse `key` as a canonical array index: decimal digits, no leading
/// zeros (except "0" itself), at most 2^32 - 2.
pub fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    let n: u64 = key.parse().ok()?;
    if n > MAX_ARRAY_INDEX {
        return None;
    }
    u32::try_from(n).ok()
}

/// Order keys given in insertion order: array indices first, ascending,
/// then everything else in the order given.
pub fn ordered<'a, I>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut indices = Vec::new();
    let mut named = Vec::new();
    for key in keys {
        match array_index(key) {
            Some(i) => indices.push((i, key)),
            None => named.push(key),
        }
    }
    indices.sort_unstable_by_key(|(i, _)| *i);
    indices
        .into_iter()
        .map(|(_, k)| k)
        .chain(named)
        .map(str::to_owned)
        .collect()
}
