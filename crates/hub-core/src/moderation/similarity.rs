//! Title similarity for near-duplicate detection

/// Titles are near-duplicates when their similarity exceeds this value
pub const NEAR_DUPLICATE_THRESHOLD: f64 = 0.8;

/// Lower-case and keep only ASCII letters and digits
pub fn normalize_title(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Edit distance over characters (insert, delete, substitute)
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Similarity in `[0, 1]` of two normalized strings
///
/// `(max_len - distance) / max_len`; two strings that normalize to empty
/// are identical (1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize_title(a);
    let b = normalize_title(b);
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    (longest - levenshtein(&a, &b)) as f64 / longest as f64
}

pub fn is_near_duplicate(a: &str, b: &str) -> bool {
    similarity(a, b) > NEAR_DUPLICATE_THRESHOLD
}

/// First of `existing` that `title` nearly duplicates
pub fn find_near_duplicate<'a, I>(title: &str, existing: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    existing
        .into_iter()
        .find(|candidate| is_near_duplicate(title, candidate))
}
