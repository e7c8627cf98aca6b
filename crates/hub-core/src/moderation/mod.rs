//! Content filter - pure validation of user-submitted text
//!
//! Length bounds, a profanity denylist, spam heuristics, and title
//! similarity for near-duplicate detection. No I/O.

mod content_filter;
mod similarity;

pub use content_filter::{
    contains_profanity, is_spam, validate_description, validate_title, ContentError, TextField,
    DESCRIPTION_MAX_LEN, DESCRIPTION_MIN_LEN, TITLE_MAX_LEN, TITLE_MIN_LEN,
};
pub use similarity::{
    find_near_duplicate, is_near_duplicate, levenshtein, normalize_title, similarity,
    NEAR_DUPLICATE_THRESHOLD,
};
