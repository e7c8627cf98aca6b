//! Title and description rules

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

pub const TITLE_MIN_LEN: usize = 3;
pub const TITLE_MAX_LEN: usize = 100;
pub const DESCRIPTION_MIN_LEN: usize = 10;
pub const DESCRIPTION_MAX_LEN: usize = 500;

/// Texts containing this many links or more are treated as spam
const SPAM_URL_THRESHOLD: usize = 5;

const PROFANITY: &[&str] = &[
    "fuck", "shit", "bitch", "ass", "damn", "crap", "piss", "dick", "cock", "pussy", "asshole",
    "bastard", "slut", "whore", "fag", "nigger", "chink",
];

static PROFANITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    let words = PROFANITY
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{words})\b")).expect("profanity pattern is valid")
});

static SPAM_PHRASE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:viagra|cialis|pharmacy)\b",
        r"(?i)\b(?:buy now|click here|limited time)\b",
        r"(?i)\b(?:make money fast|work from home)\b",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("spam pattern is valid"))
    .collect()
});

// Matches the scheme only, so links joined without whitespace still count separately.
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://").expect("url pattern is valid"));

/// Which text field a rule was applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Title,
    Description,
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => f.write_str("Title"),
            Self::Description => f.write_str("Description"),
        }
    }
}

/// Content filter rejections
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("{0} is required")]
    Empty(TextField),

    #[error("{field} must be at least {min} characters")]
    TooShort { field: TextField, min: usize },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: TextField, max: usize },

    #[error("{0} contains inappropriate language")]
    Profane(TextField),

    #[error("{0} appears to be spam")]
    Spam(TextField),

    #[error("You already have a resource with a very similar title: {0}")]
    DuplicateTitle(String),
}

/// Case-insensitive whole-word match against the denylist
pub fn contains_profanity(text: &str) -> bool {
    PROFANITY_RE.is_match(text)
}

/// Known spam phrases, or five or more links in one text
pub fn is_spam(text: &str) -> bool {
    SPAM_PHRASE_RES.iter().any(|re| re.is_match(text))
        || URL_RE.find_iter(text).take(SPAM_URL_THRESHOLD).count() >= SPAM_URL_THRESHOLD
}

pub fn validate_title(text: &str) -> Result<(), ContentError> {
    validate_text(TextField::Title, text, TITLE_MIN_LEN, TITLE_MAX_LEN)
}

pub fn validate_description(text: &str) -> Result<(), ContentError> {
    validate_text(
        TextField::Description,
        text,
        DESCRIPTION_MIN_LEN,
        DESCRIPTION_MAX_LEN,
    )
}

// Lengths count characters of the trimmed text.
fn validate_text(field: TextField, text: &str, min: usize, max: usize) -> Result<(), ContentError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ContentError::Empty(field));
    }

    let len = trimmed.chars().count();
    if len < min {
        return Err(ContentError::TooShort { field, min });
    }
    if len > max {
        return Err(ContentError::TooLong { field, max });
    }
    if contains_profanity(trimmed) {
        return Err(ContentError::Profane(field));
    }
    if is_spam(trimmed) {
        return Err(ContentError::Spam(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_length_bounds() {
        assert_eq!(
            validate_title("ab"),
            Err(ContentError::TooShort { field: TextField::Title, min: 3 })
        );
        assert!(validate_title("abc").is_ok());
        assert!(validate_title(&"x".repeat(100)).is_ok());
        assert_eq!(
            validate_title(&"x".repeat(101)),
            Err(ContentError::TooLong { field: TextField::Title, max: 100 })
        );
    }

    #[test]
    fn test_title_is_trimmed_before_measuring() {
        assert_eq!(validate_title("   "), Err(ContentError::Empty(TextField::Title)));
        assert_eq!(validate_title(""), Err(ContentError::Empty(TextField::Title)));
        assert!(matches!(validate_title("  ab  "), Err(ContentError::TooShort { .. })));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert!(validate_title("äöü").is_ok());
    }

    #[test]
    fn test_description_bounds() {
        assert!(matches!(
            validate_description("too short"),
            Err(ContentError::TooShort { field: TextField::Description, min: 10 })
        ));
        assert!(validate_description("long enough text").is_ok());
        assert!(matches!(
            validate_description(&"y".repeat(501)),
            Err(ContentError::TooLong { max: 500, .. })
        ));
    }

    #[test]
    fn test_profanity_whole_word_case_insensitive() {
        assert!(contains_profanity("what the DAMN thing"));
        assert!(contains_profanity("Shit."));
        assert!(!contains_profanity("a classic assessment of the bass"));
        assert!(!contains_profanity("Scrapbook and cocktail recipes"));
    }

    #[test]
    fn test_spam_phrases() {
        assert!(is_spam("BUY NOW while stocks last"));
        assert!(is_spam("best pharmacy deals"));
        assert!(is_spam("Work from home today"));
        assert!(!is_spam("A perfectly normal economy config"));
    }

    #[test]
    fn test_spam_url_threshold() {
        let four = "http://a.io https://b.io http://c.io http://d.io";
        assert!(!is_spam(four));
        let five = format!("{four} https://e.io");
        assert!(is_spam(&five));
    }

    #[test]
    fn test_spam_urls_without_whitespace() {
        assert!(is_spam("http://a.io,http://b.io,http://c.io,http://d.io,http://e.io"));
        assert!(is_spam("http://a.iohttp://b.iohttp://c.iohttp://d.iohttps://e.io"));
        assert!(!is_spam("http://a.io,http://b.io,http://c.io,http://d.io"));
    }

    #[test]
    fn test_validation_order_reports_profanity_then_spam() {
        assert_eq!(
            validate_title("damn good config"),
            Err(ContentError::Profane(TextField::Title))
        );
        assert_eq!(
            validate_description("click here for a great plugin setup"),
            Err(ContentError::Spam(TextField::Description))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ContentError::Empty(TextField::Title).to_string(), "Title is required");
        assert_eq!(
            ContentError::TooShort { field: TextField::Description, min: 10 }.to_string(),
            "Description must be at least 10 characters"
        );
        assert_eq!(
            ContentError::Profane(TextField::Title).to_string(),
            "Title contains inappropriate language"
        );
    }
}
