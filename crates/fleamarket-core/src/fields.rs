//! # Validated Field Types
//!
//! Immutable, self-validating wrappers around the raw strings a listing is
//! made of. A field is constructed through `parse` (or `FromStr`) and either
//! comes out fully valid or not at all; there is no way to hold an invalid
//! instance afterwards.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Field Construction                                │
//! │                                                                         │
//! │  Raw input (already trimmed by the caller)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  length check ──► TooShort / TooLong / Required                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  character / grammar check ──► InvalidFormat / NotAllowed              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  valid instance (immutable, ordered by the wrapped value)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The whole string must satisfy the rule; there is no prefix matching and
//! no clamping. The field types never trim: whitespace handling belongs to
//! the shell that collected the input.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ValidationError, ValidationResult};

/// Checks character count against an inclusive `[min, max]` window.
///
/// An empty value where at least one character is required reports
/// `Required` rather than `TooShort`, matching how the shells phrase the
/// re-prompt.
fn check_len(field: &str, raw: &str, min: usize, max: usize) -> ValidationResult<()> {
    let count = raw.chars().count();

    if count == 0 && min > 0 {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if count < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    if count > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Checks that every character satisfies the predicate.
fn check_chars(
    field: &str,
    raw: &str,
    reason: &str,
    allowed: impl Fn(char) -> bool,
) -> ValidationResult<()> {
    if !raw.chars().all(allowed) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Name
// =============================================================================

/// The display name of a listing.
///
/// ## Rules
/// - 1 to 30 characters
/// - Letters, digits, spaces, underscores and hyphens only
///
/// ## Example
/// ```rust
/// use fleamarket_core::Name;
///
/// assert!(Name::parse("Air Force_1").is_ok());
/// assert!(Name::parse("<script>").is_err());
/// assert!(Name::parse("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(String);

impl Name {
    /// Maximum length in characters.
    pub const MAX_LEN: usize = 30;

    /// Parses and validates a name.
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        check_len("name", raw, 1, Self::MAX_LEN)?;
        check_chars(
            "name",
            raw,
            "only letters, digits, spaces, underscores and hyphens are allowed",
            |c| c.is_ascii_alphanumeric() || c == ' ' || c == '_' || c == '-',
        )?;

        Ok(Name(raw.to_string()))
    }

    /// Returns the wrapped text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Name {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// Description
// =============================================================================

/// The free-text description of a listing. May be empty.
///
/// ## Rules
/// - 0 to 200 characters
/// - Letters, digits, common punctuation, the accented `è`, and spaces
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Description(String);

impl Description {
    /// Maximum length in characters.
    pub const MAX_LEN: usize = 200;

    /// Parses and validates a description.
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        check_len("description", raw, 0, Self::MAX_LEN)?;
        check_chars(
            "description",
            raw,
            "only letters, digits, common punctuation and spaces are allowed",
            |c| c.is_ascii_alphanumeric() || c == 'è' || " _-().,;&:='\"!".contains(c),
        )?;

        Ok(Description(raw.to_string()))
    }

    /// Returns the wrapped text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty description.
    pub fn empty() -> Self {
        Description(String::new())
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Description {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// Condition
// =============================================================================

/// The wear state of a listing.
///
/// The marketplace API exchanges conditions as small integer codes, and the
/// shells accept either the code or the tag name as input. `Display` prints
/// the code (the session/wire form); [`Condition::label`] gives the
/// human-readable tag for rendering.
///
/// ## Example
/// ```rust
/// use fleamarket_core::Condition;
///
/// let c = Condition::parse("1").unwrap();
/// assert_eq!(c, Condition::GoodCondition);
/// assert_eq!(c.to_string(), "1");
/// assert_eq!(c.label(), "GOOD_CONDITION");
/// assert!(Condition::parse("bogus").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Condition {
    /// Unused, as bought (code 0).
    AsNew,
    /// Used but fully functional (code 1).
    GoodCondition,
    /// Visible wear (code 2).
    AcceptableCondition,
}

impl Condition {
    /// All conditions, in code order.
    pub const ALL: [Condition; 3] = [
        Condition::AsNew,
        Condition::GoodCondition,
        Condition::AcceptableCondition,
    ];

    /// Parses from a numeric code string or a tag name.
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        match raw {
            "0" | "AS_NEW" => Ok(Condition::AsNew),
            "1" | "GOOD_CONDITION" => Ok(Condition::GoodCondition),
            "2" | "ACCEPTABLE_CONDITION" => Ok(Condition::AcceptableCondition),
            _ => Err(ValidationError::NotAllowed {
                field: "condition".to_string(),
                allowed: Condition::ALL.iter().map(|c| c.label().to_string()).collect(),
            }),
        }
    }

    /// Decodes the wire integer code.
    pub fn from_code(code: i64) -> ValidationResult<Self> {
        match code {
            0 => Ok(Condition::AsNew),
            1 => Ok(Condition::GoodCondition),
            2 => Ok(Condition::AcceptableCondition),
            _ => Err(ValidationError::OutOfRange {
                field: "condition".to_string(),
                min: 0,
                max: 2,
            }),
        }
    }

    /// Returns the wire integer code.
    #[inline]
    pub const fn code(&self) -> u8 {
        match self {
            Condition::AsNew => 0,
            Condition::GoodCondition => 1,
            Condition::AcceptableCondition => 2,
        }
    }

    /// Returns the human-readable tag.
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Condition::AsNew => "AS_NEW",
            Condition::GoodCondition => "GOOD_CONDITION",
            Condition::AcceptableCondition => "ACCEPTABLE_CONDITION",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Condition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// Brand
// =============================================================================

/// The manufacturer or brand of a listing.
///
/// ## Rules
/// - 1 to 20 characters
/// - Letters, underscores, hyphens and parentheses (no digits, no spaces)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Brand(String);

impl Brand {
    /// Maximum length in characters.
    pub const MAX_LEN: usize = 20;

    /// Parses and validates a brand.
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        check_len("brand", raw, 1, Self::MAX_LEN)?;
        check_chars(
            "brand",
            raw,
            "only letters, underscores, hyphens and parentheses are allowed",
            |c| c.is_ascii_alphabetic() || c == '_' || c == '-' || c == '(' || c == ')',
        )?;

        Ok(Brand(raw.to_string()))
    }

    /// Returns the wrapped text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Brand {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// Category
// =============================================================================

/// The marketplace category a listing is filed under.
///
/// ## Rules
/// - 1 to 30 characters
/// - Letters, underscores, hyphens, parentheses and spaces
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category(String);

impl Category {
    /// Maximum length in characters.
    pub const MAX_LEN: usize = 30;

    /// Parses and validates a category.
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        check_len("category", raw, 1, Self::MAX_LEN)?;
        check_chars(
            "category",
            raw,
            "only letters, underscores, hyphens, parentheses and spaces are allowed",
            |c| c.is_ascii_alphabetic() || c == '_' || c == '-' || c == '(' || c == ')' || c == ' ',
        )?;

        Ok(Category(raw.to_string()))
    }

    /// Returns the wrapped text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// Username
// =============================================================================

/// An account username.
///
/// ## Rules
/// - 1 to 30 characters, ASCII letters and digits only
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Username(String);

impl Username {
    /// Maximum length in characters.
    pub const MAX_LEN: usize = 30;

    /// Parses and validates a username.
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        check_len("username", raw, 1, Self::MAX_LEN)?;
        check_chars("username", raw, "only letters and digits are allowed", |c| {
            c.is_ascii_alphanumeric()
        })?;

        Ok(Username(raw.to_string()))
    }

    /// Returns the wrapped text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Username {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// Password
// =============================================================================

/// An account password.
///
/// ## Rules
/// - 6 to 25 characters, ASCII letters and digits only
///
/// The wrapped text is the user's secret; `Debug` redacts it so it can never
/// leak through logs.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Password(String);

impl Password {
    /// Minimum length in characters.
    pub const MIN_LEN: usize = 6;
    /// Maximum length in characters.
    pub const MAX_LEN: usize = 25;

    /// Parses and validates a password.
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        check_len("password", raw, Self::MIN_LEN, Self::MAX_LEN)?;
        check_chars("password", raw, "only letters and digits are allowed", |c| {
            c.is_ascii_alphanumeric()
        })?;

        Ok(Password(raw.to_string()))
    }

    /// Returns the wrapped text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

impl FromStr for Password {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// Email
// =============================================================================

/// Email address grammar: an alphanumeric local part with at most one dot
/// followed by letters, then `@`, an alphabetic domain, a dot, and a
/// lowercase top-level domain.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]+\.?[A-Za-z]*@[A-Za-z]+\.[a-z]+$").expect("email grammar compiles")
});

/// An account email address.
///
/// ## Rules
/// - 8 to 25 characters
/// - Must match the grammar above in full
///
/// ## Example
/// ```rust
/// use fleamarket_core::Email;
///
/// assert!(Email::parse("cicciopasticcio@gmail.com").is_ok());
/// assert!(Email::parse("sk@skrt.").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Email(String);

impl Email {
    /// Minimum length in characters.
    pub const MIN_LEN: usize = 8;
    /// Maximum length in characters.
    pub const MAX_LEN: usize = 25;

    /// Parses and validates an email address.
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        check_len("email", raw, Self::MIN_LEN, Self::MAX_LEN)?;

        if !EMAIL_RE.is_match(raw) {
            return Err(ValidationError::InvalidFormat {
                field: "email".to_string(),
                reason: "must look like name@domain.tld".to_string(),
            });
        }

        Ok(Email(raw.to_string()))
    }

    /// Returns the wrapped text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Email {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
