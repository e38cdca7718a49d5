//! Search filters: age range and post text search

use serde::Deserialize;

use super::ValidationError;

const DEFAULT_MIN_AGE: i32 = 0;
const DEFAULT_MAX_AGE: i32 = 100;

/// Maximum rows returned by a text search
pub const SEARCH_LIMIT: i64 = 10;

/// Query string of `GET /search/users/age`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgeRangeParams {
    #[serde(rename = "minAge")]
    pub min_age: Option<String>,
    #[serde(rename = "maxAge")]
    pub max_age: Option<String>,
}

/// Inclusive age bounds, both non-negative with `min <= max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    min: i32,
    max: i32,
}

impl AgeRange {
    pub fn new(min: i32, max: i32) -> Result<Self, ValidationError> {
        if min < 0 || max < 0 || min > max {
            return Err(invalid_range());
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn contains(&self, age: i32) -> bool {
        (self.min..=self.max).contains(&age)
    }
}

impl TryFrom<AgeRangeParams> for AgeRange {
    type Error = ValidationError;

    /// Absent or empty bounds fall back to 0 and 100.
    fn try_from(params: AgeRangeParams) -> Result<Self, Self::Error> {
        let min = parse_bound(params.min_age.as_deref(), DEFAULT_MIN_AGE)?;
        let max = parse_bound(params.max_age.as_deref(), DEFAULT_MAX_AGE)?;
        Self::new(min, max)
    }
}

fn parse_bound(raw: Option<&str>, default: i32) -> Result<i32, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse().map_err(|_| invalid_range()),
    }
}

fn invalid_range() -> ValidationError {
    ValidationError::InvalidRange { field: "age range" }
}

/// Query string of `GET /search/posts`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// Non-blank search text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
}

impl SearchTerm {
    pub fn new(raw: Option<&str>) -> Result<Self, ValidationError> {
        match raw {
            Some(s) if !s.trim().is_empty() => Ok(Self { raw: s.to_owned() }),
            _ => Err(ValidationError::Required {
                field: "Search query",
            }),
        }
    }

    /// Text as the client sent it
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Trimmed text used for matching
    pub fn needle(&self) -> &str {
        self.raw.trim()
    }

    /// `ILIKE` pattern: `%needle%`
    pub fn pattern(&self) -> String {
        format!("%{}%", self.needle())
    }
}

impl TryFrom<SearchParams> for SearchTerm {
    type Error = ValidationError;

    fn try_from(params: SearchParams) -> Result<Self, Self::Error> {
        Self::new(params.search.as_deref())
    }
}
