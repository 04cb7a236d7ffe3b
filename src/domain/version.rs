//! Version numbers with one to three numeric fields
//!
//! Accepted forms:
//! - `2` (major only)
//! - `2.3` (major and minor)
//! - `0.10.11` (major, minor and patch)
//!
//! Anything after the first `-` of the third field (`2.0.0-beta`) is dropped.
//! Fields that were omitted from the text stay omitted when the version is
//! rendered or bumped, so `0.4` bumps to `1.0` rather than `1.0.0`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("Empty version string")]
    Empty,

    #[error("Invalid {field} number in version: '{text}'")]
    InvalidNumber { field: Field, text: String },

    #[error("Invalid version field (want major/minor/patch): '{0}'")]
    InvalidField(String),

    #[error("Cannot bump {0}: number is too large")]
    Overflow(Field),
}

/// One of the three numeric fields of a version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Major,
    Minor,
    Patch,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Major => "major",
            Field::Minor => "minor",
            Field::Patch => "patch",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(Field::Major),
            "minor" => Ok(Field::Minor),
            "patch" => Ok(Field::Patch),
            other => Err(VersionError::InvalidField(other.to_string())),
        }
    }
}

/// A version number such as `1`, `1.4` or `1.4.2`
///
/// Fields are present as a prefix: a patch number implies a minor number.
/// The fields are private so that invariant cannot be broken from outside.
///
/// Ordering is lexicographic over (major, minor, patch). An absent field
/// sorts before any present one, so `1` < `1.0` and `1.2` < `1.2.0`. This
/// only matters when comparing versions with a different number of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    major: i64,
    minor: Option<i64>,
    patch: Option<i64>,
}

impl Version {
    /// Creates a major-only version (`"3"`)
    pub fn new(major: i64) -> Self {
        Self {
            major,
            minor: None,
            patch: None,
        }
    }

    /// Returns this version with the minor number set
    pub fn with_minor(self, minor: i64) -> Self {
        Self {
            minor: Some(minor),
            ..self
        }
    }

    /// Returns this version with the patch number set.
    /// A missing minor number is filled in with 0.
    pub fn with_patch(self, patch: i64) -> Self {
        Self {
            minor: Some(self.minor.unwrap_or(0)),
            patch: Some(patch),
            ..self
        }
    }

    pub fn major(&self) -> i64 {
        self.major
    }

    pub fn minor(&self) -> Option<i64> {
        self.minor
    }

    pub fn patch(&self) -> Option<i64> {
        self.patch
    }

    /// Parses a version string of the forms `2`, `2.3` or `0.10.11`.
    ///
    /// The text is split into at most three parts on `.`, so anything past
    /// the second dot lands in the patch part. The patch part is then cut at
    /// its first `-` and only the prefix is parsed.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        if text.is_empty() {
            return Err(VersionError::Empty);
        }

        let mut parts = text.splitn(3, '.');
        let major = parse_number(Field::Major, parts.next().unwrap_or_default())?;
        let minor = parts
            .next()
            .map(|part| parse_number(Field::Minor, part))
            .transpose()?;
        let patch = parts
            .next()
            .map(|part| {
                let number = part.split('-').next().unwrap_or(part);
                parse_number(Field::Patch, number)
            })
            .transpose()?;

        Ok(Self {
            major,
            minor,
            patch,
        })
    }

    /// Increments the given field.
    ///
    /// - `major`: present minor and patch numbers reset to 0
    /// - `minor`: a missing minor counts as 0, a present patch resets to 0
    /// - `patch`: a missing patch counts as 0 (and so does a missing minor)
    pub fn bump(self, field: Field) -> Result<Self, VersionError> {
        let next = match field {
            Field::Major => Self {
                major: increment(self.major, field)?,
                minor: self.minor.map(|_| 0),
                patch: self.patch.map(|_| 0),
            },
            Field::Minor => Self {
                minor: Some(increment(self.minor.unwrap_or(0), field)?),
                patch: self.patch.map(|_| 0),
                ..self
            },
            Field::Patch => Self {
                minor: Some(self.minor.unwrap_or(0)),
                patch: Some(increment(self.patch.unwrap_or(0), field)?),
                ..self
            },
        };
        Ok(next)
    }

    /// Increments a field given by name (`major`, `minor` or `patch`)
    pub fn bump_named(self, field: &str) -> Result<Self, VersionError> {
        self.bump(field.parse()?)
    }
}

/// Reports whether `a` is a lower version number than `b`
pub fn less(a: &Version, b: &Version) -> bool {
    a < b
}

fn parse_number(field: Field, text: &str) -> Result<i64, VersionError> {
    text.parse::<i64>()
        .map_err(|_| VersionError::InvalidNumber {
            field,
            text: text.to_string(),
        })
}

fn increment(value: i64, field: Field) -> Result<i64, VersionError> {
    value.checked_add(1).ok_or(VersionError::Overflow(field))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{}", minor)?;
            if let Some(patch) = self.patch {
                write!(f, ".{}", patch)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn bump_keeps_field_count() {
        let cases = [
            ("0.4", Field::Major, "1.0"),
            ("0.4.0", Field::Major, "1.0.0"),
            ("1.0", Field::Major, "2.0"),
            ("1", Field::Major, "2"),
            ("1.0.1", Field::Minor, "1.1.0"),
            ("1", Field::Minor, "1.1"),
            ("1.9", Field::Minor, "1.10"),
            ("1.2", Field::Patch, "1.2.1"),
            ("1.2.3", Field::Patch, "1.2.4"),
        ];

        for (input, field, expected) in cases {
            let bumped = v(input).bump(field).unwrap();
            assert_eq!(bumped.to_string(), expected, "bump {} of {}", field, input);
        }
    }

    #[test]
    fn patch_bump_fills_missing_minor() {
        let bumped = v("1").bump(Field::Patch).unwrap();
        assert_eq!(bumped.to_string(), "1.0.1");
        assert_eq!(bumped.minor(), Some(0));
    }

    #[test]
    fn parse_drops_suffix_after_dash() {
        assert_eq!(v("2.0.0-beta"), v("2.0.0"));
        assert_eq!(v("1.2.3-rc.1").to_string(), "1.2.3");
    }

    #[test]
    fn parse_accepts_signs() {
        assert_eq!(v("+1.2").major(), 1);
        assert_eq!(v("-1").major(), -1);
    }

    #[test]
    fn parse_records_missing_fields() {
        let version = v("3");
        assert_eq!(version.major(), 3);
        assert_eq!(version.minor(), None);
        assert_eq!(version.patch(), None);

        let version = v("3.1");
        assert_eq!(version.minor(), Some(1));
        assert_eq!(version.patch(), None);
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(Version::parse(""), Err(VersionError::Empty));
    }

    #[test]
    fn parse_rejects_bad_numbers() {
        assert_eq!(
            Version::parse("a.1"),
            Err(VersionError::InvalidNumber {
                field: Field::Major,
                text: "a".to_string()
            })
        );
        assert!(matches!(
            Version::parse("1..3"),
            Err(VersionError::InvalidNumber {
                field: Field::Minor,
                ..
            })
        ));
        assert!(matches!(
            Version::parse("1.2.x"),
            Err(VersionError::InvalidNumber {
                field: Field::Patch,
                ..
            })
        ));
        assert!(Version::parse(" 1.2").is_err());
        assert!(Version::parse("1.").is_err());
    }

    #[test]
    fn fourth_segment_folds_into_patch() {
        // "3.4" is not an integer
        assert!(matches!(
            Version::parse("1.2.3.4"),
            Err(VersionError::InvalidNumber {
                field: Field::Patch,
                ..
            })
        ));
        // but the dash cut happens first
        assert_eq!(v("1.2.3-4.5").to_string(), "1.2.3");
    }

    #[test]
    fn field_names_are_exact() {
        assert_eq!("major".parse::<Field>(), Ok(Field::Major));
        assert_eq!("minor".parse::<Field>(), Ok(Field::Minor));
        assert_eq!("patch".parse::<Field>(), Ok(Field::Patch));
        assert_eq!(
            "bogus".parse::<Field>(),
            Err(VersionError::InvalidField("bogus".to_string()))
        );
        assert!("Major".parse::<Field>().is_err());
    }

    #[test]
    fn bump_named_rejects_unknown_field() {
        assert_eq!(
            v("1.2.3").bump_named("bogus"),
            Err(VersionError::InvalidField("bogus".to_string()))
        );
        assert_eq!(v("1.2.3").bump_named("minor").unwrap().to_string(), "1.3.0");
    }

    #[test]
    fn bump_reports_overflow() {
        let max = Version::new(i64::MAX);
        assert_eq!(max.bump(Field::Major), Err(VersionError::Overflow(Field::Major)));
    }

    #[test]
    fn ordering_cases() {
        assert!(less(&v("1"), &v("2")));
        assert!(!less(&v("1.3.7"), &v("1.3.7")));
        assert!(!less(&v("1.3.7"), &v("1.3.6")));
        assert!(less(&v("1.3.6"), &v("1.3.7")));
        assert!(less(&v("1.9.9"), &v("2.0.0")));
        assert!(less(&v("1.2.10"), &v("1.10.0")));
    }

    #[test]
    fn missing_field_sorts_first() {
        assert!(less(&v("1"), &v("1.0")));
        assert!(less(&v("1.2"), &v("1.2.0")));
        assert!(less(&v("1"), &v("1.-5")));
    }

    #[test]
    fn builders_keep_prefix() {
        let version = Version::new(2).with_patch(7);
        assert_eq!(version.to_string(), "2.0.7");
        assert_eq!(Version::new(2).with_minor(1).to_string(), "2.1");
    }

    #[test]
    fn serde_as_string() {
        let version = v("1.2.3");
        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(json, "\"1.2.3\"");

        let parsed: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, version);
        assert!(serde_json::from_str::<Version>("\"x\"").is_err());
    }

    fn full_version() -> impl Strategy<Value = Version> {
        (0..10_000i64, 0..10_000i64, 0..10_000i64)
            .prop_map(|(major, minor, patch)| Version::new(major).with_minor(minor).with_patch(patch))
    }

    fn any_version() -> impl Strategy<Value = Version> {
        (0..10_000i64, proptest::option::of(0..10_000i64), proptest::option::of(0..10_000i64))
            .prop_map(|(major, minor, patch)| {
                let version = Version::new(major);
                match (minor, patch) {
                    (Some(minor), Some(patch)) => version.with_minor(minor).with_patch(patch),
                    (Some(minor), None) => version.with_minor(minor),
                    _ => version,
                }
            })
    }

    proptest! {
        #[test]
        fn display_parse_roundtrip(version in any_version()) {
            prop_assert_eq!(Version::parse(&version.to_string()).unwrap(), version);
        }

        #[test]
        fn short_text_roundtrip(major in 0..10_000i64, minor in proptest::option::of(0..10_000i64)) {
            let text = match minor {
                Some(minor) => format!("{}.{}", major, minor),
                None => major.to_string(),
            };
            prop_assert_eq!(Version::parse(&text).unwrap().to_string(), text);
        }

        #[test]
        fn major_bump_resets_present_fields(version in any_version()) {
            let bumped = version.bump(Field::Major).unwrap();
            prop_assert_eq!(bumped.major(), version.major() + 1);
            prop_assert_eq!(bumped.minor(), version.minor().map(|_| 0));
            prop_assert_eq!(bumped.patch(), version.patch().map(|_| 0));
        }

        #[test]
        fn minor_bump_increments_effective_minor(version in any_version()) {
            let bumped = version.bump(Field::Minor).unwrap();
            prop_assert_eq!(bumped.major(), version.major());
            prop_assert_eq!(bumped.minor(), Some(version.minor().unwrap_or(0) + 1));
            prop_assert_eq!(bumped.patch(), version.patch().map(|_| 0));
        }

        #[test]
        fn patch_bump_increments_effective_patch(version in any_version()) {
            let bumped = version.bump(Field::Patch).unwrap();
            prop_assert_eq!(bumped.major(), version.major());
            prop_assert_eq!(bumped.minor(), Some(version.minor().unwrap_or(0)));
            prop_assert_eq!(bumped.patch(), Some(version.patch().unwrap_or(0) + 1));
        }

        #[test]
        fn bump_is_always_greater(version in any_version()) {
            for field in [Field::Major, Field::Minor, Field::Patch] {
                let bumped = version.bump(field).unwrap();
                prop_assert!(less(&version, &bumped));
            }
        }

        #[test]
        fn less_matches_tuple_order(a in full_version(), b in full_version()) {
            let key = |v: &Version| (v.major(), v.minor(), v.patch());
            prop_assert_eq!(less(&a, &b), key(&a) < key(&b));
            prop_assert!(!(less(&a, &b) && less(&b, &a)));
            prop_assert_eq!(!less(&a, &b) && !less(&b, &a), a == b);
        }
    }
}
