//! Version parsing and comparison.
//!
//! Python packaging versions are not strict semver: `23.1`, `0.40.0`,
//! `67.8.0.post1` and `24.0rc1` all occur in the wild. [`PackageVersion`]
//! compares release segments numerically (padding missing segments with
//! zero) and orders pre-, post- and dev-releases around the plain release.

use crate::error::{EnvcheckError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// Regex for a package version: release segments plus optional
/// pre/post/dev tags and a local label.
static PACKAGE_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^v?
        (?P<release>\d+(?:\.\d+)*)
        (?:[-_.]?(?P<pre_kind>alpha|beta|preview|pre|rc|a|b|c)[-_.]?(?P<pre_num>\d*))?
        (?:[-_.]?(?:post|rev|r)[-_.]?(?P<post_num>\d*))?
        (?:[-_.]?dev[-_.]?(?P<dev_num>\d*))?
        (?:\+[a-z0-9]+(?:[-_.][a-z0-9]+)*)?
        $",
    )
    .expect("PACKAGE_VERSION_REGEX must compile")
});

/// Regex for the first `major.minor[.patch]` in interpreter output.
static RUNTIME_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("RUNTIME_VERSION_REGEX must compile")
});

/// Pre-release phase, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum PreRelease {
    Alpha,
    Beta,
    Candidate,
}

impl PreRelease {
    fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "a" | "alpha" => Self::Alpha,
            "b" | "beta" => Self::Beta,
            _ => Self::Candidate,
        }
    }
}

/// A parsed package version such as `23.0.1` or `24.0rc1`.
///
/// Equality and ordering ignore the original spelling, so `23` equals
/// `23.0.0`.
#[derive(Debug, Clone)]
pub struct PackageVersion {
    raw: String,
    release: Vec<u64>,
    pre: Option<(PreRelease, u64)>,
    post: Option<u64>,
    dev: Option<u64>,
}

impl PackageVersion {
    /// Parse a version string.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let invalid = || EnvcheckError::InvalidVersion {
            version: input.to_string(),
        };

        let caps = PACKAGE_VERSION_REGEX.captures(trimmed).ok_or_else(invalid)?;

        let release = caps["release"]
            .split('.')
            .map(|s| s.parse::<u64>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>>>()?;

        let number = |name: &str| -> Result<u64> {
            match caps.name(name).map(|m| m.as_str()) {
                None | Some("") => Ok(0),
                Some(n) => n.parse().map_err(|_| invalid()),
            }
        };

        let pre = match caps.name("pre_kind") {
            Some(kind) => Some((PreRelease::from_tag(kind.as_str()), number("pre_num")?)),
            None => None,
        };
        let post = match caps.name("post_num") {
            Some(_) => Some(number("post_num")?),
            None => None,
        };
        let dev = match caps.name("dev_num") {
            Some(_) => Some(number("dev_num")?),
            None => None,
        };

        Ok(Self {
            raw: trimmed.to_string(),
            release,
            pre,
            post,
            dev,
        })
    }

    /// The version exactly as it was written (trimmed).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Release segment at `index`, zero when absent.
    fn segment(&self, index: usize) -> u64 {
        self.release.get(index).copied().unwrap_or(0)
    }

    /// Sort key for everything after the release segments.
    ///
    /// `X.devN < X.aN < X.bN < X.rcN < X < X.postN`, and a dev tag sorts
    /// before the same version without it.
    fn suffix_key(&self) -> (i8, u64, Option<u64>, u64) {
        let (phase, pre_num) = match (self.pre, self.post, self.dev) {
            (Some((kind, n)), _, _) => (kind as i8, n),
            (None, None, Some(_)) => (-1, 0),
            _ => (3, 0),
        };
        let dev = self.dev.unwrap_or(u64::MAX);
        (phase, pre_num, self.post, dev)
    }
}

impl Ord for PackageVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.release.len().max(other.release.len());
        for i in 0..len {
            match self.segment(i).cmp(&other.segment(i)) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        self.suffix_key().cmp(&other.suffix_key())
    }
}

impl PartialOrd for PackageVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PackageVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PackageVersion {}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// The `major.minor` pair an interpreter must match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeRequirement {
    pub major: u64,
    pub minor: u64,
}

impl RuntimeRequirement {
    /// Create a requirement for `major.minor`.
    pub fn new(major: u64, minor: u64) -> Self {
        Self { major, minor }
    }

    /// Parse `"3.9"`. Anything other than two numeric segments is rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || EnvcheckError::InvalidVersion {
            version: input.to_string(),
        };
        let (major, minor) = input.trim().split_once('.').ok_or_else(invalid)?;
        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

impl Default for RuntimeRequirement {
    fn default() -> Self {
        Self::new(3, 9)
    }
}

impl fmt::Display for RuntimeRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// An interpreter version as reported by the interpreter itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// The version text the interpreter printed, e.g. `Python 3.9.18`.
    pub raw: String,
}

impl RuntimeVersion {
    /// Create a version without raw text (raw becomes `major.minor.patch`).
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            raw: format!("{}.{}.{}", major, minor, patch),
        }
    }

    /// Extract the first `major.minor[.patch]` from interpreter output.
    pub fn from_output(output: &str) -> Option<Self> {
        let caps = RUNTIME_VERSION_REGEX.captures(output)?;
        let major = caps.get(1)?.as_str().parse().ok()?;
        let minor = caps.get(2)?.as_str().parse().ok()?;
        let patch = caps
            .get(3)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        let raw = output
            .lines()
            .find(|l| !l.trim().is_empty())
            .unwrap_or(output)
            .trim()
            .to_string();
        Some(Self {
            major,
            minor,
            patch,
            raw,
        })
    }

    /// The `(major, minor)` pair.
    pub fn tuple(&self) -> (u64, u64) {
        (self.major, self.minor)
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> PackageVersion {
        PackageVersion::parse(s).unwrap()
    }

    #[test]
    fn older_major_is_less() {
        assert!(v("22.0.0") < v("23.0.0"));
    }

    #[test]
    fn equal_versions_compare_equal() {
        assert_eq!(v("23.0.0"), v("23.0.0"));
        assert!(v("23.0.0") >= v("23.0.0"));
    }

    #[test]
    fn minor_bump_is_greater() {
        assert!(v("23.1.5") > v("23.0.0"));
    }

    #[test]
    fn comparison_is_numeric_not_lexical() {
        // Lexically "0.9" > "0.40.0"; numerically it is older.
        assert!(v("0.9") < v("0.40.0"));
        assert!(v("10.0") > v("9.99.99"));
    }

    #[test]
    fn missing_segments_are_zero() {
        assert_eq!(v("23"), v("23.0.0"));
        assert_eq!(v("23.1"), v("23.1.0"));
        assert!(v("23.1") < v("23.1.1"));
    }

    #[test]
    fn pre_releases_sort_before_release() {
        assert!(v("24.0rc1") < v("24.0"));
        assert!(v("24.0a1") < v("24.0b1"));
        assert!(v("24.0b2") < v("24.0rc1"));
        assert!(v("24.0.dev0") < v("24.0a1"));
    }

    #[test]
    fn post_release_sorts_after_release() {
        assert!(v("67.8.0.post1") > v("67.8.0"));
        assert!(v("67.8.0.post1") < v("67.8.1"));
    }

    #[test]
    fn huge_post_number_still_sorts_after_release() {
        assert!(v("1.0.post9223372036854775808") > v("1.0"));
        assert!(v("1.0.post18446744073709551615") > v("1.0.post0"));
    }

    #[test]
    fn leading_v_and_local_label_are_accepted() {
        assert_eq!(v("v1.2.3"), v("1.2.3"));
        assert_eq!(v("1.2.3+ubuntu1").as_str(), "1.2.3+ubuntu1");
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(v(" 23.0.1\n").as_str(), "23.0.1");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(PackageVersion::parse("").is_err());
        assert!(PackageVersion::parse("abc").is_err());
        assert!(PackageVersion::parse("1..2").is_err());
        assert!(matches!(
            PackageVersion::parse("latest"),
            Err(EnvcheckError::InvalidVersion { .. })
        ));
    }

    #[test]
    fn runtime_requirement_parses_major_minor() {
        assert_eq!(
            RuntimeRequirement::parse("3.9").unwrap(),
            RuntimeRequirement::new(3, 9)
        );
        assert_eq!(
            RuntimeRequirement::parse("3.12").unwrap(),
            RuntimeRequirement::new(3, 12)
        );
    }

    #[test]
    fn runtime_requirement_rejects_other_shapes() {
        assert!(RuntimeRequirement::parse("3").is_err());
        assert!(RuntimeRequirement::parse("3.9.1").is_err());
        assert!(RuntimeRequirement::parse("three.nine").is_err());
    }

    #[test]
    fn runtime_requirement_default_is_3_9() {
        assert_eq!(RuntimeRequirement::default().to_string(), "3.9");
    }

    #[test]
    fn runtime_version_from_python_output() {
        let version = RuntimeVersion::from_output("Python 3.9.18\n").unwrap();
        assert_eq!((version.major, version.minor, version.patch), (3, 9, 18));
        assert_eq!(version.raw, "Python 3.9.18");
    }

    #[test]
    fn runtime_version_without_patch() {
        let version = RuntimeVersion::from_output("Python 3.13").unwrap();
        assert_eq!(version.tuple(), (3, 13));
        assert_eq!(version.patch, 0);
    }

    #[test]
    fn runtime_version_from_unrelated_output() {
        assert!(RuntimeVersion::from_output("command not found").is_none());
    }
}
