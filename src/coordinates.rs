use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Reference syntax, quoted in error messages.
pub const SYNTAX: &str = "mvn:[repository_url!]groupId/artifactId[/[version]/[type]/[classifier]]";

/// Scheme prefix of a maven reference.
pub const MVN_SCHEME: &str = "mvn:";

/// Version used when the reference has no version segment.
pub const VERSION_LATEST: &str = "LATEST";

/// Artifact type used when the reference has no type segment.
pub const TYPE_JAR: &str = "jar";

const REPOSITORY_SEPARATOR: char = '!';
const ARTIFACT_SEPARATOR: char = '/';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed maven reference: {reason} (syntax: {})", SYNTAX)]
pub struct MalformedCoordinate {
    pub reason: String,
}

fn malformed(reason: impl Into<String>) -> MalformedCoordinate {
    MalformedCoordinate { reason: reason.into() }
}

/// Classifier distinguishing artifacts built from the same coordinates, e.g.
///  "sources" or "javadoc". An empty classifier segment in a reference is the
///  same as no classifier at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Classifier {
    Unclassified,
    Classified(String),
}

impl Classifier {
    pub fn from_segment(segment: &str) -> Classifier {
        if segment.trim().is_empty() {
            Classifier::Unclassified
        }
        else {
            Classifier::Classified(segment.to_string())
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Classifier::Unclassified => None,
            Classifier::Classified(classifier) => Some(classifier),
        }
    }

    /// The classifier as it is embedded in an artifact file name, with its
    ///  leading '-'. Empty for unclassified artifacts.
    pub fn file_name_suffix(&self) -> String {
        match self {
            Classifier::Unclassified => "".to_string(),
            Classifier::Classified(classifier) => format!("-{}", classifier),
        }
    }
}

/// Parsed maven reference. The group / artifact / version triple plus the
///  artifact type ("jar", "war", "pom", ...) used as the file extension, an
///  optional classifier, and the optional explicit repository the reference
///  was pinned to.
///
/// Coordinates are immutable values; operations that would change them (see
///  the snapshot normalization in [`crate::paths`]) return a fresh instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MavenCoordinates {
    pub repository_url: Option<String>,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub extension: String,
    pub classifier: Classifier,
}

impl MavenCoordinates {
    /// Parse a reference without its `mvn:` scheme prefix, i.e.
    ///  `[repository_url!]groupId/artifactId[/[version]/[type]/[classifier]]`.
    ///
    /// The repository part (if any) is everything up to the *last* '!' -
    ///  repository URLs may contain '/'-delimited paths but never a trailing
    ///  '!'. Missing or blank version / type / classifier segments fall back
    ///  to "LATEST" / "jar" / unclassified.
    pub fn parse(reference: &str) -> Result<MavenCoordinates, MalformedCoordinate> {
        if reference.is_empty() {
            return Err(malformed("reference must not be empty"));
        }
        if reference.starts_with(REPOSITORY_SEPARATOR) || reference.ends_with(REPOSITORY_SEPARATOR) {
            return Err(malformed(format!("reference must not start or end with '{}'", REPOSITORY_SEPARATOR)));
        }

        match reference.rfind(REPOSITORY_SEPARATOR) {
            Some(pos) => {
                let mut coordinates = Self::parse_artifact_part(&reference[pos + 1..])?;
                coordinates.repository_url = Some(reference[..pos].to_string());
                Ok(coordinates)
            }
            None => Self::parse_artifact_part(reference),
        }
    }

    fn parse_artifact_part(part: &str) -> Result<MavenCoordinates, MalformedCoordinate> {
        let segments: Vec<&str> = part.split(ARTIFACT_SEPARATOR).collect();
        if segments.len() < 2 {
            return Err(malformed("expected at least groupId/artifactId"));
        }

        let group_id = segments[0];
        if group_id.trim().is_empty() {
            return Err(malformed("groupId must not be blank"));
        }
        let artifact_id = segments[1];
        if artifact_id.trim().is_empty() {
            return Err(malformed("artifactId must not be blank"));
        }

        let version = match segments.get(2) {
            Some(s) if !s.trim().is_empty() => s.to_string(),
            _ => VERSION_LATEST.to_string(),
        };
        let extension = match segments.get(3) {
            Some(s) if !s.trim().is_empty() => s.to_string(),
            _ => TYPE_JAR.to_string(),
        };
        let classifier = match segments.get(4) {
            Some(s) => Classifier::from_segment(s),
            None => Classifier::Unclassified,
        };

        Ok(MavenCoordinates {
            repository_url: None,
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version,
            extension,
            classifier,
        })
    }

    /// Canonical reference string (scheme and repository prefix excluded):
    ///  `groupId/artifactId/version[/type][/classifier]`.
    ///
    /// The type segment is omitted when it is the default "jar" - unless a
    ///  classifier is present, in which case "jar" is emitted anyway so the
    ///  classifier lands in its own grammar slot.
    pub fn to_reference(&self) -> String {
        let mut reference = format!("{}/{}/{}", self.group_id, self.artifact_id, self.version);
        if self.extension != TYPE_JAR {
            reference.push(ARTIFACT_SEPARATOR);
            reference.push_str(&self.extension);
        }
        if let Classifier::Classified(classifier) = &self.classifier {
            if self.extension == TYPE_JAR {
                reference.push(ARTIFACT_SEPARATOR);
                reference.push_str(TYPE_JAR);
            }
            reference.push(ARTIFACT_SEPARATOR);
            reference.push_str(classifier);
        }
        reference
    }
}

impl fmt::Display for MavenCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_reference())
    }
}

impl FromStr for MavenCoordinates {
    type Err = MalformedCoordinate;

    /// Like [`MavenCoordinates::parse`] but tolerates (and strips) a leading
    ///  `mvn:` scheme.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MavenCoordinates::parse(s.strip_prefix(MVN_SCHEME).unwrap_or(s))
    }
}

impl Serialize for MavenCoordinates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_reference())
    }
}

impl<'de> Deserialize<'de> for MavenCoordinates {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let reference = String::deserialize(deserializer)?;
        reference.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use rstest::*;
    use super::*;

    fn classified(s: &str) -> Classifier {
        Classifier::Classified(s.to_string())
    }

    #[rstest]
    #[case::group_artifact_only("g/a", None, "g", "a", "LATEST", "jar", Classifier::Unclassified)]
    #[case::with_version("g/a/1.0", None, "g", "a", "1.0", "jar", Classifier::Unclassified)]
    #[case::with_type("g/a/1.0/war", None, "g", "a", "1.0", "war", Classifier::Unclassified)]
    #[case::all_segments("g/a/1.0/war/sources", None, "g", "a", "1.0", "war", classified("sources"))]
    #[case::dotted_group("org.apache.commons/commons-lang3/3.12.0", None, "org.apache.commons", "commons-lang3", "3.12.0", "jar", Classifier::Unclassified)]
    #[case::blank_version_defaults("g/a//war", None, "g", "a", "LATEST", "war", Classifier::Unclassified)]
    #[case::blank_type_defaults("g/a/1.0//sources", None, "g", "a", "1.0", "jar", classified("sources"))]
    #[case::blank_classifier_is_absent("g/a/1.0/war/", None, "g", "a", "1.0", "war", Classifier::Unclassified)]
    #[case::repository("repo!g/a/1.0", Some("repo"), "g", "a", "1.0", "jar", Classifier::Unclassified)]
    #[case::repository_url("https://repo.example.org/maven2!g/a", Some("https://repo.example.org/maven2"), "g", "a", "LATEST", "jar", Classifier::Unclassified)]
    #[case::repository_split_at_last_separator("http://host/r!x!g/a", Some("http://host/r!x"), "g", "a", "LATEST", "jar", Classifier::Unclassified)]
    fn test_parse(
        #[case] reference: &str,
        #[case] repository_url: Option<&str>,
        #[case] group_id: &str,
        #[case] artifact_id: &str,
        #[case] version: &str,
        #[case] extension: &str,
        #[case] classifier: Classifier,
    ) {
        let actual = MavenCoordinates::parse(reference).unwrap();
        assert_eq!(actual.repository_url.as_deref(), repository_url);
        assert_eq!(actual.group_id, group_id);
        assert_eq!(actual.artifact_id, artifact_id);
        assert_eq!(actual.version, version);
        assert_eq!(actual.extension, extension);
        assert_eq!(actual.classifier, classifier);
    }

    #[rstest]
    #[case::empty("")]
    #[case::leading_repository_separator("!g/a")]
    #[case::trailing_repository_separator("g/a!")]
    #[case::single_segment("g")]
    #[case::blank_group("/a")]
    #[case::blank_group_spaces("  /a")]
    #[case::blank_artifact("g/")]
    #[case::blank_artifact_spaces("g/  ")]
    fn test_parse_malformed(#[case] reference: &str) {
        assert!(MavenCoordinates::parse(reference).is_err());
    }

    #[rstest]
    #[case::default_type("g/a/1.0", "g/a/1.0")]
    #[case::explicit_type("g/a/1.0/war", "g/a/1.0/war")]
    #[case::jar_reemitted_for_classifier("g/a/1.0/jar/sources", "g/a/1.0/jar/sources")]
    #[case::type_and_classifier("g/a/1.0/war/sources", "g/a/1.0/war/sources")]
    #[case::defaults_made_explicit("g/a", "g/a/LATEST")]
    #[case::blank_type_with_classifier("g/a/1.0//sources", "g/a/1.0/jar/sources")]
    #[case::repository_not_reproduced("repo!g/a/1.0", "g/a/1.0")]
    fn test_to_reference(#[case] reference: &str, #[case] expected: &str) {
        let coordinates = MavenCoordinates::parse(reference).unwrap();
        assert_eq!(coordinates.to_reference(), expected);
        assert_eq!(coordinates.to_string(), expected);
    }

    /// Re-parsing the canonical form must resolve to the same coordinates.
    #[rstest]
    #[case("g/a")]
    #[case("g/a/1.0")]
    #[case("g/a/1.0/war")]
    #[case("g/a/1.0/jar/sources")]
    #[case("g/a/1.0/war/sources")]
    fn test_reference_round_trip(#[case] reference: &str) {
        let coordinates = MavenCoordinates::parse(reference).unwrap();
        let reparsed = MavenCoordinates::parse(&coordinates.to_reference()).unwrap();
        assert_eq!(reparsed, coordinates);
    }

    #[test]
    fn test_from_str_strips_scheme() {
        let coordinates: MavenCoordinates = "mvn:g/a/1.0".parse().unwrap();
        assert_eq!(coordinates.group_id, "g");
        assert_eq!(coordinates.version, "1.0");

        let without_scheme: MavenCoordinates = "g/a/1.0".parse().unwrap();
        assert_eq!(without_scheme, coordinates);
    }

    #[test]
    fn test_serde_as_reference_string() {
        let coordinates = MavenCoordinates::parse("g/a/1.0/war/sources").unwrap();
        let json = serde_json::to_string(&coordinates).unwrap();
        assert_eq!(json, r#""g/a/1.0/war/sources""#);

        let deserialized: MavenCoordinates = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, coordinates);

        assert!(serde_json::from_str::<MavenCoordinates>(r#""!g/a""#).is_err());
    }
}
