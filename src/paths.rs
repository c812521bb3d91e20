use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::coordinates::{MalformedCoordinate, MavenCoordinates, MVN_SCHEME};

lazy_static! {
    static ref TIMESTAMPED_VERSION_REGEX: Regex = Regex::new(r"^(.*)-(\d{8}\.\d{6})-(\d+)$").unwrap();
}

/// Version-level and artifact-level metadata descriptor, remote variant.
pub const METADATA_FILE: &str = "maven-metadata.xml";

/// Metadata descriptor variant maintained by local installs.
pub const METADATA_FILE_LOCAL: &str = "maven-metadata-local.xml";

const VERSION_SNAPSHOT: &str = "SNAPSHOT";

/// A deployed snapshot version of the `<base>-<yyyyMMdd.HHmmss>-<buildNumber>`
///  form, e.g. "1.0-20230101.120530-7". The digit widths are load-bearing:
///  8-digit date, 6-digit time, at least one build-number digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampedVersion {
    pub base: String,
    pub timestamp: String,
    pub build_number: String,
}

impl TimestampedVersion {
    pub fn parse(version: &str) -> Option<TimestampedVersion> {
        TIMESTAMPED_VERSION_REGEX.captures(version).map(|captures| TimestampedVersion {
            base: captures[1].to_string(),
            timestamp: captures[2].to_string(),
            build_number: captures[3].to_string(),
        })
    }

    /// The symbolic `<base>-SNAPSHOT` form of this version.
    pub fn base_snapshot(&self) -> String {
        format!("{}-{}", self.base, VERSION_SNAPSHOT)
    }
}

fn group_path(coordinates: &MavenCoordinates) -> String {
    coordinates.group_id.replace('.', "/")
}

/// When `version` is a timestamped snapshot, the same coordinates with the
///  version folded back to its symbolic `-SNAPSHOT` base. Callers adopt this
///  for follow-up calls (metadata paths, latest-pointer file names) that must
///  see the symbolic rather than the deployed version.
fn normalized_for(coordinates: &MavenCoordinates, version: &str) -> Option<MavenCoordinates> {
    TimestampedVersion::parse(version).map(|timestamped| {
        let mut normalized = coordinates.clone();
        normalized.version = timestamped.base_snapshot();
        normalized
    })
}

/// Repository-relative artifact path for the coordinates' own version.
///  See [`artifact_path_for_version`].
pub fn artifact_path(coordinates: &MavenCoordinates) -> (String, Option<MavenCoordinates>) {
    artifact_path_for_version(coordinates, &coordinates.version)
}

/// Maven2-layout path for an explicit version:
///  `{group dots as slashes}/{artifact}/{version}/{artifact}-{version}[-classifier].{type}`,
///  prefixed with the repository URL when the reference carried one.
///
/// The returned path always embeds `version` literally, even when it is a
///  timestamped snapshot; the second element is then the normalized
///  coordinates (version folded to `-SNAPSHOT`) for the caller to adopt.
pub fn artifact_path_for_version(coordinates: &MavenCoordinates, version: &str) -> (String, Option<MavenCoordinates>) {
    let mut path = format!(
        "{}/{}/{}/{}-{}{}.{}",
        group_path(coordinates),
        coordinates.artifact_id,
        version,
        coordinates.artifact_id,
        version,
        coordinates.classifier.file_name_suffix(),
        coordinates.extension,
    );
    if let Some(repository_url) = &coordinates.repository_url {
        path = format!("{}/{}", repository_url, path);
    }
    (path, normalized_for(coordinates, version))
}

/// Artifact file name without any directory part. With `exclude_version` the
///  name is the bare `{artifact}.{type}` used for "latest pointer" style
///  files. Timestamped snapshot versions normalize as in
///  [`artifact_path_for_version`].
pub fn artifact_file_name(coordinates: &MavenCoordinates, version: &str, exclude_version: bool) -> (String, Option<MavenCoordinates>) {
    let file_name = if exclude_version {
        format!("{}.{}", coordinates.artifact_id, coordinates.extension)
    }
    else {
        format!(
            "{}-{}{}.{}",
            coordinates.artifact_id,
            version,
            coordinates.classifier.file_name_suffix(),
            coordinates.extension,
        )
    };
    (file_name, normalized_for(coordinates, version))
}

/// Resolve a symbolic snapshot version against a concrete deployment: the
///  literal "SNAPSHOT" is replaced by the timestamp and the build number is
///  appended. A version without "SNAPSHOT" gets the build number appended
///  unchanged - that is intentional, not an error.
pub fn snapshot_version(version: &str, timestamp: &str, build_number: &str) -> String {
    format!("{}-{}", version.replace(VERSION_SNAPSHOT, timestamp), build_number)
}

/// Path of a deployed snapshot file: the directory layout keeps the symbolic
///  `version`, only the file name embeds the resolved timestamped string.
pub fn snapshot_path(coordinates: &MavenCoordinates, version: &str, timestamp: &str, build_number: &str) -> String {
    format!(
        "{}/{}/{}/{}-{}{}.{}",
        group_path(coordinates),
        coordinates.artifact_id,
        version,
        coordinates.artifact_id,
        snapshot_version(version, timestamp, build_number),
        coordinates.classifier.file_name_suffix(),
        coordinates.extension,
    )
}

/// `{group}/{artifact}/{version}/maven-metadata.xml`
pub fn version_metadata_path(coordinates: &MavenCoordinates, version: &str) -> String {
    format!("{}/{}/{}/{}", group_path(coordinates), coordinates.artifact_id, version, METADATA_FILE)
}

/// `{group}/{artifact}/{version}/maven-metadata-local.xml`
pub fn version_local_metadata_path(coordinates: &MavenCoordinates, version: &str) -> String {
    format!("{}/{}/{}/{}", group_path(coordinates), coordinates.artifact_id, version, METADATA_FILE_LOCAL)
}

/// `{group}/{artifact}/maven-metadata.xml` - the aggregate descriptor listing
///  all versions of the artifact.
pub fn artifact_metadata_path(coordinates: &MavenCoordinates) -> String {
    format!("{}/{}/{}", group_path(coordinates), coordinates.artifact_id, METADATA_FILE)
}

/// `{group}/{artifact}/maven-metadata-local.xml`
pub fn artifact_local_metadata_path(coordinates: &MavenCoordinates) -> String {
    format!("{}/{}/{}", group_path(coordinates), coordinates.artifact_id, METADATA_FILE_LOCAL)
}

/// Artifact path for a full `mvn:` URI. URIs with a different scheme pass
///  through unchanged.
pub fn path_from_maven(uri: &str) -> Result<String, MalformedCoordinate> {
    match uri.strip_prefix(MVN_SCHEME) {
        None => {
            debug!("not a {} reference, passing through unchanged: {}", MVN_SCHEME, uri);
            Ok(uri.to_string())
        }
        Some(reference) => {
            let coordinates = MavenCoordinates::parse(reference)?;
            Ok(artifact_path(&coordinates).0)
        }
    }
}

/// Like [`path_from_maven`], but reuses the version segment found in an
///  already-resolved path for the same group/artifact. This lets a caller
///  that resolved "LATEST" (or a version range) elsewhere rebuild the
///  canonical path with the concrete version.
pub fn path_from_maven_resolved(uri: &str, resolved: &str) -> Result<String, MalformedCoordinate> {
    let reference = match uri.strip_prefix(MVN_SCHEME) {
        None => return Ok(uri.to_string()),
        Some(reference) => reference,
    };
    let coordinates = MavenCoordinates::parse(reference)?;

    let group_artifact = format!("/{}/{}/", group_path(&coordinates), coordinates.artifact_id);
    if let Some(start) = resolved.find(&group_artifact) {
        let version_start = start + group_artifact.len();
        if let Some(version_len) = resolved[version_start..].find('/') {
            let version = &resolved[version_start..version_start + version_len];
            return Ok(artifact_path_for_version(&coordinates, version).0);
        }
    }
    Ok(artifact_path(&coordinates).0)
}

/// Artifact file name for a full `mvn:` URI; non-`mvn:` URIs pass through
///  unchanged.
pub fn file_name_from_maven(uri: &str, exclude_version: bool) -> Result<String, MalformedCoordinate> {
    match uri.strip_prefix(MVN_SCHEME) {
        None => Ok(uri.to_string()),
        Some(reference) => {
            let coordinates = MavenCoordinates::parse(reference)?;
            let version = coordinates.version.clone();
            Ok(artifact_file_name(&coordinates, &version, exclude_version).0)
        }
    }
}
