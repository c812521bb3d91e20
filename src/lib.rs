//! Translation between symbolic `mvn:` artifact references and Maven2
//!  repository-layout paths.
//!
//! The forward direction parses a reference of the form
//!  `mvn:[repository_url!]groupId/artifactId[/[version]/[type]/[classifier]]`
//!  into [`MavenCoordinates`] and derives artifact, snapshot and metadata
//!  descriptor paths from it. The reverse direction ([`reverse::map_path`])
//!  infers coordinates from a concrete repository path, best-effort.
//!
//! Everything operates on in-memory strings - no I/O, no network. Fetching
//!  the bytes a path points at is the caller's business.

pub mod coordinates;
pub mod paths;
pub mod reverse;

pub use coordinates::{Classifier, MalformedCoordinate, MavenCoordinates, MVN_SCHEME, SYNTAX, TYPE_JAR, VERSION_LATEST};
pub use paths::{
    artifact_file_name, artifact_local_metadata_path, artifact_metadata_path, artifact_path,
    artifact_path_for_version, file_name_from_maven, path_from_maven, path_from_maven_resolved,
    snapshot_path, snapshot_version, version_local_metadata_path, version_metadata_path,
    TimestampedVersion, METADATA_FILE, METADATA_FILE_LOCAL,
};
pub use reverse::{map_path, path_to_maven, PathMapping};
