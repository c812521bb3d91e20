use tracing::trace;

use crate::coordinates::{Classifier, MavenCoordinates, MVN_SCHEME};

/// Outcome of mapping a repository path back to coordinates. The reverse
///  mapping is a heuristic over Maven2 layout conventions, not a true inverse
///  of the reference grammar (an artifact id containing a dash right before
///  the version is ambiguous), so unrecognized shapes are a regular outcome
///  carrying the original path, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMapping {
    Recognized(MavenCoordinates),
    Unrecognized(String),
}

impl PathMapping {
    pub fn coordinates(&self) -> Option<&MavenCoordinates> {
        match self {
            PathMapping::Recognized(coordinates) => Some(coordinates),
            PathMapping::Unrecognized(_) => None,
        }
    }

    /// The canonical `mvn:` reference for a recognized path, the original
    ///  path verbatim otherwise.
    pub fn into_reference(self) -> String {
        match self {
            PathMapping::Recognized(coordinates) => format!("{}{}", MVN_SCHEME, coordinates.to_reference()),
            PathMapping::Unrecognized(path) => path,
        }
    }
}

/// Infer coordinates from a repository-relative path, assuming the Maven2
///  layout `{group dirs}/{artifact}/{version}/{artifact}-{version}[-classifier].{type}`.
pub fn map_path(path: &str) -> PathMapping {
    match try_map_path(path) {
        Some(coordinates) => PathMapping::Recognized(coordinates),
        None => {
            trace!("not a recognized maven2 layout path: {}", path);
            PathMapping::Unrecognized(path.to_string())
        }
    }
}

fn try_map_path(path: &str) -> Option<MavenCoordinates> {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() < 4 {
        return None;
    }

    let artifact_id = segments[segments.len() - 3];
    let version = segments[segments.len() - 2];
    let file_name = segments[segments.len() - 1];

    let prefix = format!("{}-{}", artifact_id, version);
    if !file_name.starts_with(&prefix) || file_name.len() == prefix.len() {
        return None;
    }

    let last_dot = file_name.rfind('.')?;
    let extension = &file_name[last_dot + 1..];

    let classifier = if file_name.as_bytes()[prefix.len()] == b'-' {
        // the dash must be followed by `classifier.extension`
        if last_dot <= prefix.len() {
            return None;
        }
        Classifier::from_segment(&file_name[prefix.len() + 1..last_dot])
    }
    else {
        Classifier::Unclassified
    };

    let group_id = segments[..segments.len() - 3].join(".");

    Some(MavenCoordinates {
        repository_url: None,
        group_id,
        artifact_id: artifact_id.to_string(),
        version: version.to_string(),
        extension: extension.to_string(),
        classifier,
    })
}

/// String-to-string convenience: the canonical `mvn:` reference for a
///  recognized repository path, the input unchanged otherwise.
pub fn path_to_maven(location: &str) -> String {
    map_path(location).into_reference()
}
