/// Returns the owning scope of a storage path: everything before the first
/// `/`, or the whole path when it has none.
pub fn first_folder(path: &str) -> &str {
    path.split_once('/')
        .map(|(namespace, _)| namespace)
        .unwrap_or(path)
}

pub fn is_owned_by(path: &str, user_id: &str) -> bool {
    first_folder(path) == user_id
}

/// A storage key must be a plain list of names: no empty, `.` or `..`
/// segments that a url parser would collapse into another object.
pub fn has_plain_segments(path: &str) -> bool {
    path.split('/')
        .all(|segment| !matches!(segment, "" | "." | ".."))
}
