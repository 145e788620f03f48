//! Call-graph path decomposition.

/// Token joining frames in a raw call-graph path, root first.
pub const PATH_SEPARATOR: &str = "->";

/// Split a raw path into its frames, root first.
///
/// Splits strictly on [`PATH_SEPARATOR`] and drops empty segments, so a
/// leading, trailing or doubled separator never yields a blank frame.
/// Whitespace inside a frame is kept as-is.
pub fn path_frames(raw: &str) -> Vec<String> {
    raw.split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
