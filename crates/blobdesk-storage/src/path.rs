//! Key and folder helpers.

/// Separator emulating folders in the flat key space.
pub(crate) const SEPARATOR: char = '/';

/// Layout used for every timestamp in object records.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Normalizes a folder so it ends with the separator.
///
/// The empty folder stays empty and denotes the bucket root.
pub(crate) fn normalize_folder(folder: &str) -> String {
    if folder.is_empty() || folder.ends_with(SEPARATOR) {
        folder.to_owned()
    } else {
        format!("{folder}{SEPARATOR}")
    }
}

/// Normalizes a folder prefix for deletion.
///
/// Unlike [`normalize_folder`], the empty prefix becomes the separator, so it
/// never stands for the bucket root.
pub(crate) fn normalize_prefix(prefix: &str) -> String {
    match normalize_folder(prefix) {
        folder if folder.is_empty() => SEPARATOR.to_string(),
        folder => folder,
    }
}

/// Returns whether a prefix consists of separators only.
pub(crate) fn is_root_prefix(prefix: &str) -> bool {
    prefix.chars().all(|c| c == SEPARATOR)
}

/// Returns the path handed to the lister for a normalized folder.
pub(crate) fn lister_path(folder: &str) -> &str {
    if folder.is_empty() { "/" } else { folder }
}

/// Returns whether a listed entry is the queried folder itself.
pub(crate) fn is_listed_folder(entry_path: &str, folder: &str) -> bool {
    entry_path == folder || (folder.is_empty() && entry_path == "/")
}

/// Returns the last segment of a key, empty for keys ending in a separator.
pub(crate) fn leaf_name(key: &str) -> &str {
    key.rsplit_once(SEPARATOR).map_or(key, |(_, leaf)| leaf)
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS` in UTC.
pub(crate) fn format_timestamp(timestamp: jiff::Timestamp) -> String {
    timestamp.strftime(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_appends_separator_once() {
        assert_eq!(normalize_folder("reports"), "reports/");
        assert_eq!(normalize_folder("reports/"), "reports/");
        assert_eq!(normalize_folder("a/b"), "a/b/");
        assert_eq!(normalize_folder(""), "");
    }

    #[test]
    fn deletion_prefix_never_stays_empty() {
        assert_eq!(normalize_prefix(""), "/");
        assert_eq!(normalize_prefix("/"), "/");
        assert_eq!(normalize_prefix("reports"), "reports/");
        assert!(is_root_prefix("/"));
        assert!(is_root_prefix("//"));
        assert!(!is_root_prefix("reports/"));
    }

    #[test]
    fn leaf_name_takes_last_segment() {
        assert_eq!(leaf_name("a/b/report.pdf"), "report.pdf");
        assert_eq!(leaf_name("report.pdf"), "report.pdf");
        assert_eq!(leaf_name("a/b/"), "");
    }

    #[test]
    fn root_listing_excludes_root_entry() {
        assert!(is_listed_folder("/", ""));
        assert!(is_listed_folder("a/", "a/"));
        assert!(!is_listed_folder("a/b/", "a/"));
        assert_eq!(lister_path(""), "/");
        assert_eq!(lister_path("a/"), "a/");
    }

    #[test]
    fn timestamps_use_fixed_layout() {
        let ts = jiff::Timestamp::from_second(1_717_243_200).unwrap();
        assert_eq!(format_timestamp(ts), "2024-06-01 12:00:00");
    }
}
