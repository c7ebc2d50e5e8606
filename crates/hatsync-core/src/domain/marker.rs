//! Failure marker file naming
//!
//! Marker files are empty; their name carries the information. Names are
//! built from the requested group keys and the local time, then sanitized:
//! `'`, `[`, `]` and `,` are removed, and space, `:` and `/` become `_`.
//!
//! ```text
//! ['local', 'backup'] + 18/10/2026, 12:00:00
//!   -> local_backup_sync_failed_at_18_10_2026_12_00_00
//! ```

use chrono::NaiveDateTime;

/// Local timestamp layout embedded in marker names (before sanitizing)
pub const MARKER_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

const STRIPPED_CHARS: [char; 4] = ['\'', '[', ']', ','];
const UNDERSCORED_CHARS: [char; 3] = [' ', ':', '/'];

/// Which failure a marker file records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Display reachable, at least one unit failed
    SyncFailed,
    /// Sync succeeded, display unreachable
    NotifierDead,
    /// Both failed
    SyncAndNotifierFailed,
}

/// Makes `raw` safe to embed in a file name
pub fn sanitize_marker_component(raw: &str) -> String {
    raw.chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .map(|c| if UNDERSCORED_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Renders group keys as a bracketed, quoted list: `['local', 'backup']`
pub fn render_group_keys<S: AsRef<str>>(keys: &[S]) -> String {
    let quoted: Vec<String> = keys.iter().map(|k| format!("'{}'", k.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

/// Builds the sanitized marker file name for `kind`
///
/// The notifier-dead marker does not carry the group keys.
pub fn marker_file_name<S: AsRef<str>>(
    kind: MarkerKind,
    group_keys: &[S],
    at: NaiveDateTime,
) -> String {
    let stamp = sanitize_marker_component(&at.format(MARKER_TIMESTAMP_FORMAT).to_string());
    let keys = sanitize_marker_component(&render_group_keys(group_keys));

    match kind {
        MarkerKind::SyncFailed => format!("{keys}_sync_failed_at_{stamp}"),
        MarkerKind::NotifierDead => format!("pi_dead_at_{stamp}"),
        MarkerKind::SyncAndNotifierFailed => format!("{keys}_sync_and_pi_failed_at_{stamp}"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_render_group_keys() {
        assert_eq!(render_group_keys(&["local", "backup"]), "['local', 'backup']");
        assert_eq!(render_group_keys(&["solo"]), "['solo']");
        assert_eq!(render_group_keys::<&str>(&[]), "[]");
    }

    #[test]
    fn test_sanitize_group_key_list() {
        assert_eq!(
            sanitize_marker_component("['local', 'backup']"),
            "local_backup"
        );
    }

    #[test]
    fn test_sanitize_timestamp() {
        assert_eq!(
            sanitize_marker_component("18/10/2026, 12:00:00"),
            "18_10_2026_12_00_00"
        );
    }

    #[test]
    fn test_sanitize_leaves_safe_chars() {
        assert_eq!(sanitize_marker_component("abc-DEF_1.2"), "abc-DEF_1.2");
    }

    #[test]
    fn test_marker_names() {
        let keys = ["local", "backup"];
        assert_eq!(
            marker_file_name(MarkerKind::SyncFailed, &keys, noon()),
            "local_backup_sync_failed_at_18_10_2026_12_00_00"
        );
        assert_eq!(
            marker_file_name(MarkerKind::NotifierDead, &keys, noon()),
            "pi_dead_at_18_10_2026_12_00_00"
        );
        assert_eq!(
            marker_file_name(MarkerKind::SyncAndNotifierFailed, &keys, noon()),
            "local_backup_sync_and_pi_failed_at_18_10_2026_12_00_00"
        );
    }

    #[test]
    fn test_marker_names_contain_no_separators() {
        let name = marker_file_name(MarkerKind::SyncFailed, &["a b", "c:d"], noon());
        assert!(!name.contains('/'));
        assert!(!name.contains(':'));
        assert!(!name.contains(','));
        assert!(!name.contains(' '));
    }
}
