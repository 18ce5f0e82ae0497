use chrono::{SecondsFormat, Utc};

/// Stamp written into `created_on`/`updated_on` when an issue is created:
/// three-letter weekday, three-letter month, unpadded day, four-digit year
/// (e.g. "Mon Jan 2 2006").
pub fn creation_stamp() -> String {
    Utc::now().format("%a %b %-d %Y").to_string()
}

/// Stamp written into `updated_on` when an issue is updated. Unlike the
/// creation stamp this is ISO-8601 with millisecond precision; the two
/// formats coexist on the same field and clients depend on both.
pub fn update_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    #[test]
    fn creation_stamp_is_human_readable_date() {
        let stamp = creation_stamp();
        let parts: Vec<&str> = stamp.split(' ').collect();
        assert_eq!(parts.len(), 4, "unexpected stamp: {stamp}");
        assert_eq!(parts[0].len(), 3);
        assert_eq!(parts[1].len(), 3);
        assert!(parts[2].parse::<u8>().is_ok());
        assert_eq!(parts[3].len(), 4);
    }

    #[test]
    fn update_stamp_is_iso_8601() {
        let stamp = update_stamp();
        assert!(stamp.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&stamp).is_ok());
    }
}
