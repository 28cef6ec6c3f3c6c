use chrono::{DateTime, Utc};

#[must_use]
pub fn format_member_since(value: DateTime<Utc>) -> String {
    value.format("%B %-d, %Y").to_string()
}
