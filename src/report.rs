//! Report output
//!
//! The walker hands every reportable grant to a [`ReportSink`] and never
//! waits on the result; sinks are fire-and-forget. Records arrive in no
//! particular order.

use crate::audit::record::GrantRecord;

/// Sink for reportable grant records
pub trait ReportSink: Send + Sync {
    /// Receive one reportable record
    fn report(&self, record: &GrantRecord);
}

/// Renders records as fixed-width columns on stdout
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn report(&self, record: &GrantRecord) {
        println!("{}", render(record));
    }
}

/// Render one record as a fixed-width report line
fn render(record: &GrantRecord) -> String {
    let expires = record
        .expires_at
        .map(|date| date.to_string())
        .unwrap_or_default();

    format!(
        "{:<10} {:<50} {:<30} {:<20} {:<15} {}",
        record.kind.as_str(),
        record.path,
        record.username,
        record.access_level.as_str(),
        expires,
        record.members_url,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::record::ContainerKind;
    use crate::gitlab::types::AccessLevel;
    use chrono::NaiveDate;

    fn sample_record() -> GrantRecord {
        GrantRecord {
            kind: ContainerKind::Project,
            container_id: 99,
            path: "my-org/platform/api".into(),
            username: "alice".into(),
            user_id: 42,
            access_level: AccessLevel::Maintainer,
            expires_at: None,
            members_url:
                "https://gitlab.example.com/my-org/platform/api/-/project_members?search=alice"
                    .into(),
        }
    }

    #[test]
    fn renders_columns_in_order() {
        let line = render(&sample_record());
        let fields: Vec<&str> = line.split_whitespace().collect();

        assert_eq!(
            fields,
            vec![
                "project",
                "my-org/platform/api",
                "alice",
                "maintainer",
                "https://gitlab.example.com/my-org/platform/api/-/project_members?search=alice",
            ]
        );
    }

    #[test]
    fn renders_expiry_when_present() {
        let mut record = sample_record();
        record.expires_at = NaiveDate::from_ymd_opt(2026, 12, 31);

        let line = render(&record);
        assert!(line.contains("2026-12-31"));
    }

    #[test]
    fn pads_columns_to_fixed_width() {
        let line = render(&sample_record());
        assert_eq!(&line[..11], "project    ");
    }
}
