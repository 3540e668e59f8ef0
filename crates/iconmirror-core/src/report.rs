//! End-of-run summary plus the optional update log and commit message.

use chrono::{DateTime, Utc};

use crate::catalog::NewIcon;

/// Number of new icon names listed in a commit message body.
const COMMIT_LIST_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// References found across all manifests.
    pub collected:          usize,
    /// References downloaded and stored successfully.
    pub processed:          usize,
    /// Distinct contents among `processed`.
    pub unique:             usize,
    pub duplicates_removed: usize,
    /// Entries in the written catalog, archived ones included.
    pub catalog_size:       usize,
    pub authors:            Vec<String>,
    pub newly_added:        Vec<NewIcon>,
    pub failed_sources:     Vec<String>,
    pub manifests_written:  usize,
    pub cancelled:          bool,
}

/// What started the run, as reported by `GITHUB_EVENT_NAME`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Scheduled,
    Manual,
    Auto,
}

impl Trigger {
    pub fn from_event(event: Option<&str>) -> Self {
        match event {
            Some("schedule") => Self::Scheduled,
            Some("workflow_dispatch") => Self::Manual,
            _ => Self::Auto,
        }
    }

    fn scope(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Manual => "Manual",
            Self::Auto => "Auto",
        }
    }
}

/// One `"<hash>": <name>` line per new icon, or `None` when nothing is new.
pub fn update_log(newly_added: &[NewIcon]) -> Option<String> {
    if newly_added.is_empty() {
        return None;
    }
    let lines: Vec<String> = newly_added
        .iter()
        .map(|icon| format!("\"{}\": {}", icon.hash, icon.name))
        .collect();
    Some(lines.join("\n"))
}

pub fn commit_message(newly_added: &[NewIcon], trigger: Trigger, now: DateTime<Utc>) -> String {
    let mut lines = Vec::new();

    if newly_added.is_empty() {
        lines.push(format!("chore({}): sync upstream icons", trigger.scope()));
        lines.push(String::new());
        lines.push("Routine update, no new icons detected.".to_string());
    } else {
        let count = newly_added.len();
        let noun = if count == 1 { "icon" } else { "icons" };
        lines.push(format!("feat: add {count} {noun}"));
        lines.push(String::new());
        lines.push(format!("Added {count} new {noun} to the catalog."));
        lines.push(String::new());
        lines.push(format!("New icons (first {COMMIT_LIST_LIMIT} shown):"));
        lines.extend(
            newly_added
                .iter()
                .take(COMMIT_LIST_LIMIT)
                .map(|icon| format!("  - {}", icon.name)),
        );
        if count > COMMIT_LIST_LIMIT {
            lines.push(format!("... and {} more.", count - COMMIT_LIST_LIMIT));
        }
    }

    lines.push(String::new());
    lines.push(format!("Updated at: {}", now.format("%Y-%m-%d %H:%M:%S UTC")));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn icon(i: usize) -> NewIcon {
        NewIcon {
            hash: format!("{i:02x}"),
            name: format!("icon{i}-alice"),
            url:  format!("icons/assets/{i:02x}.png"),
        }
    }

    fn at() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap() }

    #[test]
    fn trigger_from_event_name() {
        assert_eq!(Trigger::from_event(Some("schedule")), Trigger::Scheduled);
        assert_eq!(Trigger::from_event(Some("workflow_dispatch")), Trigger::Manual);
        assert_eq!(Trigger::from_event(Some("push")), Trigger::Auto);
        assert_eq!(Trigger::from_event(None), Trigger::Auto);
    }

    #[test]
    fn routine_commit_message() {
        let message = commit_message(&[], Trigger::Scheduled, at());
        assert_eq!(
            message,
            "chore(Scheduled): sync upstream icons\n\nRoutine update, no new icons detected.\n\nUpdated at: 2024-05-01 08:30:00 UTC"
        );
    }

    #[test]
    fn feature_commit_message_truncates_list() {
        let icons: Vec<NewIcon> = (0..12).map(icon).collect();
        let message = commit_message(&icons, Trigger::Auto, at());

        assert!(message.starts_with("feat: add 12 icons\n"));
        assert!(message.contains("  - icon9-alice"));
        assert!(!message.contains("  - icon10-alice"));
        assert!(message.contains("... and 2 more."));
    }

    #[test]
    fn single_icon_is_singular() {
        let message = commit_message(&[icon(1)], Trigger::Manual, at());
        assert!(message.starts_with("feat: add 1 icon\n"));
        assert!(!message.contains("more."));
    }

    #[test]
    fn update_log_lines() {
        assert_eq!(update_log(&[]), None);
        assert_eq!(
            update_log(&[icon(1), icon(2)]).unwrap(),
            "\"01\": icon1-alice\n\"02\": icon2-alice"
        );
    }
}
