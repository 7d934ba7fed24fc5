//! Notification records returned by the platform's notification service.
//!
//! Records are read leniently: every field is optional and the accessors
//! below supply the documented default when a field is absent or null.
//! `open` is the exception: an explicit null is kept apart from a missing field.

use serde::{Deserialize, Deserializer};

/// Type tag carried by model-approval workflow notifications.
pub const APPROVAL_NOTIFICATION_TYPE: &str = "MODEL_APPROVAL_NOTIFICATION";

/// Placeholder used for every missing string field.
pub const UNKNOWN: &str = "UNKNOWN";

/// HAL response of `findAllByDeployableModelId`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationsResponse {
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<Embedded>,
    #[serde(default)]
    pub page: Option<PageMetadata>,
}

impl NotificationsResponse {
    /// Embedded notifications, or `None` when the service returned none yet.
    pub fn notifications(&self) -> Option<&[Notification]> {
        self.embedded
            .as_ref()
            .and_then(|e| e.notifications.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Embedded {
    #[serde(default)]
    pub notifications: Option<Vec<Notification>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: Option<u64>,
    pub total_elements: Option<u64>,
    pub total_pages: Option<u64>,
    pub number: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub notification_type: Option<String>,
    /// Outer `None`: field absent. `Some(None)`: explicit null.
    #[serde(default, deserialize_with = "present")]
    pub open: Option<Option<bool>>,
    pub approval_type: Option<String>,
    /// Opaque timestamp, passed through untouched.
    pub created_date: Option<serde_json::Value>,
    pub approver: Option<String>,
    pub assignment: Option<Assignment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub issue_id: Option<String>,
    pub issue_link: Option<String>,
    pub current_status: Option<String>,
    pub jira_issue: Option<JiraIssue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraIssue {
    pub reporter: Option<Reporter>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reporter {
    pub display_name: Option<String>,
    pub email_address: Option<String>,
}

/// Wraps any present value (null included) in `Some`; absence is handled by `default`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl Notification {
    pub fn is_approval(&self) -> bool {
        self.notification_type.as_deref() == Some(APPROVAL_NOTIFICATION_TYPE)
    }

    /// Open flag as reported. Default when absent: `Some(true)`; an explicit
    /// null stays `None`.
    pub fn open_flag(&self) -> Option<bool> {
        self.open.unwrap_or(Some(true))
    }

    /// Counts as outstanding only when open is true or absent.
    pub fn is_open(&self) -> bool {
        self.open_flag() == Some(true)
    }

    /// Default: `"UNKNOWN"`.
    pub fn approval_type(&self) -> &str {
        self.approval_type.as_deref().unwrap_or(UNKNOWN)
    }

    /// Default: the string `"UNKNOWN"`.
    pub fn created(&self) -> serde_json::Value {
        self.created_date
            .clone()
            .filter(|v| !v.is_null())
            .unwrap_or_else(|| serde_json::Value::String(UNKNOWN.to_string()))
    }

    /// Default: `"UNKNOWN"`.
    pub fn issue_id(&self) -> &str {
        self.assignment
            .as_ref()
            .and_then(|a| a.issue_id.as_deref())
            .unwrap_or(UNKNOWN)
    }

    /// Default: `"UNKNOWN"`.
    pub fn issue_link(&self) -> &str {
        self.assignment
            .as_ref()
            .and_then(|a| a.issue_link.as_deref())
            .unwrap_or(UNKNOWN)
    }

    /// Default: `"UNKNOWN"`.
    pub fn current_status(&self) -> &str {
        self.assignment
            .as_ref()
            .and_then(|a| a.current_status.as_deref())
            .unwrap_or(UNKNOWN)
    }

    /// Issue reporter's display name, then the top-level approver, then `"UNKNOWN"`.
    pub fn reporter_name(&self) -> &str {
        self.reporter()
            .and_then(|r| r.display_name.as_deref())
            .or(self.approver.as_deref())
            .unwrap_or(UNKNOWN)
    }

    /// Default: `"UNKNOWN"`. There is no approver fallback for email.
    pub fn reporter_email(&self) -> &str {
        self.reporter()
            .and_then(|r| r.email_address.as_deref())
            .unwrap_or(UNKNOWN)
    }

    fn reporter(&self) -> Option<&Reporter> {
        self.assignment
            .as_ref()
            .and_then(|a| a.jira_issue.as_ref())
            .and_then(|j| j.reporter.as_ref())
    }
}
