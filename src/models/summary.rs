use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::notification::Notification;

const TOTAL_KEY: &str = "totalApprovals";
const OUTSTANDING_KEY: &str = "outstandingApprovals";
const APPROVALS_KEY: &str = "approvals";

/// One summary per invocation of the monitor.
///
/// Serializes as a flat object: the two counters, one key per approval type
/// holding that type's latest status, then the `approvals` detail list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApprovalSummary {
    pub total_approvals: u64,
    pub outstanding_approvals: u64,
    /// Approval type -> status of the last notification of that type,
    /// ordered by first appearance.
    pub statuses: IndexMap<String, String>,
    pub approvals: Vec<ApprovalDetail>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalDetail {
    pub created: serde_json::Value,
    /// Null when the service sent an explicit null.
    pub open: Option<bool>,
    pub issue: String,
    pub issue_link: String,
    pub status: String,
    pub reporter: String,
    pub email: String,
}

impl From<&Notification> for ApprovalDetail {
    fn from(n: &Notification) -> Self {
        Self {
            created: n.created(),
            open: n.open_flag(),
            issue: n.issue_id().to_string(),
            issue_link: n.issue_link().to_string(),
            status: n.current_status().to_string(),
            reporter: n.reporter_name().to_string(),
            email: n.reporter_email().to_string(),
        }
    }
}

impl ApprovalSummary {
    /// Fold one approval notification into the summary.
    pub fn record(&mut self, notification: &Notification) {
        self.total_approvals += 1;
        if notification.is_open() {
            self.outstanding_approvals += 1;
        }
        self.statuses.insert(
            notification.approval_type().to_string(),
            notification.current_status().to_string(),
        );
        self.approvals.push(ApprovalDetail::from(notification));
    }

    pub fn status_of(&self, approval_type: &str) -> Option<&str> {
        self.statuses.get(approval_type).map(String::as_str)
    }
}

fn is_reserved(key: &str) -> bool {
    matches!(key, TOTAL_KEY | OUTSTANDING_KEY | APPROVALS_KEY)
}

impl Serialize for ApprovalSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(TOTAL_KEY, &self.total_approvals)?;
        map.serialize_entry(OUTSTANDING_KEY, &self.outstanding_approvals)?;
        for (approval_type, status) in &self.statuses {
            if is_reserved(approval_type) {
                tracing::warn!(
                    approval_type = %approval_type,
                    "approval type collides with a summary field, omitting its status key"
                );
                continue;
            }
            map.serialize_entry(approval_type, status)?;
        }
        map.serialize_entry(APPROVALS_KEY, &self.approvals)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn notification(v: serde_json::Value) -> Notification {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_empty_summary_serializes_without_type_keys() {
        let json = serde_json::to_value(ApprovalSummary::default()).unwrap();
        assert_eq!(
            json,
            json!({"totalApprovals": 0, "outstandingApprovals": 0, "approvals": []})
        );
    }

    #[test]
    fn test_record_keeps_invariants() {
        let mut summary = ApprovalSummary::default();
        summary.record(&notification(json!({"open": false, "approvalType": "LEGAL"})));
        summary.record(&notification(json!({"approvalType": "RISK"})));

        assert_eq!(summary.total_approvals, 2);
        assert_eq!(summary.outstanding_approvals, 1);
        assert_eq!(summary.approvals.len() as u64, summary.total_approvals);
        assert_eq!(summary.status_of("LEGAL"), Some("UNKNOWN"));
    }

    #[test]
    fn test_reserved_type_key_is_not_emitted() {
        let mut summary = ApprovalSummary::default();
        summary.record(&notification(json!({
            "approvalType": "totalApprovals",
            "assignment": {"currentStatus": "DONE"}
        })));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalApprovals"], 1);
        assert_eq!(json["approvals"][0]["status"], "DONE");
    }

    #[test]
    fn test_type_keys_keep_first_appearance_order() {
        let mut summary = ApprovalSummary::default();
        summary.record(&notification(json!({"approvalType": "ZETA", "assignment": {"currentStatus": "OPEN"}})));
        summary.record(&notification(json!({"approvalType": "ALPHA", "open": false})));
        summary.record(&notification(json!({"approvalType": "ZETA", "assignment": {"currentStatus": "DONE"}})));

        let keys: Vec<&str> = summary.statuses.keys().map(String::as_str).collect();
        assert_eq!(keys, ["ZETA", "ALPHA"]);
        assert_eq!(summary.status_of("ZETA"), Some("DONE"));

        let out = serde_json::to_string(&summary).unwrap();
        let zeta = out.find("\"ZETA\"").unwrap();
        let alpha = out.find("\"ALPHA\"").unwrap();
        assert!(zeta < alpha, "type keys out of input order: {}", out);
    }

    #[test]
    fn test_null_open_passes_through_to_detail() {
        let mut summary = ApprovalSummary::default();
        summary.record(&notification(json!({"open": null, "approvalType": "LEGAL"})));

        assert_eq!(summary.total_approvals, 1);
        assert_eq!(summary.outstanding_approvals, 0);
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["approvals"][0]["open"].is_null());
    }

    #[test]
    fn test_detail_uses_camel_case_keys() {
        let detail = ApprovalDetail::from(&notification(json!({
            "assignment": {"issueLink": "https://jira.example.com/browse/GOV-1"}
        })));
        let json = serde_json::to_value(detail).unwrap();
        assert_eq!(json["issueLink"], "https://jira.example.com/browse/GOV-1");
        assert_eq!(json["open"], true);
    }
}
