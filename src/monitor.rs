//! Approval aggregation.
//!
//! [`MonitorContext::init`] captures the monitored model from the job once;
//! [`summarize`] then fetches that model's notifications and folds the
//! approval notifications into an [`ApprovalSummary`].

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{InitParam, ReferenceModel};
use crate::models::notification::NotificationsResponse;
use crate::models::summary::ApprovalSummary;
use crate::notification::NotificationsApi;

/// State established by initialization and read by every aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitorContext {
    reference_model: ReferenceModel,
}

impl MonitorContext {
    /// Parse the job and capture its `referenceModel` (empty when absent).
    pub fn init(param: &InitParam) -> Result<Self, AppError> {
        let job = param.job()?;
        let reference_model = job.reference_model.unwrap_or_default();
        tracing::info!(
            job_id = job.id.as_deref().unwrap_or("-"),
            model_id = reference_model.id.as_deref().unwrap_or("-"),
            "monitor initialized"
        );
        Ok(Self { reference_model })
    }

    pub fn from_reference_model(reference_model: ReferenceModel) -> Self {
        Self { reference_model }
    }

    pub fn model_id(&self) -> Result<Uuid, AppError> {
        let raw = self
            .reference_model
            .id
            .as_deref()
            .ok_or(AppError::MissingIdentifier)?;
        Uuid::parse_str(raw.trim()).map_err(|_| AppError::InvalidIdentifier(raw.to_string()))
    }
}

/// Fetch the reference model's notifications and summarize its approvals.
///
/// `rows` only signals that upstream input has arrived; its content is never read.
pub async fn summarize<A, T>(
    ctx: &MonitorContext,
    api: &A,
    rows: &[T],
) -> Result<ApprovalSummary, AppError>
where
    A: NotificationsApi + ?Sized,
{
    let model_id = ctx.model_id()?;
    tracing::debug!(model_id = %model_id, rows = rows.len(), "summarizing approvals");

    let response = api.find_all_by_deployable_model_id(model_id).await?;
    let summary = aggregate(&response);

    tracing::info!(
        model_id = %model_id,
        total = summary.total_approvals,
        outstanding = summary.outstanding_approvals,
        "approval summary ready"
    );
    Ok(summary)
}

/// Fold a notifications response into a summary. Non-approval notifications are skipped.
pub fn aggregate(response: &NotificationsResponse) -> ApprovalSummary {
    let mut summary = ApprovalSummary::default();

    let Some(notifications) = response.notifications() else {
        tracing::debug!("response has no embedded notifications");
        return summary;
    };

    if let Some(total) = response.page.as_ref().and_then(|p| p.total_elements) {
        if total > notifications.len() as u64 {
            tracing::warn!(
                returned = notifications.len(),
                total,
                "notification service returned a partial page, summarizing what was returned"
            );
        }
    }

    for notification in notifications.iter().filter(|n| n.is_approval()) {
        summary.record(notification);
    }
    summary
}
