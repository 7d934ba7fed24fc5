use serde::Deserialize;

use crate::errors::AppError;

/// Parameter handed to the monitor when it is loaded: the full job as raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct InitParam {
    #[serde(rename = "rawJson")]
    pub raw_json: Option<String>,
}

impl InitParam {
    pub fn new(raw_json: impl Into<String>) -> Self {
        Self {
            raw_json: Some(raw_json.into()),
        }
    }

    /// Parse the embedded job document.
    pub fn job(&self) -> Result<Job, AppError> {
        let raw = self
            .raw_json
            .as_deref()
            .ok_or_else(|| AppError::MalformedJob("init param has no rawJson".into()))?;
        serde_json::from_str(raw).map_err(|e| AppError::MalformedJob(e.to_string()))
    }
}

/// The subset of a platform job the monitor cares about.
///
/// In a monitor job the monitored model is `referenceModel`; `model` is the
/// monitor itself and is ignored here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "referenceModel", default)]
    pub reference_model: Option<ReferenceModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReferenceModel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_extracts_reference_model() {
        let param = InitParam::new(
            r#"{"id":"job-1","referenceModel":{"id":"7b4a2c3e-0f7d-4c8d-9d6a-2f1e3b4c5d6e","name":"credit"},"model":{"id":"other"}}"#,
        );
        let job = param.job().unwrap();
        let reference = job.reference_model.unwrap();
        assert_eq!(
            reference.id.as_deref(),
            Some("7b4a2c3e-0f7d-4c8d-9d6a-2f1e3b4c5d6e")
        );
        assert_eq!(reference.name.as_deref(), Some("credit"));
    }

    #[test]
    fn test_job_without_reference_model() {
        let job = InitParam::new(r#"{"id":"job-2"}"#).job().unwrap();
        assert!(job.reference_model.is_none());
    }

    #[test]
    fn test_invalid_json_is_malformed_job() {
        let err = InitParam::new("{not json").job().unwrap_err();
        assert!(matches!(err, AppError::MalformedJob(_)));
    }

    #[test]
    fn test_missing_raw_json_is_malformed_job() {
        let param: InitParam = serde_json::from_str("{}").unwrap();
        assert!(matches!(param.job(), Err(AppError::MalformedJob(_))));
    }
}
