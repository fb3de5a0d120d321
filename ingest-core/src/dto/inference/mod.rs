//! Inference DTOs

use serde::{Deserialize, Serialize};

use crate::domain::document::SourceId;
use crate::domain::inference::ModelId;

/// Request body for creating a batch inference job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitInference {
    pub group_name: String,
    pub project_identifier: String,
    pub output_layer_identifier: String,
    pub model_identifier: ModelId,
    pub source_ids: Vec<SourceId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_wire_format() {
        let body = SubmitInference {
            group_name: "luke".to_string(),
            project_identifier: "Test Project".to_string(),
            output_layer_identifier: "Gold Set".to_string(),
            model_identifier: 2,
            source_ids: vec![5, 8],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "groupName": "luke",
                "projectIdentifier": "Test Project",
                "outputLayerIdentifier": "Gold Set",
                "modelIdentifier": 2,
                "sourceIds": [5, 8]
            })
        );
    }
}
