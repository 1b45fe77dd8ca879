use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AnalysisResult, AnalysisState};

/// Body returned with `202 Accepted` after an upload is admitted.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeAccepted {
    pub success: bool,
    pub data: AcceptedData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AcceptedData {
    pub analysis_id: Uuid,
    #[serde(flatten)]
    pub state: AnalysisState,
}

impl AnalyzeAccepted {
    pub fn new(analysis_id: Uuid) -> Self {
        Self {
            success: true,
            data: AcceptedData {
                analysis_id,
                state: AnalysisState::Pending,
            },
        }
    }
}

/// Body returned by the status endpoint; `result` is present only once the
/// run is complete.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisStatusResponse {
    pub success: bool,
    pub data: AnalysisStatusData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisStatusData {
    pub analysis_id: Uuid,
    #[serde(flatten)]
    pub state: AnalysisState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
}

impl AnalysisStatusResponse {
    pub fn new(analysis_id: Uuid, state: AnalysisState, result: Option<AnalysisResult>) -> Self {
        Self {
            success: true,
            data: AnalysisStatusData {
                analysis_id,
                state,
                result,
            },
        }
    }
}
