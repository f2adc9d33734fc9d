use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct CreateSubmissionRequest {
    pub content: Option<String>,
    pub solution_url: Option<String>,
}

/// 学生可改 content / solution_url，作业作者只能改 checked
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct UpdateSubmissionRequest {
    pub content: Option<String>,
    pub solution_url: Option<String>,
    pub checked: Option<bool>,
}
