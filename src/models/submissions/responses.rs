use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::submissions::entities::Submission;
use crate::models::users::responses::AuthorInfo;

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmissionWriteResponse {
    pub id: i64,
    pub homework: i64,
    pub student: i64,
    pub content: String,
    pub solution_url: Option<String>,
    pub checked: bool,
}

impl From<&Submission> for SubmissionWriteResponse {
    fn from(submission: &Submission) -> Self {
        Self {
            id: submission.id,
            homework: submission.homework_id,
            student: submission.student_id,
            content: submission.content.clone(),
            solution_url: submission.solution_url.clone(),
            checked: submission.checked,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmissionResponse {
    pub id: i64,
    pub homework: i64,
    pub student: AuthorInfo,
    pub content: String,
    pub solution_url: Option<String>,
    pub checked: bool,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
