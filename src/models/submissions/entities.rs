use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct Submission {
    pub id: i64,
    pub homework_id: i64,
    pub student_id: i64,
    pub content: String,
    pub solution_url: Option<String>,
    // 教师批改标记
    pub checked: bool,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub homework_id: i64,
    pub student_id: i64,
    pub content: String,
    pub solution_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionListQuery {
    pub homework_id: Option<i64>,
    pub student_id: Option<i64>,
}

/// 已校验的提交修改
#[derive(Debug, Clone, Default)]
pub struct SubmissionChanges {
    pub content: Option<String>,
    pub solution_url: Option<String>,
    pub checked: Option<bool>,
}
