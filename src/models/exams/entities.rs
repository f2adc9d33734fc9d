use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "exam.ts")]
pub struct Exam {
    pub id: i64,
    pub subject_id: i64,
    pub class_id: i64,
    pub author_id: i64,
    pub date: NaiveDate,
    pub topic: String,
    pub details: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewExam {
    pub subject_id: i64,
    pub class_id: i64,
    pub author_id: i64,
    pub date: NaiveDate,
    pub topic: String,
    pub details: String,
}

#[derive(Debug, Clone, Default)]
pub struct ExamListQuery {
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub not_before: Option<NaiveDate>,
}
