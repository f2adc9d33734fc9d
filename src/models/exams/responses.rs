use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::classes::entities::Class;
use crate::models::exams::entities::Exam;
use crate::models::subjects::entities::Subject;
use crate::models::users::responses::AuthorInfo;

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "exam.ts")]
pub struct ExamWriteResponse {
    pub id: i64,
    pub subject: i64,
    pub clazz: i64,
    pub date: NaiveDate,
    pub topic: String,
    pub details: String,
    pub author: i64,
}

impl From<&Exam> for ExamWriteResponse {
    fn from(exam: &Exam) -> Self {
        Self {
            id: exam.id,
            subject: exam.subject_id,
            clazz: exam.class_id,
            date: exam.date,
            topic: exam.topic.clone(),
            details: exam.details.clone(),
            author: exam.author_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "exam.ts")]
pub struct ExamResponse {
    pub id: i64,
    pub subject: Subject,
    pub clazz: Class,
    pub date: NaiveDate,
    pub topic: String,
    pub details: String,
    pub author: AuthorInfo,
}
