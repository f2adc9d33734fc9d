use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::grades::entities::Grade;
use crate::models::subjects::entities::Subject;
use crate::models::users::responses::AuthorInfo;

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeWriteResponse {
    pub id: i64,
    pub value: f64,
    pub subject: i64,
    pub student: i64,
    pub author: i64,
}

impl From<&Grade> for GradeWriteResponse {
    fn from(grade: &Grade) -> Self {
        Self {
            id: grade.id,
            value: grade.value,
            subject: grade.subject_id,
            student: grade.student_id,
            author: grade.author_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeResponse {
    pub id: i64,
    pub value: f64,
    pub subject: Subject,
    pub student: AuthorInfo,
    pub author: AuthorInfo,
}
