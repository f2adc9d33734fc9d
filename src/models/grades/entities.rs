use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct Grade {
    pub id: i64,
    pub subject_id: i64,
    // 学生资料 ID
    pub student_id: i64,
    pub author_id: i64,
    pub value: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 成绩取值范围
pub const MIN_GRADE: f64 = 2.0;
pub const MAX_GRADE: f64 = 6.0;

#[derive(Debug, Clone)]
pub struct NewGrade {
    pub subject_id: i64,
    pub student_id: i64,
    pub author_id: i64,
    pub value: f64,
}

/// 成绩列表查询条件，结果按 ID 倒序
#[derive(Debug, Clone, Default)]
pub struct GradeListQuery {
    pub subject_id: Option<i64>,
    pub student_id: Option<i64>,
}
