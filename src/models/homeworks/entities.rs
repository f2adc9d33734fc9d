use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "homework.ts")]
pub struct Homework {
    pub id: i64,
    pub topic: String,
    pub subject_id: i64,
    pub class_id: i64,
    // 布置作业的教师资料 ID
    pub author_id: i64,
    pub deadline: NaiveDate,
    pub details: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 新建作业（作者与科目由服务层注入）
#[derive(Debug, Clone)]
pub struct NewHomework {
    pub topic: String,
    pub subject_id: i64,
    pub class_id: i64,
    pub author_id: i64,
    pub deadline: NaiveDate,
    pub details: String,
}

/// 作业列表查询条件
#[derive(Debug, Clone, Default)]
pub struct HomeworkListQuery {
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
    /// 只返回截止日期不早于该日期的作业
    pub not_before: Option<NaiveDate>,
}
