use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

/// 创建作业请求；科目取自当前教师
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "homework.ts")]
pub struct CreateHomeworkRequest {
    pub topic: Option<String>,
    /// 班级 ID
    pub clazz: Option<i64>,
    pub deadline: Option<NaiveDate>, // YYYY-MM-DD
    pub details: Option<String>,
}

/// 更新作业请求（部分更新）
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "homework.ts")]
pub struct UpdateHomeworkRequest {
    pub topic: Option<String>,
    pub clazz: Option<i64>,
    pub deadline: Option<NaiveDate>,
    pub details: Option<String>,
}
