use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "news.ts")]
pub struct News {
    pub id: i64,
    pub title: String,
    pub content: String,
    // 发布者学生资料 ID
    pub author_id: i64,
    /// 发布者所在班级，决定可见范围
    pub class_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNews {
    pub title: String,
    pub content: String,
    pub author_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct NewsListQuery {
    pub class_id: Option<i64>,
}
