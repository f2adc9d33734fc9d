use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "comment.ts")]
pub struct Comment {
    pub id: i64,
    pub news_id: i64,
    pub posted_by: i64,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub news_id: i64,
    pub posted_by: i64,
    pub content: String,
}
