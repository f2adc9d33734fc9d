use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::comments::entities::Comment;
use crate::models::users::responses::AuthorInfo;

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "comment.ts")]
pub struct CommentWriteResponse {
    pub id: i64,
    pub news: i64,
    pub posted_by: i64,
    pub content: String,
}

impl From<&Comment> for CommentWriteResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            news: comment.news_id,
            posted_by: comment.posted_by,
            content: comment.content.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "comment.ts")]
pub struct CommentResponse {
    pub id: i64,
    pub news: i64,
    pub posted_by: AuthorInfo,
    pub content: String,
    pub posted_on: chrono::DateTime<chrono::Utc>,
}
