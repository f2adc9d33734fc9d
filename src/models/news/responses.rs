use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::comments::responses::CommentResponse;
use crate::models::news::entities::News;
use crate::models::users::responses::AuthorInfo;

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "news.ts")]
pub struct NewsWriteResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: i64,
}

impl From<&News> for NewsWriteResponse {
    fn from(news: &News) -> Self {
        Self {
            id: news.id,
            title: news.title.clone(),
            content: news.content.clone(),
            author: news.author_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "news.ts")]
pub struct NewsResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: AuthorInfo,
    pub date: chrono::DateTime<chrono::Utc>,
    /// 仅详情接口返回
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_set: Option<Vec<CommentResponse>>,
}
