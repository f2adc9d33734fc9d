use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "comment.ts")]
pub struct CommentRequest {
    pub content: Option<String>,
}
