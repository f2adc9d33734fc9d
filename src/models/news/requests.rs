use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "news.ts")]
pub struct CreateNewsRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "news.ts")]
pub struct UpdateNewsRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}
