use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "material.ts")]
pub struct CreateMaterialRequest {
    pub title: Option<String>,
    pub section: Option<String>,
    pub content: Option<String>,
    pub class_number: Option<i32>,
    pub video_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "material.ts")]
pub struct UpdateMaterialRequest {
    pub title: Option<String>,
    pub section: Option<String>,
    pub content: Option<String>,
    pub class_number: Option<i32>,
    pub video_url: Option<String>,
}
