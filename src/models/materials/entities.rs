use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学习资料：归属科目，并面向某个年级
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "material.ts")]
pub struct Material {
    pub id: i64,
    pub title: String,
    pub section: String,
    pub content: String,
    pub class_number: i32,
    pub video_url: Option<String>,
    pub subject_id: i64,
    pub author_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub title: String,
    pub section: String,
    pub content: String,
    pub class_number: i32,
    pub video_url: Option<String>,
    pub subject_id: i64,
    pub author_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct MaterialListQuery {
    pub subject_id: Option<i64>,
    pub class_number: Option<i32>,
}
