use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::materials::entities::Material;
use crate::models::subjects::entities::Subject;
use crate::models::users::responses::AuthorInfo;

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "material.ts")]
pub struct MaterialWriteResponse {
    pub id: i64,
    pub title: String,
    pub section: String,
    pub content: String,
    pub class_number: i32,
    pub video_url: Option<String>,
    pub subject: i64,
    pub author: i64,
}

impl From<&Material> for MaterialWriteResponse {
    fn from(material: &Material) -> Self {
        Self {
            id: material.id,
            title: material.title.clone(),
            section: material.section.clone(),
            content: material.content.clone(),
            class_number: material.class_number,
            video_url: material.video_url.clone(),
            subject: material.subject_id,
            author: material.author_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "material.ts")]
pub struct MaterialResponse {
    pub id: i64,
    pub title: String,
    pub section: String,
    pub content: String,
    pub class_number: i32,
    pub video_url: Option<String>,
    pub subject: Subject,
    pub author: AuthorInfo,
}
