use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::classes::entities::Class;
use crate::models::homeworks::entities::Homework;
use crate::models::subjects::entities::Subject;
use crate::models::users::responses::AuthorInfo;

// 写接口返回：关联对象只给 ID
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "homework.ts")]
pub struct HomeworkWriteResponse {
    pub id: i64,
    pub topic: String,
    pub subject: i64,
    pub clazz: i64,
    pub deadline: NaiveDate,
    pub details: String,
    pub author: i64,
}

impl From<&Homework> for HomeworkWriteResponse {
    fn from(homework: &Homework) -> Self {
        Self {
            id: homework.id,
            topic: homework.topic.clone(),
            subject: homework.subject_id,
            clazz: homework.class_id,
            deadline: homework.deadline,
            details: homework.details.clone(),
            author: homework.author_id,
        }
    }
}

// 读接口返回：关联对象完整嵌入
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "homework.ts")]
pub struct HomeworkResponse {
    pub id: i64,
    pub topic: String,
    pub subject: Subject,
    pub clazz: Class,
    pub deadline: NaiveDate,
    pub details: String,
    pub author: AuthorInfo,
}
