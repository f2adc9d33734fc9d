use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::classes::entities::Class;
use crate::models::subjects::entities::Subject;
use crate::models::users::entities::User;

pub const DEFAULT_PROFILE_IMAGE_URL: &str = "https://elsyser.herokuapp.com/static/default.png";

// 学生资料（已关联用户与班级）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "profile.ts")]
pub struct Student {
    pub id: i64,
    pub user: User,
    pub clazz: Class,
    pub info: String,
    pub profile_image_url: String,
}

// 教师资料（已关联用户与科目）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "profile.ts")]
pub struct Teacher {
    pub id: i64,
    pub user: User,
    pub subject: Subject,
    pub info: String,
    pub profile_image_url: String,
}

/// 已校验的资料修改，同时作用于用户表与资料表
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub info: Option<String>,
    pub profile_image_url: Option<String>,
}
