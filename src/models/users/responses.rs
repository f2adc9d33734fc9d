use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::profiles::entities::{Student, Teacher};

// 读取接口中嵌入的作者信息（学生或教师）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "user.ts")]
pub struct AuthorInfo {
    /// 资料 ID
    pub id: i64,
    /// 用户名
    pub user: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_image_url: String,
}

impl From<&Teacher> for AuthorInfo {
    fn from(teacher: &Teacher) -> Self {
        Self {
            id: teacher.id,
            user: teacher.user.username.clone(),
            first_name: teacher.user.first_name.clone(),
            last_name: teacher.user.last_name.clone(),
            profile_image_url: teacher.profile_image_url.clone(),
        }
    }
}

impl From<&Student> for AuthorInfo {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            user: student.user.username.clone(),
            first_name: student.user.first_name.clone(),
            last_name: student.user.last_name.clone(),
            profile_image_url: student.profile_image_url.clone(),
        }
    }
}
