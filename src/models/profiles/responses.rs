use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{Student, Teacher};
use crate::models::classes::entities::Class;
use crate::models::subjects::entities::Subject;
use crate::models::users::entities::{Role, User};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "profile.ts")]
pub struct ProfileUser {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&User> for ProfileUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

/// 资料详情；学生带 clazz，教师带 subject
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "profile.ts")]
pub struct ProfileResponse {
    pub id: i64,
    pub role: Role,
    pub user: ProfileUser,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clazz: Option<Class>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,
    pub info: String,
    pub profile_image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_edit: Option<bool>,
}

impl From<&Student> for ProfileResponse {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            role: Role::Student,
            user: ProfileUser::from(&student.user),
            clazz: Some(student.clazz.clone()),
            subject: None,
            info: student.info.clone(),
            profile_image_url: student.profile_image_url.clone(),
            can_edit: None,
        }
    }
}

impl From<&Teacher> for ProfileResponse {
    fn from(teacher: &Teacher) -> Self {
        Self {
            id: teacher.id,
            role: Role::Teacher,
            user: ProfileUser::from(&teacher.user),
            clazz: None,
            subject: Some(teacher.subject.clone()),
            info: teacher.info.clone(),
            profile_image_url: teacher.profile_image_url.clone(),
            can_edit: None,
        }
    }
}

impl ProfileResponse {
    pub fn with_can_edit(mut self, can_edit: bool) -> Self {
        self.can_edit = Some(can_edit);
        self
    }
}
