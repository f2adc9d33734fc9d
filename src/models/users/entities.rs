use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::utils::jwt::JwtUtils;

// 业务角色：由资料表推断，不存储在用户表中
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "user.ts")]
pub enum Role {
    Student,
    Teacher,
}

impl Role {
    pub const STUDENT: &'static str = "student";
    pub const TEACHER: &'static str = "teacher";
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "{}", Role::STUDENT),
            Role::Teacher => write!(f, "{}", Role::TEACHER),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Role::STUDENT => Ok(Role::Student),
            Role::TEACHER => Ok(Role::Teacher),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 新建用户（密码已哈希）
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// 注册时用户名由姓名拼接
    pub fn username_from_names(first_name: &str, last_name: &str) -> String {
        format!("{first_name}_{last_name}")
    }

    pub fn generate_access_token(&self) -> Result<String, jsonwebtoken::errors::Error> {
        JwtUtils::generate_access_token(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_str() {
        assert_eq!("teacher".parse::<Role>(), Ok(Role::Teacher));
        assert_eq!(Role::Student.to_string(), "student");
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_username_from_names() {
        assert_eq!(User::username_from_names("Ivan", "Petrov"), "Ivan_Petrov");
    }
}
