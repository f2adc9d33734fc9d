//! 请求主体解析
//!
//! 每个已认证请求解析一次：教师资料、学生资料，二者皆无则为未分配角色的用户。

use serde::{Deserialize, Serialize};

use crate::access::registry::ScopeEntity;
use crate::errors::Result;
use crate::models::profiles::entities::{Student, Teacher};
use crate::models::users::entities::{Role, User};
use crate::storage::Storage;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "profile", rename_all = "snake_case")]
pub enum Principal {
    Student(Student),
    Teacher(Teacher),
    Unassigned(User),
}

impl Principal {
    /// 解析用户的业务身份，同时存在两种资料时以教师为准
    pub async fn resolve(storage: &dyn Storage, user: User) -> Result<Self> {
        if let Some(teacher) = storage.get_teacher_by_user_id(user.id).await? {
            return Ok(Principal::Teacher(teacher));
        }
        if let Some(student) = storage.get_student_by_user_id(user.id).await? {
            return Ok(Principal::Student(student));
        }
        Ok(Principal::Unassigned(user))
    }

    pub fn user(&self) -> &User {
        match self {
            Principal::Student(student) => &student.user,
            Principal::Teacher(teacher) => &teacher.user,
            Principal::Unassigned(user) => user,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user().id
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Principal::Student(_) => Some(Role::Student),
            Principal::Teacher(_) => Some(Role::Teacher),
            Principal::Unassigned(_) => None,
        }
    }

    /// 学生或教师资料 ID
    pub fn profile_id(&self) -> Option<i64> {
        match self {
            Principal::Student(student) => Some(student.id),
            Principal::Teacher(teacher) => Some(teacher.id),
            Principal::Unassigned(_) => None,
        }
    }

    pub fn as_student(&self) -> Option<&Student> {
        match self {
            Principal::Student(student) => Some(student),
            _ => None,
        }
    }

    pub fn as_teacher(&self) -> Option<&Teacher> {
        match self {
            Principal::Teacher(teacher) => Some(teacher),
            _ => None,
        }
    }

    /// 主体在某一范围实体上的取值
    pub fn scope_value(&self, entity: ScopeEntity) -> Option<i64> {
        match (self, entity) {
            (Principal::Student(student), ScopeEntity::Class) => Some(student.clazz.id),
            (Principal::Student(student), ScopeEntity::ClassNumber) => {
                Some(i64::from(student.clazz.number))
            }
            (Principal::Teacher(teacher), ScopeEntity::Subject) => Some(teacher.subject.id),
            (_, ScopeEntity::Profile) => self.profile_id(),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::models::{classes::entities::Class, subjects::entities::Subject};

    pub fn user(id: i64) -> User {
        let now = chrono::Utc::now();
        User {
            id,
            username: format!("user_{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            first_name: "First".into(),
            last_name: "Last".into(),
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn student(profile_id: i64, class_id: i64, number: i32) -> Principal {
        Principal::Student(Student {
            id: profile_id,
            user: user(100 + profile_id),
            clazz: Class {
                id: class_id,
                number,
                letter: "A".into(),
            },
            info: String::new(),
            profile_image_url: String::new(),
        })
    }

    pub fn teacher(profile_id: i64, subject_id: i64) -> Principal {
        Principal::Teacher(Teacher {
            id: profile_id,
            user: user(200 + profile_id),
            subject: Subject {
                id: subject_id,
                title: "Math".into(),
            },
            info: String::new(),
            profile_image_url: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_scope_values_by_role() {
        let student = student(3, 11, 10);
        assert_eq!(student.role(), Some(Role::Student));
        assert_eq!(student.scope_value(ScopeEntity::Class), Some(11));
        assert_eq!(student.scope_value(ScopeEntity::ClassNumber), Some(10));
        assert_eq!(student.scope_value(ScopeEntity::Profile), Some(3));
        assert_eq!(student.scope_value(ScopeEntity::Subject), None);

        let teacher = teacher(5, 2);
        assert_eq!(teacher.scope_value(ScopeEntity::Subject), Some(2));
        assert_eq!(teacher.scope_value(ScopeEntity::Class), None);

        let unassigned = Principal::Unassigned(user(9));
        assert_eq!(unassigned.role(), None);
        assert_eq!(unassigned.profile_id(), None);
        assert_eq!(unassigned.user_id(), 9);
    }

    #[test]
    fn test_principal_survives_json_round_trip() {
        let principal = teacher(5, 2);
        let json = serde_json::to_string(&principal).unwrap();
        let back: Principal = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_teacher().map(|t| t.subject.id), Some(2));
    }
}
