//! 端点授权策略表：(资源, 动作) -> (角色要求, 实例检查)

use crate::access::registry::ResourceKind;
use crate::models::users::entities::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Retrieve,
    Create,
    Update,
    Destroy,
}

impl Action {
    /// 所有权提示语中的动词
    pub fn verb(self) -> &'static str {
        match self {
            Action::Update => "edit",
            Action::Destroy => "delete",
            Action::List | Action::Retrieve | Action::Create => "view",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRequirement {
    /// 任意已认证用户
    Any,
    Only(Role),
}

impl RoleRequirement {
    pub fn admits(self, role: Option<Role>) -> bool {
        match self {
            RoleRequirement::Any => true,
            RoleRequirement::Only(required) => role == Some(required),
        }
    }
}

/// 拿到具体实例后的检查
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    None,
    /// 所有者、委托人或读者
    Author,
    /// 新记录必须落在主体的范围内
    Scope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub role: RoleRequirement,
    pub check: Check,
}

const fn rule(role: RoleRequirement, check: Check) -> Policy {
    Policy { role, check }
}

const ANY: RoleRequirement = RoleRequirement::Any;
const STUDENT: RoleRequirement = RoleRequirement::Only(Role::Student);
const TEACHER: RoleRequirement = RoleRequirement::Only(Role::Teacher);

pub fn policy(kind: ResourceKind, action: Action) -> Policy {
    use Action::*;
    use ResourceKind as K;

    match (kind, action) {
        (K::Homework | K::Exam, List | Retrieve) => rule(ANY, Check::None),
        (K::Homework | K::Exam, Create) => rule(TEACHER, Check::None),
        (K::Homework | K::Exam, Update | Destroy) => rule(TEACHER, Check::Author),

        (K::News | K::Comment, List | Retrieve | Create) => rule(STUDENT, Check::None),
        (K::News | K::Comment, Update | Destroy) => rule(STUDENT, Check::Author),

        (K::Material, List | Retrieve) => rule(ANY, Check::None),
        (K::Material, Create) => rule(TEACHER, Check::Scope),
        (K::Material, Update | Destroy) => rule(TEACHER, Check::Author),

        (K::Grade, List) => rule(ANY, Check::None),
        (K::Grade, Retrieve) => rule(ANY, Check::Author),
        (K::Grade, Create) => rule(TEACHER, Check::Scope),
        (K::Grade, Update | Destroy) => rule(TEACHER, Check::Author),

        (K::Submission, List) => rule(ANY, Check::None),
        (K::Submission, Retrieve | Update) => rule(ANY, Check::Author),
        (K::Submission, Create) => rule(STUDENT, Check::Scope),
        (K::Submission, Destroy) => rule(STUDENT, Check::Author),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_is_student_only() {
        for action in [
            Action::List,
            Action::Retrieve,
            Action::Create,
            Action::Update,
            Action::Destroy,
        ] {
            assert_eq!(policy(ResourceKind::News, action).role, STUDENT);
        }
    }

    #[test]
    fn test_mutations_check_author() {
        assert_eq!(
            policy(ResourceKind::Exam, Action::Destroy).check,
            Check::Author
        );
        assert_eq!(
            policy(ResourceKind::Comment, Action::Update).check,
            Check::Author
        );
        assert_eq!(
            policy(ResourceKind::Material, Action::Create).check,
            Check::Scope
        );
        assert_eq!(policy(ResourceKind::Homework, Action::List).role, ANY);
    }

    #[test]
    fn test_verbs() {
        assert_eq!(Action::Update.verb(), "edit");
        assert_eq!(Action::Destroy.verb(), "delete");
        assert_eq!(Action::Retrieve.verb(), "view");
    }

    #[test]
    fn test_role_requirement() {
        assert!(ANY.admits(None));
        assert!(TEACHER.admits(Some(Role::Teacher)));
        assert!(!TEACHER.admits(Some(Role::Student)));
        assert!(!STUDENT.admits(None));
    }
}
