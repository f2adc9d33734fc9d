//! 权限判定
//!
//! 依次检查：是否认证、角色要求、实例级检查（所有权或创建范围）。
//! 列表与单条读取的范围过滤由 [`scope_filter`] 单独给出。

use actix_web::HttpResponse;
use tracing::info;

use crate::access::policy::{Action, Check, policy};
use crate::access::principal::Principal;
use crate::access::registry::{Delegate, OwnedResource, Ownership, ResourceKind, ownership};
use crate::models::{ApiResponse, ErrorCode};

pub const UNAUTHENTICATED_MESSAGE: &str = "Authentication credentials were not provided.";
pub const FORBIDDEN_MESSAGE: &str = "You do not have permission to perform this action.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    Unauthenticated,
    WrongRole,
    OutOfScope,
    NotOwner { message: String },
}

impl DenyReason {
    pub fn message(&self) -> &str {
        match self {
            DenyReason::Unauthenticated => UNAUTHENTICATED_MESSAGE,
            DenyReason::WrongRole | DenyReason::OutOfScope => FORBIDDEN_MESSAGE,
            DenyReason::NotOwner { message } => message,
        }
    }

    pub fn into_response(self) -> HttpResponse {
        let message = self.message().to_string();
        match self {
            DenyReason::Unauthenticated => HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, message)),
            DenyReason::WrongRole | DenyReason::OutOfScope => HttpResponse::Forbidden()
                .json(ApiResponse::error_empty(ErrorCode::Forbidden, message)),
            // 所有权失败沿用 401
            DenyReason::NotOwner { .. } => HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::NotOwner, message)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

pub fn not_owner_message(action: Action, kind: ResourceKind) -> String {
    format!(
        "You can {} only your own {}.",
        action.verb(),
        ownership(kind).plural
    )
}

fn matches_delegate(
    delegate: Option<Delegate>,
    instance: &dyn OwnedResource,
    principal: &Principal,
) -> bool {
    delegate.is_some_and(|delegate| {
        principal.role() == Some(delegate.role)
            && principal.scope_value(delegate.entity).is_some()
            && instance.field(delegate.field) == principal.scope_value(delegate.entity)
    })
}

fn is_owner(row: &Ownership, instance: &dyn OwnedResource, principal: &Principal) -> bool {
    principal.role() == Some(row.owner_role)
        && principal.profile_id().is_some()
        && instance.field(row.owner_field) == principal.profile_id()
}

fn in_create_scope(row: &Ownership, instance: &dyn OwnedResource, principal: &Principal) -> bool {
    let Some(role) = principal.role() else {
        return false;
    };
    match row.create_scope_for(role) {
        Some(rule) => {
            let value = principal.scope_value(rule.entity);
            value.is_some() && instance.field(rule.field) == value
        }
        None => true,
    }
}

/// 判定主体能否对资源执行动作
///
/// 未给出实例时只检查认证与角色（路由中间件阶段）。
pub fn authorize(
    action: Action,
    kind: ResourceKind,
    instance: Option<&dyn OwnedResource>,
    principal: Option<&Principal>,
) -> Decision {
    let Some(principal) = principal else {
        return Decision::Deny(DenyReason::Unauthenticated);
    };

    let rule = policy(kind, action);
    if !rule.role.admits(principal.role()) {
        info!(
            "Denied {:?} on {:?} for user {}: role {:?} not allowed",
            action,
            kind,
            principal.user_id(),
            principal.role()
        );
        return Decision::Deny(DenyReason::WrongRole);
    }

    let Some(instance) = instance else {
        return Decision::Allow;
    };

    let row = ownership(kind);
    match rule.check {
        Check::None => Decision::Allow,
        Check::Author => {
            if is_owner(row, instance, principal)
                || matches_delegate(row.delegate, instance, principal)
                || (action == Action::Retrieve && matches_delegate(row.reader, instance, principal))
            {
                Decision::Allow
            } else {
                info!(
                    "Denied {:?} on {:?} for user {}: not the owner",
                    action,
                    kind,
                    principal.user_id()
                );
                Decision::Deny(DenyReason::NotOwner {
                    message: not_owner_message(action, kind),
                })
            }
        }
        Check::Scope => {
            if in_create_scope(row, instance, principal) {
                Decision::Allow
            } else {
                info!(
                    "Denied {:?} on {:?} for user {}: outside of scope",
                    action,
                    kind,
                    principal.user_id()
                );
                Decision::Deny(DenyReason::OutOfScope)
            }
        }
    }
}

/// 查询范围过滤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeFilter {
    Unrestricted,
    /// 无任何可见记录
    Nothing,
    Field { field: &'static str, value: i64 },
}

impl ScopeFilter {
    pub fn admits(&self, instance: &dyn OwnedResource) -> bool {
        match self {
            ScopeFilter::Unrestricted => true,
            ScopeFilter::Nothing => false,
            ScopeFilter::Field { field, value } => instance.field(field) == Some(*value),
        }
    }

    /// 过滤字段取值，None 表示该字段不受限
    pub fn value_for(&self, field: &str) -> Option<i64> {
        match self {
            ScopeFilter::Field { field: f, value } if *f == field => Some(*value),
            _ => None,
        }
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, ScopeFilter::Nothing)
    }
}

pub fn scope_filter(kind: ResourceKind, principal: &Principal) -> ScopeFilter {
    let Some(role) = principal.role() else {
        return ScopeFilter::Nothing;
    };

    match ownership(kind).scope_for(role) {
        Some(rule) => match principal.scope_value(rule.entity) {
            Some(value) => ScopeFilter::Field {
                field: rule.field,
                value,
            },
            None => ScopeFilter::Nothing,
        },
        None => ScopeFilter::Unrestricted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::principal::fixtures::{student, teacher, user};
    use crate::access::registry::{FieldSet, SubmissionView};
    use crate::models::homeworks::entities::Homework;
    use crate::models::submissions::entities::Submission;

    fn homework(author_id: i64, subject_id: i64, class_id: i64) -> Homework {
        let now = chrono::Utc::now();
        Homework {
            id: 1,
            topic: "Fractions".into(),
            subject_id,
            class_id,
            author_id,
            deadline: now.date_naive(),
            details: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_anonymous_is_unauthenticated() {
        assert_eq!(
            authorize(Action::List, ResourceKind::Homework, None, None),
            Decision::Deny(DenyReason::Unauthenticated)
        );
    }

    #[test]
    fn test_wrong_role_before_ownership() {
        let hw = homework(1, 1, 1);
        let decision = authorize(
            Action::Update,
            ResourceKind::Homework,
            Some(&hw),
            Some(&student(1, 1, 10)),
        );
        assert_eq!(decision, Decision::Deny(DenyReason::WrongRole));
    }

    #[test]
    fn test_teacher_cannot_edit_foreign_homework() {
        let hw = homework(1, 1, 1);
        let decision = authorize(
            Action::Update,
            ResourceKind::Homework,
            Some(&hw),
            Some(&teacher(2, 7)),
        );
        assert_eq!(
            decision,
            Decision::Deny(DenyReason::NotOwner {
                message: "You can edit only your own homeworks.".into()
            })
        );
        assert!(
            authorize(
                Action::Destroy,
                ResourceKind::Homework,
                Some(&hw),
                Some(&teacher(1, 1))
            )
            .is_allowed()
        );
    }

    #[test]
    fn test_not_owner_response_is_401() {
        let reason = DenyReason::NotOwner {
            message: not_owner_message(Action::Destroy, ResourceKind::Comment),
        };
        assert_eq!(reason.message(), "You can delete only your own comments.");
        assert_eq!(
            reason.into_response().status(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            DenyReason::WrongRole.into_response().status(),
            actix_web::http::StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_unassigned_passes_any_but_sees_nothing() {
        let principal = Principal::Unassigned(user(4));
        assert!(authorize(Action::List, ResourceKind::Exam, None, Some(&principal)).is_allowed());
        assert_eq!(
            authorize(Action::Create, ResourceKind::Exam, None, Some(&principal)),
            Decision::Deny(DenyReason::WrongRole)
        );
        assert!(scope_filter(ResourceKind::Exam, &principal).is_nothing());
    }

    #[test]
    fn test_scope_filters() {
        assert_eq!(
            scope_filter(ResourceKind::Homework, &student(1, 11, 10)),
            ScopeFilter::Field {
                field: "clazz",
                value: 11
            }
        );
        assert_eq!(
            scope_filter(ResourceKind::Material, &student(1, 11, 10)),
            ScopeFilter::Field {
                field: "class_number",
                value: 10
            }
        );
        assert_eq!(
            scope_filter(ResourceKind::Exam, &teacher(2, 5)).value_for("subject"),
            Some(5)
        );
        assert_eq!(
            scope_filter(ResourceKind::Comment, &student(1, 11, 10)),
            ScopeFilter::Unrestricted
        );

        let hw = homework(2, 5, 11);
        assert!(scope_filter(ResourceKind::Homework, &student(1, 11, 10)).admits(&hw));
        assert!(!scope_filter(ResourceKind::Homework, &student(1, 12, 10)).admits(&hw));
    }

    #[test]
    fn test_material_create_requires_own_subject() {
        let draft = FieldSet::default().with("subject", 3);
        assert!(
            authorize(
                Action::Create,
                ResourceKind::Material,
                Some(&draft),
                Some(&teacher(1, 3))
            )
            .is_allowed()
        );
        assert_eq!(
            authorize(
                Action::Create,
                ResourceKind::Material,
                Some(&draft),
                Some(&teacher(1, 4))
            ),
            Decision::Deny(DenyReason::OutOfScope)
        );
    }

    #[test]
    fn test_grade_delegate_and_reader() {
        let grade = FieldSet::default()
            .with("author", 1)
            .with("subject", 3)
            .with("student", 9);

        // 同科目其他教师
        assert!(
            authorize(
                Action::Update,
                ResourceKind::Grade,
                Some(&grade),
                Some(&teacher(2, 3))
            )
            .is_allowed()
        );
        // 被评分学生只能查看
        assert!(
            authorize(
                Action::Retrieve,
                ResourceKind::Grade,
                Some(&grade),
                Some(&student(9, 1, 10))
            )
            .is_allowed()
        );
        assert_eq!(
            authorize(
                Action::Retrieve,
                ResourceKind::Grade,
                Some(&grade),
                Some(&student(8, 1, 10))
            ),
            Decision::Deny(DenyReason::NotOwner {
                message: "You can view only your own grades.".into()
            })
        );
    }

    #[test]
    fn test_submission_checked_by_homework_author() {
        let hw = homework(4, 3, 11);
        let submission = Submission {
            id: 1,
            homework_id: hw.id,
            student_id: 9,
            content: "answer".into(),
            solution_url: None,
            checked: false,
            submitted_at: chrono::Utc::now(),
        };
        let view = SubmissionView {
            homework: &hw,
            submission: &submission,
        };

        assert!(
            authorize(
                Action::Update,
                ResourceKind::Submission,
                Some(&view),
                Some(&teacher(4, 3))
            )
            .is_allowed()
        );
        assert!(
            authorize(
                Action::Update,
                ResourceKind::Submission,
                Some(&view),
                Some(&student(9, 11, 10))
            )
            .is_allowed()
        );
        assert_eq!(
            authorize(
                Action::Update,
                ResourceKind::Submission,
                Some(&view),
                Some(&teacher(5, 3))
            ),
            Decision::Deny(DenyReason::NotOwner {
                message: "You can edit only your own submissions.".into()
            })
        );
    }
}
