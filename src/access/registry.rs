//! 资源归属登记表
//!
//! 每类资源一行：所有者角色与字段、各角色的可见范围、创建时的范围要求、
//! 可代为修改的委托人、可读取的读者，以及提示语中使用的名称。

use crate::models::{
    comments::entities::Comment, exams::entities::Exam, grades::entities::Grade,
    homeworks::entities::Homework, materials::entities::Material, news::entities::News,
    submissions::entities::Submission, users::entities::Role,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Homework,
    Exam,
    News,
    Comment,
    Material,
    Grade,
    Submission,
}

/// 范围所依据的实体
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeEntity {
    Class,
    ClassNumber,
    Subject,
    Profile,
}

/// 某角色只能看到 `field` 等于其 `entity` 取值的记录
#[derive(Debug, Clone, Copy)]
pub struct ScopeRule {
    pub role: Role,
    pub entity: ScopeEntity,
    pub field: &'static str,
}

/// 所有者之外被授权的一方：`field` 等于主体在 `entity` 上的取值
#[derive(Debug, Clone, Copy)]
pub struct Delegate {
    pub role: Role,
    pub entity: ScopeEntity,
    pub field: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Ownership {
    pub kind: ResourceKind,
    pub owner_role: Role,
    pub owner_field: &'static str,
    pub scopes: &'static [ScopeRule],
    pub create_scopes: &'static [ScopeRule],
    pub delegate: Option<Delegate>,
    pub reader: Option<Delegate>,
    pub plural: &'static str,
    pub singular: &'static str,
}

impl Ownership {
    pub fn scope_for(&self, role: Role) -> Option<&ScopeRule> {
        self.scopes.iter().find(|rule| rule.role == role)
    }

    pub fn create_scope_for(&self, role: Role) -> Option<&ScopeRule> {
        self.create_scopes.iter().find(|rule| rule.role == role)
    }
}

const CLASS_OR_SUBJECT: &[ScopeRule] = &[
    ScopeRule {
        role: Role::Student,
        entity: ScopeEntity::Class,
        field: "clazz",
    },
    ScopeRule {
        role: Role::Teacher,
        entity: ScopeEntity::Subject,
        field: "subject",
    },
];

const TEACHER_SUBJECT: ScopeRule = ScopeRule {
    role: Role::Teacher,
    entity: ScopeEntity::Subject,
    field: "subject",
};

const SUBJECT_TEACHER: Delegate = Delegate {
    role: Role::Teacher,
    entity: ScopeEntity::Subject,
    field: "subject",
};

static REGISTRY: [Ownership; 7] = [
    Ownership {
        kind: ResourceKind::Homework,
        owner_role: Role::Teacher,
        owner_field: "author",
        scopes: CLASS_OR_SUBJECT,
        create_scopes: &[],
        delegate: None,
        reader: None,
        plural: "homeworks",
        singular: "Homework",
    },
    Ownership {
        kind: ResourceKind::Exam,
        owner_role: Role::Teacher,
        owner_field: "author",
        scopes: CLASS_OR_SUBJECT,
        create_scopes: &[],
        delegate: None,
        reader: None,
        plural: "exams",
        singular: "Exam",
    },
    Ownership {
        kind: ResourceKind::News,
        owner_role: Role::Student,
        owner_field: "author",
        scopes: &[ScopeRule {
            role: Role::Student,
            entity: ScopeEntity::Class,
            field: "clazz",
        }],
        create_scopes: &[],
        delegate: None,
        reader: None,
        plural: "posts",
        singular: "News",
    },
    Ownership {
        kind: ResourceKind::Comment,
        owner_role: Role::Student,
        owner_field: "posted_by",
        scopes: &[],
        create_scopes: &[],
        delegate: None,
        reader: None,
        plural: "comments",
        singular: "Comment",
    },
    Ownership {
        kind: ResourceKind::Material,
        owner_role: Role::Teacher,
        owner_field: "author",
        scopes: &[
            ScopeRule {
                role: Role::Student,
                entity: ScopeEntity::ClassNumber,
                field: "class_number",
            },
            TEACHER_SUBJECT,
        ],
        create_scopes: &[TEACHER_SUBJECT],
        delegate: Some(SUBJECT_TEACHER),
        reader: None,
        plural: "materials",
        singular: "Material",
    },
    Ownership {
        kind: ResourceKind::Grade,
        owner_role: Role::Teacher,
        owner_field: "author",
        scopes: &[
            ScopeRule {
                role: Role::Student,
                entity: ScopeEntity::Profile,
                field: "student",
            },
            TEACHER_SUBJECT,
        ],
        create_scopes: &[TEACHER_SUBJECT],
        delegate: Some(SUBJECT_TEACHER),
        reader: Some(Delegate {
            role: Role::Student,
            entity: ScopeEntity::Profile,
            field: "student",
        }),
        plural: "grades",
        singular: "Grade",
    },
    Ownership {
        kind: ResourceKind::Submission,
        owner_role: Role::Student,
        owner_field: "student",
        scopes: &[
            ScopeRule {
                role: Role::Student,
                entity: ScopeEntity::Profile,
                field: "student",
            },
            TEACHER_SUBJECT,
        ],
        create_scopes: &[ScopeRule {
            role: Role::Student,
            entity: ScopeEntity::Class,
            field: "clazz",
        }],
        // 作业布置者可批改
        delegate: Some(Delegate {
            role: Role::Teacher,
            entity: ScopeEntity::Profile,
            field: "homework_author",
        }),
        reader: None,
        plural: "submissions",
        singular: "Submission",
    },
];

pub fn ownership(kind: ResourceKind) -> &'static Ownership {
    match kind {
        ResourceKind::Homework => &REGISTRY[0],
        ResourceKind::Exam => &REGISTRY[1],
        ResourceKind::News => &REGISTRY[2],
        ResourceKind::Comment => &REGISTRY[3],
        ResourceKind::Material => &REGISTRY[4],
        ResourceKind::Grade => &REGISTRY[5],
        ResourceKind::Submission => &REGISTRY[6],
    }
}

/// 按字段名暴露归属与范围相关的 ID
pub trait OwnedResource {
    fn field(&self, name: &str) -> Option<i64>;
}

/// 尚未持久化的记录或汇总视图
#[derive(Debug, Clone, Default)]
pub struct FieldSet(pub Vec<(&'static str, i64)>);

impl FieldSet {
    pub fn with(mut self, name: &'static str, value: i64) -> Self {
        self.0.push((name, value));
        self
    }
}

impl OwnedResource for FieldSet {
    fn field(&self, name: &str) -> Option<i64> {
        self.0
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| *value)
    }
}

impl OwnedResource for Homework {
    fn field(&self, name: &str) -> Option<i64> {
        match name {
            "author" => Some(self.author_id),
            "subject" => Some(self.subject_id),
            "clazz" => Some(self.class_id),
            _ => None,
        }
    }
}

impl OwnedResource for Exam {
    fn field(&self, name: &str) -> Option<i64> {
        match name {
            "author" => Some(self.author_id),
            "subject" => Some(self.subject_id),
            "clazz" => Some(self.class_id),
            _ => None,
        }
    }
}

impl OwnedResource for News {
    fn field(&self, name: &str) -> Option<i64> {
        match name {
            "author" => Some(self.author_id),
            "clazz" => Some(self.class_id),
            _ => None,
        }
    }
}

impl OwnedResource for Comment {
    fn field(&self, name: &str) -> Option<i64> {
        match name {
            "posted_by" => Some(self.posted_by),
            "news" => Some(self.news_id),
            _ => None,
        }
    }
}

impl OwnedResource for Material {
    fn field(&self, name: &str) -> Option<i64> {
        match name {
            "author" => Some(self.author_id),
            "subject" => Some(self.subject_id),
            "class_number" => Some(i64::from(self.class_number)),
            _ => None,
        }
    }
}

impl OwnedResource for Grade {
    fn field(&self, name: &str) -> Option<i64> {
        match name {
            "author" => Some(self.author_id),
            "subject" => Some(self.subject_id),
            "student" => Some(self.student_id),
            _ => None,
        }
    }
}

/// 提交连同其所属作业
#[derive(Debug, Clone, Copy)]
pub struct SubmissionView<'a> {
    pub homework: &'a Homework,
    pub submission: &'a Submission,
}

impl OwnedResource for SubmissionView<'_> {
    fn field(&self, name: &str) -> Option<i64> {
        match name {
            "student" => Some(self.submission.student_id),
            "homework" => Some(self.submission.homework_id),
            "subject" => Some(self.homework.subject_id),
            "clazz" => Some(self.homework.class_id),
            "homework_author" => Some(self.homework.author_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_its_own_row() {
        for kind in [
            ResourceKind::Homework,
            ResourceKind::Exam,
            ResourceKind::News,
            ResourceKind::Comment,
            ResourceKind::Material,
            ResourceKind::Grade,
            ResourceKind::Submission,
        ] {
            assert_eq!(ownership(kind).kind, kind);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(ownership(ResourceKind::News).plural, "posts");
        assert_eq!(ownership(ResourceKind::Comment).owner_field, "posted_by");
        assert_eq!(ownership(ResourceKind::Exam).singular, "Exam");
    }

    #[test]
    fn test_scope_lookup_by_role() {
        let material = ownership(ResourceKind::Material);
        assert_eq!(
            material.scope_for(Role::Student).map(|r| r.field),
            Some("class_number")
        );
        assert!(material.create_scope_for(Role::Teacher).is_some());
        assert!(ownership(ResourceKind::News).scope_for(Role::Teacher).is_none());
    }

    #[test]
    fn test_field_set() {
        let draft = FieldSet::default().with("subject", 3).with("author", 8);
        assert_eq!(draft.field("subject"), Some(3));
        assert_eq!(draft.field("clazz"), None);
    }
}
