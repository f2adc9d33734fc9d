//! 嵌套资源解析
//!
//! 各级父资源独立查询，子资源必须属于已解析的父资源，否则一律 404。

use actix_web::HttpResponse;
use tracing::error;

use crate::access::evaluator::scope_filter;
use crate::access::principal::Principal;
use crate::access::registry::ResourceKind;
use crate::errors::ElsyserError;
use crate::models::{
    ApiResponse, ErrorCode, comments::entities::Comment, grades::entities::Grade,
    homeworks::entities::Homework, materials::entities::Material, news::entities::News,
    profiles::entities::Student, subjects::entities::Subject,
    submissions::entities::Submission,
};
use crate::storage::Storage;
use crate::utils::NOT_FOUND_MESSAGE;

#[derive(Debug)]
pub enum NestedError {
    NotFound,
    Storage(ElsyserError),
}

impl From<ElsyserError> for NestedError {
    fn from(err: ElsyserError) -> Self {
        NestedError::Storage(err)
    }
}

impl NestedError {
    pub fn into_response(self) -> HttpResponse {
        match self {
            NestedError::NotFound => HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::NotFound, NOT_FOUND_MESSAGE)),
            NestedError::Storage(err) => {
                error!("Failed to resolve nested resource: {}", err);
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error.",
                ))
            }
        }
    }
}

pub type NestedResult<T> = Result<T, NestedError>;

pub async fn resolve_subject(storage: &dyn Storage, subject_id: i64) -> NestedResult<Subject> {
    storage
        .get_subject_by_id(subject_id)
        .await?
        .ok_or(NestedError::NotFound)
}

/// subject -> material
pub async fn resolve_material(
    storage: &dyn Storage,
    subject_id: i64,
    material_id: i64,
) -> NestedResult<(Subject, Material)> {
    let subject = resolve_subject(storage, subject_id).await?;
    let material = storage
        .get_material_by_id(material_id)
        .await?
        .filter(|material| material.subject_id == subject.id)
        .ok_or(NestedError::NotFound)?;
    Ok((subject, material))
}

/// 新闻须在主体可见范围内
pub async fn resolve_news(
    storage: &dyn Storage,
    principal: &Principal,
    news_id: i64,
) -> NestedResult<News> {
    let filter = scope_filter(ResourceKind::News, principal);
    storage
        .get_news_by_id(news_id)
        .await?
        .filter(|news| filter.admits(news))
        .ok_or(NestedError::NotFound)
}

/// news -> comment
pub async fn resolve_comment(
    storage: &dyn Storage,
    principal: &Principal,
    news_id: i64,
    comment_id: i64,
) -> NestedResult<(News, Comment)> {
    let news = resolve_news(storage, principal, news_id).await?;
    let comment = storage
        .get_comment_by_id(comment_id)
        .await?
        .filter(|comment| comment.news_id == news.id)
        .ok_or(NestedError::NotFound)?;
    Ok((news, comment))
}

/// subject -> user(学生)
pub async fn resolve_graded_student(
    storage: &dyn Storage,
    subject_id: i64,
    user_id: i64,
) -> NestedResult<(Subject, Student)> {
    let subject = resolve_subject(storage, subject_id).await?;
    let student = storage
        .get_student_by_user_id(user_id)
        .await?
        .ok_or(NestedError::NotFound)?;
    Ok((subject, student))
}

/// subject -> user(学生) -> grade
pub async fn resolve_grade(
    storage: &dyn Storage,
    subject_id: i64,
    user_id: i64,
    grade_id: i64,
) -> NestedResult<(Subject, Student, Grade)> {
    let (subject, student) = resolve_graded_student(storage, subject_id, user_id).await?;
    let grade = storage
        .get_grade_by_id(grade_id)
        .await?
        .filter(|grade| grade.subject_id == subject.id && grade.student_id == student.id)
        .ok_or(NestedError::NotFound)?;
    Ok((subject, student, grade))
}

/// 作业须在主体可见范围内
pub async fn resolve_homework(
    storage: &dyn Storage,
    principal: &Principal,
    homework_id: i64,
) -> NestedResult<Homework> {
    let filter = scope_filter(ResourceKind::Homework, principal);
    storage
        .get_homework_by_id(homework_id)
        .await?
        .filter(|homework| filter.admits(homework))
        .ok_or(NestedError::NotFound)
}

/// homework -> submission
pub async fn resolve_submission(
    storage: &dyn Storage,
    principal: &Principal,
    homework_id: i64,
    submission_id: i64,
) -> NestedResult<(Homework, Submission)> {
    let homework = resolve_homework(storage, principal, homework_id).await?;
    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .filter(|submission| submission.homework_id == homework.id)
        .ok_or(NestedError::NotFound)?;
    Ok((homework, submission))
}
