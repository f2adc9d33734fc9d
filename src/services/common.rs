//! 业务层公共工具：统一错误响应、请求主体提取、关联对象加载

use actix_web::{HttpRequest, HttpResponse};
use std::collections::HashMap;
use std::fmt::Display;
use tracing::error;

use crate::access::{DenyReason, Principal};
use crate::errors::{ElsyserError, Result};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, classes::entities::Class, subjects::entities::Subject,
    users::responses::AuthorInfo,
};
use crate::storage::Storage;
use crate::utils::NOT_FOUND_MESSAGE;
use crate::utils::validate::FieldErrors;

pub const VALIDATION_FAILED_MESSAGE: &str = "Invalid input.";

pub fn internal_error(context: &str, err: impl Display) -> HttpResponse {
    error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        "Internal server error.",
    ))
}

pub fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, NOT_FOUND_MESSAGE))
}

pub fn validation_failed(errors: FieldErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error(
        ErrorCode::ValidationFailed,
        errors.into_value(),
        VALIDATION_FAILED_MESSAGE,
    ))
}

/// RequireJWT 放入请求扩展的主体
pub fn current_principal(request: &HttpRequest) -> std::result::Result<Principal, HttpResponse> {
    RequireJWT::extract_principal(request).ok_or_else(|| DenyReason::Unauthenticated.into_response())
}

/// 截止日期过滤所用的“今天”
pub fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

/// `Invalid pk "7" - object does not exist.`
pub fn invalid_pk_message(id: i64) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}

/// 班级引用必须指向已存在的班级
pub async fn check_class_ref(
    storage: &dyn Storage,
    errors: &mut FieldErrors,
    field: &str,
    class_id: Option<i64>,
) -> Result<()> {
    if let Some(id) = class_id
        && storage.get_class_by_id(id).await?.is_none()
    {
        errors.add(field, invalid_pk_message(id));
    }
    Ok(())
}

/// 单次请求内的关联对象加载器，同一 ID 只查询一次
pub struct RelationLoader<'a> {
    storage: &'a dyn Storage,
    subjects: HashMap<i64, Subject>,
    classes: HashMap<i64, Class>,
    teachers: HashMap<i64, AuthorInfo>,
    students: HashMap<i64, AuthorInfo>,
}

impl<'a> RelationLoader<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self {
            storage,
            subjects: HashMap::new(),
            classes: HashMap::new(),
            teachers: HashMap::new(),
            students: HashMap::new(),
        }
    }

    pub async fn subject(&mut self, id: i64) -> Result<Subject> {
        if let Some(subject) = self.subjects.get(&id) {
            return Ok(subject.clone());
        }
        let subject = self
            .storage
            .get_subject_by_id(id)
            .await?
            .ok_or_else(|| ElsyserError::not_found(format!("subject {id}")))?;
        self.subjects.insert(id, subject.clone());
        Ok(subject)
    }

    pub async fn class(&mut self, id: i64) -> Result<Class> {
        if let Some(class) = self.classes.get(&id) {
            return Ok(class.clone());
        }
        let class = self
            .storage
            .get_class_by_id(id)
            .await?
            .ok_or_else(|| ElsyserError::not_found(format!("class {id}")))?;
        self.classes.insert(id, class.clone());
        Ok(class)
    }

    /// 教师资料 ID -> 作者信息
    pub async fn teacher(&mut self, id: i64) -> Result<AuthorInfo> {
        if let Some(author) = self.teachers.get(&id) {
            return Ok(author.clone());
        }
        let teacher = self
            .storage
            .get_teacher_by_id(id)
            .await?
            .ok_or_else(|| ElsyserError::not_found(format!("teacher {id}")))?;
        let author = AuthorInfo::from(&teacher);
        self.teachers.insert(id, author.clone());
        Ok(author)
    }

    /// 学生资料 ID -> 作者信息
    pub async fn student(&mut self, id: i64) -> Result<AuthorInfo> {
        if let Some(author) = self.students.get(&id) {
            return Ok(author.clone());
        }
        let student = self
            .storage
            .get_student_by_id(id)
            .await?
            .ok_or_else(|| ElsyserError::not_found(format!("student {id}")))?;
        let author = AuthorInfo::from(&student);
        self.students.insert(id, author.clone());
        Ok(author)
    }
}
