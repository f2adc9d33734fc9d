use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{HomeworkService, check_homework_text};
use crate::access::{Action, Decision, DenyReason, ResourceKind, authorize};
use crate::models::{
    ApiResponse,
    homeworks::{
        entities::NewHomework, requests::CreateHomeworkRequest,
        responses::HomeworkWriteResponse,
    },
};
use crate::services::common::{
    check_class_ref, current_principal, internal_error, validation_failed,
};
use crate::services::notifications::dispatch_homework_created;
use crate::utils::validate::{FieldErrors, check_required};

pub async fn create_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    req: CreateHomeworkRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    if let Decision::Deny(reason) =
        authorize(Action::Create, ResourceKind::Homework, None, Some(&principal))
    {
        return Ok(reason.into_response());
    }
    let Some(teacher) = principal.as_teacher() else {
        return Ok(DenyReason::WrongRole.into_response());
    };

    // 1. 校验字段
    let mut errors = FieldErrors::new();
    check_homework_text(&mut errors, req.topic.as_deref(), req.details.as_deref(), false);
    check_required(&mut errors, "clazz", req.clazz.as_ref());
    check_required(&mut errors, "deadline", req.deadline.as_ref());
    if let Err(e) = check_class_ref(storage.as_ref(), &mut errors, "clazz", req.clazz).await {
        return Ok(internal_error("Failed to check class", e));
    }
    if !errors.is_empty() {
        return Ok(validation_failed(errors));
    }

    let (Some(topic), Some(class_id), Some(deadline)) = (req.topic, req.clazz, req.deadline)
    else {
        return Ok(validation_failed(errors));
    };

    // 2. 作者与科目取自当前教师
    let new_homework = NewHomework {
        topic,
        subject_id: teacher.subject.id,
        class_id,
        author_id: teacher.id,
        deadline,
        details: req.details.unwrap_or_default(),
    };

    let homework = match storage.create_homework(new_homework).await {
        Ok(homework) => homework,
        Err(e) => return Ok(internal_error("Failed to create homework", e)),
    };

    info!(
        "Teacher {} created homework {} for class {}",
        teacher.user.username, homework.id, homework.class_id
    );

    // 3. 通知班级学生
    if let Some(notifier) = service.get_notifier(request) {
        dispatch_homework_created(storage.clone(), notifier, homework.clone());
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(
        HomeworkWriteResponse::from(&homework),
        "Homework successfully created.",
    )))
}
