use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::access::nested::resolve_submission;
use crate::access::{Action, Decision, ResourceKind, SubmissionView, authorize};
use crate::models::{
    ApiResponse,
    submissions::{
        entities::SubmissionChanges, requests::UpdateSubmissionRequest,
        responses::SubmissionWriteResponse,
    },
};
use crate::models::users::entities::Role;
use crate::services::common::{current_principal, internal_error, not_found, validation_failed};
use crate::utils::validate::{FieldErrors, TextRule, check_optional_url, check_text};

const STUDENT_ONLY_FIELD: &str = "Only the submitting student can change this field.";
const AUTHOR_ONLY_FIELD: &str = "Only the homework author can change this field.";

/// 按角色拆分可修改字段
fn changes_for(role: Option<Role>, req: UpdateSubmissionRequest) -> Result<SubmissionChanges, FieldErrors> {
    let mut errors = FieldErrors::new();

    match role {
        Some(Role::Teacher) => {
            if req.content.is_some() {
                errors.add("content", STUDENT_ONLY_FIELD);
            }
            if req.solution_url.is_some() {
                errors.add("solution_url", STUDENT_ONLY_FIELD);
            }
        }
        _ => {
            if req.checked.is_some() {
                errors.add("checked", AUTHOR_ONLY_FIELD);
            }
            check_text(
                &mut errors,
                "content",
                req.content.as_deref(),
                TextRule::required(2048).partial(true),
            );
            check_optional_url(&mut errors, "solution_url", req.solution_url.as_deref());
        }
    }

    errors.into_result()?;
    Ok(SubmissionChanges {
        content: req.content,
        solution_url: req.solution_url,
        checked: req.checked,
    })
}

pub async fn update_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    homework_id: i64,
    submission_id: i64,
    req: UpdateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let (homework, submission) =
        match resolve_submission(storage.as_ref(), &principal, homework_id, submission_id).await {
            Ok(resolved) => resolved,
            Err(e) => return Ok(e.into_response()),
        };

    let view = SubmissionView {
        homework: &homework,
        submission: &submission,
    };
    if let Decision::Deny(reason) = authorize(
        Action::Update,
        ResourceKind::Submission,
        Some(&view),
        Some(&principal),
    ) {
        return Ok(reason.into_response());
    }

    let changes = match changes_for(principal.role(), req) {
        Ok(changes) => changes,
        Err(errors) => return Ok(validation_failed(errors)),
    };

    match storage.update_submission(submission.id, changes).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmissionWriteResponse::from(&updated),
            "Submission successfully updated.",
        ))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to update submission", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_may_only_check() {
        let req = UpdateSubmissionRequest {
            content: Some("rewritten".into()),
            solution_url: None,
            checked: Some(true),
        };
        let errors = changes_for(Some(Role::Teacher), req).unwrap_err();
        assert_eq!(
            errors.into_value(),
            serde_json::json!({ "content": [STUDENT_ONLY_FIELD] })
        );

        let req = UpdateSubmissionRequest {
            checked: Some(true),
            ..Default::default()
        };
        let changes = changes_for(Some(Role::Teacher), req).unwrap();
        assert_eq!(changes.checked, Some(true));
    }

    #[test]
    fn test_student_cannot_check() {
        let req = UpdateSubmissionRequest {
            checked: Some(true),
            ..Default::default()
        };
        let errors = changes_for(Some(Role::Student), req).unwrap_err();
        assert!(errors.contains("checked"));
    }

    #[test]
    fn test_student_content_is_validated() {
        let req = UpdateSubmissionRequest {
            content: Some("   ".into()),
            solution_url: Some("ftp:/nope".into()),
            checked: None,
        };
        let errors = changes_for(Some(Role::Student), req).unwrap_err();
        assert!(errors.contains("content"));
        assert!(errors.contains("solution_url"));
    }
}
