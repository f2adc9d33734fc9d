use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{COMMENT_RULE, CommentService};
use crate::access::nested::resolve_comment;
use crate::access::{Action, Decision, ResourceKind, authorize};
use crate::models::{
    ApiResponse,
    comments::{requests::CommentRequest, responses::CommentWriteResponse},
};
use crate::services::common::{current_principal, internal_error, not_found, validation_failed};
use crate::utils::validate::{FieldErrors, check_text};

pub async fn update_comment(
    service: &CommentService,
    request: &HttpRequest,
    news_id: i64,
    comment_id: i64,
    req: CommentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let (_, comment) =
        match resolve_comment(storage.as_ref(), &principal, news_id, comment_id).await {
            Ok(resolved) => resolved,
            Err(e) => return Ok(e.into_response()),
        };

    if let Decision::Deny(reason) = authorize(
        Action::Update,
        ResourceKind::Comment,
        Some(&comment),
        Some(&principal),
    ) {
        return Ok(reason.into_response());
    }

    let mut errors = FieldErrors::new();
    check_text(
        &mut errors,
        "content",
        req.content.as_deref(),
        COMMENT_RULE.partial(true),
    );
    if !errors.is_empty() {
        return Ok(validation_failed(errors));
    }

    // 未提供内容时原样返回
    let Some(content) = req.content else {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            CommentWriteResponse::from(&comment),
            "Comment successfully updated.",
        )));
    };

    match storage.update_comment(comment.id, content).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CommentWriteResponse::from(&updated),
            "Comment successfully updated.",
        ))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to update comment", e)),
    }
}
