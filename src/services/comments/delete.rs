use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CommentService;
use crate::access::nested::resolve_comment;
use crate::access::{Action, Decision, ResourceKind, authorize};
use crate::models::ApiResponse;
use crate::services::common::{current_principal, internal_error, not_found};

pub async fn delete_comment(
    service: &CommentService,
    request: &HttpRequest,
    news_id: i64,
    comment_id: i64,
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
        Action::Destroy,
        ResourceKind::Comment,
        Some(&comment),
        Some(&principal),
    ) {
        return Ok(reason.into_response());
    }

    match storage.delete_comment(comment.id).await {
        Ok(true) => {
            info!("Comment {} deleted by user {}", comment.id, principal.user_id());
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Comment successfully deleted.",
            )))
        }
        Ok(false) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to delete comment", e)),
    }
}
