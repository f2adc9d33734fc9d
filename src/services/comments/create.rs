use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{COMMENT_RULE, CommentService};
use crate::access::DenyReason;
use crate::access::nested::resolve_news;
use crate::models::{
    ApiResponse,
    comments::{entities::NewComment, requests::CommentRequest, responses::CommentWriteResponse},
};
use crate::services::common::{current_principal, internal_error, validation_failed};
use crate::utils::validate::{FieldErrors, check_text};

pub async fn create_comment(
    service: &CommentService,
    request: &HttpRequest,
    news_id: i64,
    req: CommentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };
    let Some(student) = principal.as_student() else {
        return Ok(DenyReason::WrongRole.into_response());
    };

    let news = match resolve_news(storage.as_ref(), &principal, news_id).await {
        Ok(news) => news,
        Err(e) => return Ok(e.into_response()),
    };

    let mut errors = FieldErrors::new();
    check_text(&mut errors, "content", req.content.as_deref(), COMMENT_RULE);
    let Some(content) = req.content.filter(|_| errors.is_empty()) else {
        return Ok(validation_failed(errors));
    };

    let new_comment = NewComment {
        news_id: news.id,
        posted_by: student.id,
        content,
    };

    match storage.create_comment(new_comment).await {
        Ok(comment) => {
            info!(
                "Student {} commented on news {}",
                student.user.username, news.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                CommentWriteResponse::from(&comment),
                "Comment successfully created.",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create comment", e)),
    }
}
