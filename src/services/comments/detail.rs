use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CommentService;
use crate::access::nested::resolve_comment;
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    comments::{entities::Comment, responses::CommentResponse},
};
use crate::services::common::{RelationLoader, current_principal, internal_error};

pub(crate) async fn render_comment(
    loader: &mut RelationLoader<'_>,
    comment: Comment,
) -> Result<CommentResponse> {
    Ok(CommentResponse {
        id: comment.id,
        news: comment.news_id,
        posted_by: loader.student(comment.posted_by).await?,
        content: comment.content,
        posted_on: comment.created_at,
    })
}

pub async fn get_comment(
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

    // 评论必须属于路径中的新闻
    let (_, comment) =
        match resolve_comment(storage.as_ref(), &principal, news_id, comment_id).await {
            Ok(resolved) => resolved,
            Err(e) => return Ok(e.into_response()),
        };

    let mut loader = RelationLoader::new(storage.as_ref());
    match render_comment(&mut loader, comment).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Query successful."))),
        Err(e) => Ok(internal_error("Failed to load comment relations", e)),
    }
}
