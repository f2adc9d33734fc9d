use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CommentService;
use super::detail::render_comment;
use crate::access::nested::resolve_news;
use crate::models::ApiResponse;
use crate::services::common::{RelationLoader, current_principal, internal_error};

pub async fn list_comments(
    service: &CommentService,
    request: &HttpRequest,
    news_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let news = match resolve_news(storage.as_ref(), &principal, news_id).await {
        Ok(news) => news,
        Err(e) => return Ok(e.into_response()),
    };

    let comments = match storage.list_comments(news.id).await {
        Ok(comments) => comments,
        Err(e) => return Ok(internal_error("Failed to list comments", e)),
    };

    let mut loader = RelationLoader::new(storage.as_ref());
    let mut items = Vec::with_capacity(comments.len());
    for comment in comments {
        match render_comment(&mut loader, comment).await {
            Ok(item) => items.push(item),
            Err(e) => return Ok(internal_error("Failed to load comment relations", e)),
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(items, "Query successful.")))
}
