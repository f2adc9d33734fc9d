use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::NewsService;
use crate::access::{Action, Decision, ResourceKind, authorize};
use crate::models::ApiResponse;
use crate::services::common::{current_principal, internal_error, not_found};

pub async fn delete_news(
    service: &NewsService,
    request: &HttpRequest,
    news_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let news = match storage.get_news_by_id(news_id).await {
        Ok(Some(news)) => news,
        Ok(None) => return Ok(not_found()),
        Err(e) => return Ok(internal_error("Failed to load news", e)),
    };

    if let Decision::Deny(reason) =
        authorize(Action::Destroy, ResourceKind::News, Some(&news), Some(&principal))
    {
        return Ok(reason.into_response());
    }

    // 评论随新闻一并删除
    match storage.delete_news(news_id).await {
        Ok(true) => {
            info!("News {} deleted by user {}", news_id, principal.user_id());
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("News successfully deleted.")))
        }
        Ok(false) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to delete news", e)),
    }
}
