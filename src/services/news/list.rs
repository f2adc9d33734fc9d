use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NewsService;
use super::detail::render_news;
use crate::access::{ResourceKind, scope_filter};
use crate::models::{
    ApiResponse,
    news::{entities::NewsListQuery, responses::NewsResponse},
};
use crate::services::common::{RelationLoader, current_principal, internal_error};

pub async fn list_news(service: &NewsService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    // 只列出本班同学发布的新闻
    let filter = scope_filter(ResourceKind::News, &principal);
    if filter.is_nothing() {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            Vec::<NewsResponse>::new(),
            "Query successful.",
        )));
    }

    let query = NewsListQuery {
        class_id: filter.value_for("clazz"),
    };
    let news = match storage.list_news(query).await {
        Ok(news) => news,
        Err(e) => return Ok(internal_error("Failed to list news", e)),
    };

    let mut loader = RelationLoader::new(storage.as_ref());
    let mut items = Vec::with_capacity(news.len());
    for item in news {
        match render_news(&mut loader, item, None).await {
            Ok(item) => items.push(item),
            Err(e) => return Ok(internal_error("Failed to load news relations", e)),
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(items, "Query successful.")))
}
