use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{NewsService, check_news_text};
use crate::access::{Action, Decision, ResourceKind, authorize};
use crate::models::{
    ApiResponse,
    news::{requests::UpdateNewsRequest, responses::NewsWriteResponse},
};
use crate::services::common::{current_principal, internal_error, not_found, validation_failed};
use crate::utils::validate::FieldErrors;

pub async fn update_news(
    service: &NewsService,
    request: &HttpRequest,
    news_id: i64,
    req: UpdateNewsRequest,
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
        authorize(Action::Update, ResourceKind::News, Some(&news), Some(&principal))
    {
        return Ok(reason.into_response());
    }

    let mut errors = FieldErrors::new();
    check_news_text(&mut errors, req.title.as_deref(), req.content.as_deref(), true);
    if !errors.is_empty() {
        return Ok(validation_failed(errors));
    }

    match storage.update_news(news_id, req).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            NewsWriteResponse::from(&updated),
            "News successfully updated.",
        ))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to update news", e)),
    }
}
