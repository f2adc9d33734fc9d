use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{NewsService, check_news_text};
use crate::access::DenyReason;
use crate::models::{
    ApiResponse,
    news::{entities::NewNews, requests::CreateNewsRequest, responses::NewsWriteResponse},
};
use crate::services::common::{current_principal, internal_error, validation_failed};
use crate::utils::validate::FieldErrors;

pub async fn create_news(
    service: &NewsService,
    request: &HttpRequest,
    req: CreateNewsRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };
    let Some(student) = principal.as_student() else {
        return Ok(DenyReason::WrongRole.into_response());
    };

    let mut errors = FieldErrors::new();
    check_news_text(&mut errors, req.title.as_deref(), req.content.as_deref(), false);
    if !errors.is_empty() {
        return Ok(validation_failed(errors));
    }
    let (Some(title), Some(content)) = (req.title, req.content) else {
        return Ok(validation_failed(errors));
    };

    // 可见范围由作者所在班级决定
    let new_news = NewNews {
        title,
        content,
        author_id: student.id,
    };

    match storage.create_news(new_news).await {
        Ok(news) => {
            info!(
                "Student {} posted news {} in class {}",
                student.user.username,
                news.id,
                student.clazz.title()
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                NewsWriteResponse::from(&news),
                "News successfully created.",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create news", e)),
    }
}
