use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::HomeworkService;
use crate::access::{Action, Decision, ResourceKind, authorize};
use crate::models::ApiResponse;
use crate::services::common::{current_principal, internal_error, not_found};

pub async fn delete_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    homework_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let homework = match storage.get_homework_by_id(homework_id).await {
        Ok(Some(homework)) => homework,
        Ok(None) => return Ok(not_found()),
        Err(e) => return Ok(internal_error("Failed to load homework", e)),
    };

    if let Decision::Deny(reason) = authorize(
        Action::Destroy,
        ResourceKind::Homework,
        Some(&homework),
        Some(&principal),
    ) {
        return Ok(reason.into_response());
    }

    match storage.delete_homework(homework_id).await {
        Ok(true) => {
            info!("Homework {} deleted by user {}", homework_id, principal.user_id());
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Homework successfully deleted.",
            )))
        }
        Ok(false) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to delete homework", e)),
    }
}
