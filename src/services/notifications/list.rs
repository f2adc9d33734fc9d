use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::ApiResponse;
use crate::models::notifications::responses::NotificationListResponse;
use crate::services::common::{current_principal, internal_error};

pub async fn list_notifications(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let items = match storage
        .list_notifications_by_user(principal.user_id())
        .await
    {
        Ok(items) => items,
        Err(e) => return Ok(internal_error("Failed to list notifications", e)),
    };

    let unread = match storage
        .count_unread_notifications(principal.user_id())
        .await
    {
        Ok(count) => count,
        Err(e) => return Ok(internal_error("Failed to count notifications", e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        NotificationListResponse { items, unread },
        "Query successful.",
    )))
}
