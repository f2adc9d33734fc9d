use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::NotificationService;
use crate::models::ApiResponse;
use crate::services::common::{current_principal, internal_error, not_found};

/// 他人的通知与不存在的通知一样返回 404
pub async fn mark_notification_read(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    match storage
        .mark_notification_read(principal.user_id(), notification_id)
        .await
    {
        Ok(true) => {
            debug!(
                "User {} marked notification {} as read",
                principal.user_id(),
                notification_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Notification marked as read.",
            )))
        }
        Ok(false) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to mark notification as read", e)),
    }
}
