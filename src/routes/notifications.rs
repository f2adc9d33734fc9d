use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::NotificationService;
use crate::utils::SafeIDI64;

static NOTIFICATION_SERVICE: Lazy<NotificationService> = Lazy::new(NotificationService::new_lazy);

// 当前用户的通知
pub async fn list_notifications(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.list_notifications(&req).await
}

pub async fn mark_notification_read(
    req: HttpRequest,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .mark_notification_read(&req, path.0)
        .await
}

pub fn configure_notifications_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notifications")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/").route(web::get().to(list_notifications)))
            .service(web::resource("/{id}/read/").route(web::put().to(mark_notification_read))),
    );
}
