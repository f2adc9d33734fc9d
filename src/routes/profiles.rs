use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::profiles::requests::UpdateProfileRequest;
use crate::services::ProfileService;
use crate::utils::SafeIDI64;

static PROFILE_SERVICE: Lazy<ProfileService> = Lazy::new(ProfileService::new_lazy);

pub async fn get_profile(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.get_profile(&req, path.0).await
}

// 只能修改自己的资料（业务层检查）
pub async fn update_profile(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE
        .update_profile(&req, path.0, body.into_inner())
        .await
}

pub fn configure_profile_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profile")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{id}/")
                    .route(web::get().to(get_profile))
                    .route(web::put().to(update_profile)),
            ),
    );
}
