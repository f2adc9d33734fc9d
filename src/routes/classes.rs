use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::ClassService;

// 懒加载的全局 ClassService 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

// 按年级分组列出班级
pub async fn list_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req).await
}

pub async fn list_classes_by_number(
    req: HttpRequest,
    path: web::Path<i32>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .list_classes_by_number(&req, path.into_inner())
        .await
}

pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/classes")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/").route(web::get().to(list_classes)))
            .service(web::resource("/{class_number}/").route(web::get().to(list_classes_by_number))),
    );
}
