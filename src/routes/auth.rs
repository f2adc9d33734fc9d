use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::{LoginRequest, RegisterRequest};
use crate::services::{AuthService, ClassService};

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

pub async fn login(
    req: HttpRequest,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(user_data.into_inner(), &req).await
}

pub async fn register(
    req: HttpRequest,
    user_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(user_data.into_inner(), &req).await
}

// 班级学生名单
pub async fn list_class_students(
    req: HttpRequest,
    path: web::Path<(i32, String)>,
) -> ActixResult<HttpResponse> {
    let (number, letter) = path.into_inner();
    CLASS_SERVICE
        .list_class_students(&req, number, letter)
        .await
}

// 配置路由
// `/students` 下匿名与需认证的路由并存，逐个资源挂载中间件
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/students/register/").route(web::post().to(register)))
        .service(web::resource("/students/login/").route(web::post().to(login)))
        .service(
            web::resource("/students/{class_number}/{class_letter}/")
                .wrap(middlewares::RequireJWT)
                .route(web::get().to(list_class_students)),
        );
}
