use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::routes::{grades, materials};
use crate::services::SubjectService;

static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);

// 科目列表 - 仅教师（业务层检查）
pub async fn list_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(&req).await
}

// `/subjects` 下的资料与成绩路由共用同一个作用域
pub fn configure_subjects_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/subjects")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/").route(web::get().to(list_subjects)))
            .configure(materials::configure_subject_material_routes)
            .configure(grades::configure_subject_grade_routes),
    );
}
