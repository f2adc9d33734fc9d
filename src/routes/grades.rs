use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::access::{Action, ResourceKind};
use crate::middlewares::RequirePolicy;
use crate::models::grades::requests::GradeRequest;
use crate::services::GradeService;
use crate::utils::{SafeIDI64, SafeSubjectIdI64, SafeUserIdI64};

static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

fn grade_policy(action: Action) -> RequirePolicy {
    RequirePolicy::new(ResourceKind::Grade, action)
}

// 科目下所有成绩（学生只看到自己的）
pub async fn list_subject_grades(
    req: HttpRequest,
    subject: SafeSubjectIdI64,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_subject_grades(&req, subject.0).await
}

pub async fn list_student_grades(
    req: HttpRequest,
    subject: SafeSubjectIdI64,
    user: SafeUserIdI64,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .list_student_grades(&req, subject.0, user.0)
        .await
}

pub async fn create_grade(
    req: HttpRequest,
    subject: SafeSubjectIdI64,
    user: SafeUserIdI64,
    body: web::Json<GradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .create_grade(&req, subject.0, user.0, body.into_inner())
        .await
}

pub async fn get_grade(
    req: HttpRequest,
    subject: SafeSubjectIdI64,
    user: SafeUserIdI64,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .get_grade(&req, subject.0, user.0, path.0)
        .await
}

pub async fn update_grade(
    req: HttpRequest,
    subject: SafeSubjectIdI64,
    user: SafeUserIdI64,
    path: SafeIDI64,
    body: web::Json<GradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .update_grade(&req, subject.0, user.0, path.0, body.into_inner())
        .await
}

pub async fn delete_grade(
    req: HttpRequest,
    subject: SafeSubjectIdI64,
    user: SafeUserIdI64,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .delete_grade(&req, subject.0, user.0, path.0)
        .await
}

// 挂在 `/subjects` 作用域下
pub fn configure_subject_grade_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{subject_pk}/grades/").route(
            web::get()
                .to(list_subject_grades)
                .wrap(grade_policy(Action::List)),
        ),
    )
    .service(
        web::resource("/{subject_pk}/students/{user_pk}/grades/")
            .route(
                web::get()
                    .to(list_student_grades)
                    .wrap(grade_policy(Action::List)),
            )
            // 打分 - 仅任课教师
            .route(
                web::post()
                    .to(create_grade)
                    .wrap(grade_policy(Action::Create)),
            ),
    )
    .service(
        web::resource("/{subject_pk}/students/{user_pk}/grades/{id}/")
            .route(
                web::get()
                    .to(get_grade)
                    .wrap(grade_policy(Action::Retrieve)),
            )
            .route(
                web::put()
                    .to(update_grade)
                    .wrap(grade_policy(Action::Update)),
            )
            .route(
                web::delete()
                    .to(delete_grade)
                    .wrap(grade_policy(Action::Destroy)),
            ),
    );
}
