use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::access::{Action, ResourceKind};
use crate::middlewares::{self, RequirePolicy};
use crate::models::exams::requests::{CreateExamRequest, UpdateExamRequest};
use crate::services::ExamService;
use crate::utils::SafeIDI64;

static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

fn exam_policy(action: Action) -> RequirePolicy {
    RequirePolicy::new(ResourceKind::Exam, action)
}

pub async fn list_exams(req: HttpRequest) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_exams(&req).await
}

pub async fn create_exam(
    req: HttpRequest,
    body: web::Json<CreateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.create_exam(&req, body.into_inner()).await
}

pub async fn get_exam(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.get_exam(&req, path.0).await
}

pub async fn update_exam(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .update_exam(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_exam(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_exam(&req, path.0).await
}

pub fn configure_exams_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/exams")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/")
                    .route(web::get().to(list_exams).wrap(exam_policy(Action::List)))
                    .route(
                        web::post()
                            .to(create_exam)
                            .wrap(exam_policy(Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}/")
                    .route(web::get().to(get_exam).wrap(exam_policy(Action::Retrieve)))
                    .route(
                        web::put()
                            .to(update_exam)
                            .wrap(exam_policy(Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_exam)
                            .wrap(exam_policy(Action::Destroy)),
                    ),
            ),
    );
}
