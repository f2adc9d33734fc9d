use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::access::{Action, ResourceKind};
use crate::middlewares::{self, RequirePolicy};
use crate::models::homeworks::requests::{CreateHomeworkRequest, UpdateHomeworkRequest};
use crate::models::submissions::requests::{CreateSubmissionRequest, UpdateSubmissionRequest};
use crate::services::{HomeworkService, SubmissionService};
use crate::utils::{SafeHomeworkIdI64, SafeIDI64};

// 懒加载的全局 HomeworkService 实例
static HOMEWORK_SERVICE: Lazy<HomeworkService> = Lazy::new(HomeworkService::new_lazy);
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

fn homework_policy(action: Action) -> RequirePolicy {
    RequirePolicy::new(ResourceKind::Homework, action)
}

fn submission_policy(action: Action) -> RequirePolicy {
    RequirePolicy::new(ResourceKind::Submission, action)
}

// 列出作业（业务层按班级或科目过滤）
pub async fn list_homeworks(req: HttpRequest) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE.list_homeworks(&req).await
}

// 创建作业
pub async fn create_homework(
    req: HttpRequest,
    body: web::Json<CreateHomeworkRequest>,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE
        .create_homework(&req, body.into_inner())
        .await
}

// 获取作业详情
pub async fn get_homework(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE.get_homework(&req, path.0).await
}

// 更新作业
pub async fn update_homework(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateHomeworkRequest>,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE
        .update_homework(&req, path.0, body.into_inner())
        .await
}

// 删除作业
pub async fn delete_homework(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE.delete_homework(&req, path.0).await
}

pub async fn list_submissions(
    req: HttpRequest,
    homework: SafeHomeworkIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.list_submissions(&req, homework.0).await
}

pub async fn create_submission(
    req: HttpRequest,
    homework: SafeHomeworkIdI64,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&req, homework.0, body.into_inner())
        .await
}

pub async fn get_submission(
    req: HttpRequest,
    homework: SafeHomeworkIdI64,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(&req, homework.0, path.0)
        .await
}

pub async fn update_submission(
    req: HttpRequest,
    homework: SafeHomeworkIdI64,
    path: SafeIDI64,
    body: web::Json<UpdateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .update_submission(&req, homework.0, path.0, body.into_inner())
        .await
}

pub async fn delete_submission(
    req: HttpRequest,
    homework: SafeHomeworkIdI64,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .delete_submission(&req, homework.0, path.0)
        .await
}

// 配置路由
pub fn configure_homeworks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/homeworks")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/")
                    .route(
                        web::get()
                            .to(list_homeworks)
                            .wrap(homework_policy(Action::List)),
                    )
                    // 创建作业 - 仅教师
                    .route(
                        web::post()
                            .to(create_homework)
                            .wrap(homework_policy(Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}/")
                    .route(
                        web::get()
                            .to(get_homework)
                            .wrap(homework_policy(Action::Retrieve)),
                    )
                    // 更新、删除 - 仅作者本人（业务层检查）
                    .route(
                        web::put()
                            .to(update_homework)
                            .wrap(homework_policy(Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_homework)
                            .wrap(homework_policy(Action::Destroy)),
                    ),
            )
            .service(
                web::resource("/{homework_pk}/submissions/")
                    .route(
                        web::get()
                            .to(list_submissions)
                            .wrap(submission_policy(Action::List)),
                    )
                    // 提交作业 - 仅本班学生
                    .route(
                        web::post()
                            .to(create_submission)
                            .wrap(submission_policy(Action::Create)),
                    ),
            )
            .service(
                web::resource("/{homework_pk}/submissions/{id}/")
                    .route(
                        web::get()
                            .to(get_submission)
                            .wrap(submission_policy(Action::Retrieve)),
                    )
                    .route(
                        web::put()
                            .to(update_submission)
                            .wrap(submission_policy(Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_submission)
                            .wrap(submission_policy(Action::Destroy)),
                    ),
            ),
    );
}
