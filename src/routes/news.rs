use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::access::{Action, ResourceKind};
use crate::middlewares::{self, RequirePolicy};
use crate::models::comments::requests::CommentRequest;
use crate::models::news::requests::{CreateNewsRequest, UpdateNewsRequest};
use crate::services::{CommentService, NewsService};
use crate::utils::{SafeIDI64, SafeNewsIdI64};

static NEWS_SERVICE: Lazy<NewsService> = Lazy::new(NewsService::new_lazy);
static COMMENT_SERVICE: Lazy<CommentService> = Lazy::new(CommentService::new_lazy);

fn news_policy(action: Action) -> RequirePolicy {
    RequirePolicy::new(ResourceKind::News, action)
}

fn comment_policy(action: Action) -> RequirePolicy {
    RequirePolicy::new(ResourceKind::Comment, action)
}

// 本班新闻
pub async fn list_news(req: HttpRequest) -> ActixResult<HttpResponse> {
    NEWS_SERVICE.list_news(&req).await
}

pub async fn create_news(
    req: HttpRequest,
    body: web::Json<CreateNewsRequest>,
) -> ActixResult<HttpResponse> {
    NEWS_SERVICE.create_news(&req, body.into_inner()).await
}

pub async fn get_news(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    NEWS_SERVICE.get_news(&req, path.0).await
}

pub async fn update_news(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateNewsRequest>,
) -> ActixResult<HttpResponse> {
    NEWS_SERVICE
        .update_news(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_news(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    NEWS_SERVICE.delete_news(&req, path.0).await
}

pub async fn list_comments(req: HttpRequest, news: SafeNewsIdI64) -> ActixResult<HttpResponse> {
    COMMENT_SERVICE.list_comments(&req, news.0).await
}

pub async fn create_comment(
    req: HttpRequest,
    news: SafeNewsIdI64,
    body: web::Json<CommentRequest>,
) -> ActixResult<HttpResponse> {
    COMMENT_SERVICE
        .create_comment(&req, news.0, body.into_inner())
        .await
}

pub async fn get_comment(
    req: HttpRequest,
    news: SafeNewsIdI64,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    COMMENT_SERVICE.get_comment(&req, news.0, path.0).await
}

pub async fn update_comment(
    req: HttpRequest,
    news: SafeNewsIdI64,
    path: SafeIDI64,
    body: web::Json<CommentRequest>,
) -> ActixResult<HttpResponse> {
    COMMENT_SERVICE
        .update_comment(&req, news.0, path.0, body.into_inner())
        .await
}

pub async fn delete_comment(
    req: HttpRequest,
    news: SafeNewsIdI64,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    COMMENT_SERVICE.delete_comment(&req, news.0, path.0).await
}

// 新闻与评论 - 仅学生
pub fn configure_news_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/news")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/")
                    .route(web::get().to(list_news).wrap(news_policy(Action::List)))
                    .route(
                        web::post()
                            .to(create_news)
                            .wrap(news_policy(Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}/")
                    .route(web::get().to(get_news).wrap(news_policy(Action::Retrieve)))
                    .route(
                        web::put()
                            .to(update_news)
                            .wrap(news_policy(Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_news)
                            .wrap(news_policy(Action::Destroy)),
                    ),
            )
            .service(
                web::resource("/{news_pk}/comments/")
                    .route(
                        web::get()
                            .to(list_comments)
                            .wrap(comment_policy(Action::List)),
                    )
                    .route(
                        web::post()
                            .to(create_comment)
                            .wrap(comment_policy(Action::Create)),
                    ),
            )
            .service(
                web::resource("/{news_pk}/comments/{id}/")
                    .route(
                        web::get()
                            .to(get_comment)
                            .wrap(comment_policy(Action::Retrieve)),
                    )
                    .route(
                        web::put()
                            .to(update_comment)
                            .wrap(comment_policy(Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_comment)
                            .wrap(comment_policy(Action::Destroy)),
                    ),
            ),
    );
}
