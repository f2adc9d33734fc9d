use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NewsService;
use crate::access::nested::resolve_news;
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    comments::{entities::Comment, responses::CommentResponse},
    news::{entities::News, responses::NewsResponse},
};
use crate::services::comments::detail::render_comment;
use crate::services::common::{RelationLoader, current_principal, internal_error};

/// 详情接口附带评论列表
pub(crate) async fn render_news(
    loader: &mut RelationLoader<'_>,
    news: News,
    comments: Option<Vec<Comment>>,
) -> Result<NewsResponse> {
    let comment_set = match comments {
        Some(comments) => {
            let mut rendered: Vec<CommentResponse> = Vec::with_capacity(comments.len());
            for comment in comments {
                rendered.push(render_comment(loader, comment).await?);
            }
            Some(rendered)
        }
        None => None,
    };

    Ok(NewsResponse {
        id: news.id,
        author: loader.student(news.author_id).await?,
        title: news.title,
        content: news.content,
        date: news.created_at,
        comment_set,
    })
}

pub async fn get_news(
    service: &NewsService,
    request: &HttpRequest,
    news_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let news = match resolve_news(storage.as_ref(), &principal, news_id).await {
        Ok(news) => news,
        Err(e) => return Ok(e.into_response()),
    };

    let comments = match storage.list_comments(news.id).await {
        Ok(comments) => comments,
        Err(e) => return Ok(internal_error("Failed to list comments", e)),
    };

    let mut loader = RelationLoader::new(storage.as_ref());
    match render_news(&mut loader, news, Some(comments)).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Query successful."))),
        Err(e) => Ok(internal_error("Failed to load news relations", e)),
    }
}
