pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::comments::requests::CommentRequest;
use crate::storage::Storage;
use crate::utils::validate::TextRule;

pub struct CommentService {
    storage: Option<Arc<dyn Storage>>,
}

impl CommentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_comments(
        &self,
        request: &HttpRequest,
        news_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_comments(self, request, news_id).await
    }

    pub async fn create_comment(
        &self,
        request: &HttpRequest,
        news_id: i64,
        req: CommentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_comment(self, request, news_id, req).await
    }

    pub async fn get_comment(
        &self,
        request: &HttpRequest,
        news_id: i64,
        comment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_comment(self, request, news_id, comment_id).await
    }

    pub async fn update_comment(
        &self,
        request: &HttpRequest,
        news_id: i64,
        comment_id: i64,
        req: CommentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_comment(self, request, news_id, comment_id, req).await
    }

    pub async fn delete_comment(
        &self,
        request: &HttpRequest,
        news_id: i64,
        comment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_comment(self, request, news_id, comment_id).await
    }
}

pub(crate) const COMMENT_RULE: TextRule = TextRule::required(2048);
