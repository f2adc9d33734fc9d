pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::news::requests::{CreateNewsRequest, UpdateNewsRequest};
use crate::storage::Storage;
use crate::utils::validate::{FieldErrors, TextRule, check_text};

pub struct NewsService {
    storage: Option<Arc<dyn Storage>>,
}

impl NewsService {
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

    pub async fn list_news(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_news(self, request).await
    }

    pub async fn create_news(
        &self,
        request: &HttpRequest,
        req: CreateNewsRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_news(self, request, req).await
    }

    pub async fn get_news(&self, request: &HttpRequest, news_id: i64) -> ActixResult<HttpResponse> {
        detail::get_news(self, request, news_id).await
    }

    pub async fn update_news(
        &self,
        request: &HttpRequest,
        news_id: i64,
        req: UpdateNewsRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_news(self, request, news_id, req).await
    }

    pub async fn delete_news(
        &self,
        request: &HttpRequest,
        news_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_news(self, request, news_id).await
    }
}

pub(crate) fn check_news_text(
    errors: &mut FieldErrors,
    title: Option<&str>,
    content: Option<&str>,
    partial: bool,
) {
    check_text(errors, "title", title, TextRule::between(3, 100).partial(partial));
    check_text(
        errors,
        "content",
        content,
        TextRule::between(5, 10000).partial(partial),
    );
}
