pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::homeworks::requests::{CreateHomeworkRequest, UpdateHomeworkRequest};
use crate::services::notifications::Notifier;
use crate::storage::Storage;
use crate::utils::validate::{FieldErrors, TextRule, check_text};

pub struct HomeworkService {
    storage: Option<Arc<dyn Storage>>,
}

impl HomeworkService {
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

    /// 未注册通知器时跳过通知
    pub(crate) fn get_notifier(&self, request: &HttpRequest) -> Option<Arc<dyn Notifier>> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn Notifier>>>()
            .map(|notifier| notifier.get_ref().clone())
    }

    pub async fn list_homeworks(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_homeworks(self, request).await
    }

    pub async fn create_homework(
        &self,
        request: &HttpRequest,
        req: CreateHomeworkRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_homework(self, request, req).await
    }

    pub async fn get_homework(
        &self,
        request: &HttpRequest,
        homework_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_homework(self, request, homework_id).await
    }

    pub async fn update_homework(
        &self,
        request: &HttpRequest,
        homework_id: i64,
        req: UpdateHomeworkRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_homework(self, request, homework_id, req).await
    }

    pub async fn delete_homework(
        &self,
        request: &HttpRequest,
        homework_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_homework(self, request, homework_id).await
    }
}

/// 作业文本字段校验
pub(crate) fn check_homework_text(
    errors: &mut FieldErrors,
    topic: Option<&str>,
    details: Option<&str>,
    partial: bool,
) {
    check_text(errors, "topic", topic, TextRule::required(60).partial(partial));
    check_text(errors, "details", details, TextRule::blank_ok(256));
}
