pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::{CreateSubmissionRequest, UpdateSubmissionRequest};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
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

    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        homework_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, homework_id).await
    }

    /// 创建提交
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        homework_id: i64,
        req: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, homework_id, req).await
    }

    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        homework_id: i64,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, homework_id, submission_id).await
    }

    /// 学生修改内容，作业作者批改
    pub async fn update_submission(
        &self,
        request: &HttpRequest,
        homework_id: i64,
        submission_id: i64,
        req: UpdateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_submission(self, request, homework_id, submission_id, req).await
    }

    pub async fn delete_submission(
        &self,
        request: &HttpRequest,
        homework_id: i64,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_submission(self, request, homework_id, submission_id).await
    }
}
