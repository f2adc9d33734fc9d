pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::exams::requests::{CreateExamRequest, UpdateExamRequest};
use crate::storage::Storage;
use crate::utils::validate::{FieldErrors, TextRule, check_text};

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
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

    pub async fn list_exams(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_exams(self, request).await
    }

    pub async fn create_exam(
        &self,
        request: &HttpRequest,
        req: CreateExamRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam(self, request, req).await
    }

    pub async fn get_exam(&self, request: &HttpRequest, exam_id: i64) -> ActixResult<HttpResponse> {
        detail::get_exam(self, request, exam_id).await
    }

    pub async fn update_exam(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        req: UpdateExamRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_exam(self, request, exam_id, req).await
    }

    pub async fn delete_exam(
        &self,
        request: &HttpRequest,
        exam_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_exam(self, request, exam_id).await
    }
}

pub(crate) fn check_exam_text(
    errors: &mut FieldErrors,
    topic: Option<&str>,
    details: Option<&str>,
    partial: bool,
) {
    check_text(errors, "topic", topic, TextRule::required(60).partial(partial));
    check_text(errors, "details", details, TextRule::blank_ok(10000));
}
