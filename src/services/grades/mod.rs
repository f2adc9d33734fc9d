pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grades::entities::{MAX_GRADE, MIN_GRADE};
use crate::models::grades::requests::GradeRequest;
use crate::storage::Storage;
use crate::utils::validate::{FieldErrors, MSG_REQUIRED};

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
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

    pub async fn list_subject_grades(
        &self,
        request: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_subject_grades(self, request, subject_id).await
    }

    pub async fn list_student_grades(
        &self,
        request: &HttpRequest,
        subject_id: i64,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_student_grades(self, request, subject_id, user_id).await
    }

    pub async fn create_grade(
        &self,
        request: &HttpRequest,
        subject_id: i64,
        user_id: i64,
        req: GradeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, request, subject_id, user_id, req).await
    }

    pub async fn get_grade(
        &self,
        request: &HttpRequest,
        subject_id: i64,
        user_id: i64,
        grade_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_grade(self, request, subject_id, user_id, grade_id).await
    }

    pub async fn update_grade(
        &self,
        request: &HttpRequest,
        subject_id: i64,
        user_id: i64,
        grade_id: i64,
        req: GradeRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_grade(self, request, subject_id, user_id, grade_id, req).await
    }

    pub async fn delete_grade(
        &self,
        request: &HttpRequest,
        subject_id: i64,
        user_id: i64,
        grade_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_grade(self, request, subject_id, user_id, grade_id).await
    }
}

/// 成绩取值 2.00 - 6.00
pub(crate) fn check_grade_value(value: Option<f64>) -> Result<f64, FieldErrors> {
    let mut errors = FieldErrors::new();
    match value {
        None => errors.add("value", MSG_REQUIRED),
        Some(value) if value < MIN_GRADE => errors.add(
            "value",
            format!("Ensure this value is greater than or equal to {MIN_GRADE}."),
        ),
        Some(value) if value > MAX_GRADE => errors.add(
            "value",
            format!("Ensure this value is less than or equal to {MAX_GRADE}."),
        ),
        Some(value) => return Ok(value),
    }
    Err(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_bounds() {
        assert_eq!(check_grade_value(Some(2.0)), Ok(2.0));
        assert_eq!(check_grade_value(Some(6.0)), Ok(6.0));
        assert!(check_grade_value(Some(1.99)).is_err());
        assert!(check_grade_value(Some(6.5)).is_err());
    }

    #[test]
    fn test_missing_value() {
        let errors = check_grade_value(None).unwrap_err();
        assert_eq!(
            errors.into_value(),
            serde_json::json!({ "value": [MSG_REQUIRED] })
        );
    }
}
