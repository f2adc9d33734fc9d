use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, profiles::responses::ProfileResponse};
use crate::services::common::{internal_error, not_found};

pub async fn list_class_students(
    service: &ClassService,
    request: &HttpRequest,
    number: i32,
    letter: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let class = match storage.get_class_by_number_and_letter(number, &letter).await {
        Ok(Some(class)) => class,
        Ok(None) => return Ok(not_found()),
        Err(e) => return Ok(internal_error("Failed to load class", e)),
    };

    match storage.list_students_by_class(class.id).await {
        Ok(students) => {
            let items: Vec<ProfileResponse> = students.iter().map(ProfileResponse::from).collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(items, "Query successful.")))
        }
        Err(e) => Ok(internal_error("Failed to list class students", e)),
    }
}
