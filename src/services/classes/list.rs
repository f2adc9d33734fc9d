use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, classes::responses::GroupedClassesResponse};
use crate::services::common::internal_error;

pub async fn list_grouped_classes(
    service: &ClassService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_classes(None).await {
        Ok(classes) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GroupedClassesResponse::from_classes(classes),
            "Query successful.",
        ))),
        Err(e) => Ok(internal_error("Failed to list classes", e)),
    }
}

pub async fn list_classes_by_number(
    service: &ClassService,
    request: &HttpRequest,
    number: i32,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_classes(Some(number)).await {
        Ok(classes) => Ok(HttpResponse::Ok().json(ApiResponse::success(classes, "Query successful."))),
        Err(e) => Ok(internal_error("Failed to list classes", e)),
    }
}
