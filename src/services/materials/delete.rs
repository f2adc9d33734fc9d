use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MaterialService;
use crate::access::nested::resolve_material;
use crate::access::{Action, Decision, ResourceKind, authorize};
use crate::models::ApiResponse;
use crate::services::common::{current_principal, internal_error, not_found};

pub async fn delete_material(
    service: &MaterialService,
    request: &HttpRequest,
    subject_id: i64,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let (_, material) = match resolve_material(storage.as_ref(), subject_id, material_id).await {
        Ok(resolved) => resolved,
        Err(e) => return Ok(e.into_response()),
    };

    if let Decision::Deny(reason) = authorize(
        Action::Destroy,
        ResourceKind::Material,
        Some(&material),
        Some(&principal),
    ) {
        return Ok(reason.into_response());
    }

    match storage.delete_material(material.id).await {
        Ok(true) => {
            info!("Material {} deleted by user {}", material.id, principal.user_id());
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Material successfully deleted.",
            )))
        }
        Ok(false) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to delete material", e)),
    }
}
