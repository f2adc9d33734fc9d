use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MaterialFields, MaterialService, check_material_fields};
use crate::access::nested::resolve_material;
use crate::access::{Action, Decision, ResourceKind, authorize};
use crate::models::{
    ApiResponse,
    materials::{requests::UpdateMaterialRequest, responses::MaterialWriteResponse},
};
use crate::services::common::{current_principal, internal_error, not_found, validation_failed};
use crate::utils::validate::FieldErrors;

pub async fn update_material(
    service: &MaterialService,
    request: &HttpRequest,
    subject_id: i64,
    material_id: i64,
    req: UpdateMaterialRequest,
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
        Action::Update,
        ResourceKind::Material,
        Some(&material),
        Some(&principal),
    ) {
        return Ok(reason.into_response());
    }

    let mut errors = FieldErrors::new();
    check_material_fields(
        &mut errors,
        MaterialFields {
            title: req.title.as_deref(),
            section: req.section.as_deref(),
            content: req.content.as_deref(),
            class_number: req.class_number,
            video_url: req.video_url.as_deref(),
        },
        true,
    );
    if !errors.is_empty() {
        return Ok(validation_failed(errors));
    }

    match storage.update_material(material.id, req).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MaterialWriteResponse::from(&updated),
            "Material successfully updated.",
        ))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to update material", e)),
    }
}
