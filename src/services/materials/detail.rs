use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::access::nested::resolve_material;
use crate::access::{ResourceKind, scope_filter};
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    materials::{entities::Material, responses::MaterialResponse},
};
use crate::services::common::{RelationLoader, current_principal, internal_error, not_found};

pub(crate) async fn render_material(
    loader: &mut RelationLoader<'_>,
    material: Material,
) -> Result<MaterialResponse> {
    Ok(MaterialResponse {
        id: material.id,
        subject: loader.subject(material.subject_id).await?,
        author: loader.teacher(material.author_id).await?,
        title: material.title,
        section: material.section,
        content: material.content,
        class_number: material.class_number,
        video_url: material.video_url,
    })
}

pub async fn get_material(
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
    if !scope_filter(ResourceKind::Material, &principal).admits(&material) {
        return Ok(not_found());
    }

    let mut loader = RelationLoader::new(storage.as_ref());
    match render_material(&mut loader, material).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Query successful."))),
        Err(e) => Ok(internal_error("Failed to load material relations", e)),
    }
}
