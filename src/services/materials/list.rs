use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use super::detail::render_material;
use crate::access::nested::resolve_subject;
use crate::access::{ResourceKind, scope_filter};
use crate::models::{
    ApiResponse,
    materials::{entities::MaterialListQuery, responses::MaterialResponse},
};
use crate::services::common::{RelationLoader, current_principal, internal_error};

fn empty_list() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        Vec::<MaterialResponse>::new(),
        "Query successful.",
    ))
}

/// 全部资料或某科目下的资料，均经过范围过滤
pub async fn list_materials(
    service: &MaterialService,
    request: &HttpRequest,
    subject_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    if let Some(subject_id) = subject_id
        && let Err(e) = resolve_subject(storage.as_ref(), subject_id).await
    {
        return Ok(e.into_response());
    }

    let filter = scope_filter(ResourceKind::Material, &principal);
    if filter.is_nothing() {
        return Ok(empty_list());
    }

    // 教师只能看到本科目，与路径中的科目取交集
    let scoped_subject = filter.value_for("subject");
    if let (Some(scoped), Some(requested)) = (scoped_subject, subject_id)
        && scoped != requested
    {
        return Ok(empty_list());
    }

    let query = MaterialListQuery {
        subject_id: subject_id.or(scoped_subject),
        class_number: filter
            .value_for("class_number")
            .and_then(|number| i32::try_from(number).ok()),
    };

    let materials = match storage.list_materials(query).await {
        Ok(materials) => materials,
        Err(e) => return Ok(internal_error("Failed to list materials", e)),
    };

    let mut loader = RelationLoader::new(storage.as_ref());
    let mut items = Vec::with_capacity(materials.len());
    for material in materials {
        match render_material(&mut loader, material).await {
            Ok(item) => items.push(item),
            Err(e) => return Ok(internal_error("Failed to load material relations", e)),
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(items, "Query successful.")))
}
