use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{MaterialFields, MaterialService, check_material_fields};
use crate::access::nested::resolve_subject;
use crate::access::{Action, Decision, DenyReason, FieldSet, ResourceKind, authorize};
use crate::models::{
    ApiResponse,
    materials::{
        entities::NewMaterial, requests::CreateMaterialRequest, responses::MaterialWriteResponse,
    },
};
use crate::services::common::{current_principal, internal_error, validation_failed};
use crate::utils::validate::FieldErrors;

pub async fn create_material(
    service: &MaterialService,
    request: &HttpRequest,
    subject_id: i64,
    req: CreateMaterialRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let subject = match resolve_subject(storage.as_ref(), subject_id).await {
        Ok(subject) => subject,
        Err(e) => return Ok(e.into_response()),
    };

    let Some(teacher) = principal.as_teacher() else {
        return Ok(DenyReason::WrongRole.into_response());
    };

    // 只能在自己的科目下发布
    let draft = FieldSet::default()
        .with("author", teacher.id)
        .with("subject", subject.id);
    if let Decision::Deny(reason) = authorize(
        Action::Create,
        ResourceKind::Material,
        Some(&draft),
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
        false,
    );
    if !errors.is_empty() {
        return Ok(validation_failed(errors));
    }

    let (Some(title), Some(section), Some(content), Some(class_number)) =
        (req.title, req.section, req.content, req.class_number)
    else {
        return Ok(validation_failed(errors));
    };

    let new_material = NewMaterial {
        title,
        section,
        content,
        class_number,
        video_url: req.video_url.filter(|url| !url.is_empty()),
        subject_id: subject.id,
        author_id: teacher.id,
    };

    match storage.create_material(new_material).await {
        Ok(material) => {
            info!(
                "Teacher {} published material {} in {}",
                teacher.user.username, material.id, subject.title
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                MaterialWriteResponse::from(&material),
                "Material successfully created.",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create material", e)),
    }
}
