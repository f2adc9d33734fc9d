use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::access::{Action, ResourceKind};
use crate::middlewares::{self, RequirePolicy};
use crate::models::materials::requests::{CreateMaterialRequest, UpdateMaterialRequest};
use crate::services::MaterialService;
use crate::utils::{SafeIDI64, SafeSubjectIdI64};

static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

fn material_policy(action: Action) -> RequirePolicy {
    RequirePolicy::new(ResourceKind::Material, action)
}

// 所有科目的资料
pub async fn list_all_materials(req: HttpRequest) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.list_all_materials(&req).await
}

pub async fn list_subject_materials(
    req: HttpRequest,
    subject: SafeSubjectIdI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .list_subject_materials(&req, subject.0)
        .await
}

pub async fn create_material(
    req: HttpRequest,
    subject: SafeSubjectIdI64,
    body: web::Json<CreateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .create_material(&req, subject.0, body.into_inner())
        .await
}

pub async fn get_material(
    req: HttpRequest,
    subject: SafeSubjectIdI64,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .get_material(&req, subject.0, path.0)
        .await
}

pub async fn update_material(
    req: HttpRequest,
    subject: SafeSubjectIdI64,
    path: SafeIDI64,
    body: web::Json<UpdateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .update_material(&req, subject.0, path.0, body.into_inner())
        .await
}

pub async fn delete_material(
    req: HttpRequest,
    subject: SafeSubjectIdI64,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .delete_material(&req, subject.0, path.0)
        .await
}

pub fn configure_materials_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/materials/")
            .wrap(middlewares::RequireJWT)
            .route(
                web::get()
                    .to(list_all_materials)
                    .wrap(material_policy(Action::List)),
            ),
    );
}

// 挂在 `/subjects` 作用域下
pub fn configure_subject_material_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{subject_pk}/materials/")
            .route(
                web::get()
                    .to(list_subject_materials)
                    .wrap(material_policy(Action::List)),
            )
            .route(
                web::post()
                    .to(create_material)
                    .wrap(material_policy(Action::Create)),
            ),
    )
    .service(
        web::resource("/{subject_pk}/materials/{id}/")
            .route(
                web::get()
                    .to(get_material)
                    .wrap(material_policy(Action::Retrieve)),
            )
            .route(
                web::put()
                    .to(update_material)
                    .wrap(material_policy(Action::Update)),
            )
            .route(
                web::delete()
                    .to(delete_material)
                    .wrap(material_policy(Action::Destroy)),
            ),
    );
}
