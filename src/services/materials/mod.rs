pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::materials::requests::{CreateMaterialRequest, UpdateMaterialRequest};
use crate::storage::Storage;
use crate::utils::validate::{
    FieldErrors, MSG_REQUIRED, TextRule, check_optional_url, check_text, invalid_choice_message,
};

pub struct MaterialService {
    storage: Option<Arc<dyn Storage>>,
}

impl MaterialService {
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

    pub async fn list_all_materials(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_materials(self, request, None).await
    }

    pub async fn list_subject_materials(
        &self,
        request: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_materials(self, request, Some(subject_id)).await
    }

    pub async fn create_material(
        &self,
        request: &HttpRequest,
        subject_id: i64,
        req: CreateMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_material(self, request, subject_id, req).await
    }

    pub async fn get_material(
        &self,
        request: &HttpRequest,
        subject_id: i64,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_material(self, request, subject_id, material_id).await
    }

    pub async fn update_material(
        &self,
        request: &HttpRequest,
        subject_id: i64,
        material_id: i64,
        req: UpdateMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_material(self, request, subject_id, material_id, req).await
    }

    pub async fn delete_material(
        &self,
        request: &HttpRequest,
        subject_id: i64,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_material(self, request, subject_id, material_id).await
    }
}

/// 资料字段（创建与更新共用）
pub(crate) struct MaterialFields<'a> {
    pub title: Option<&'a str>,
    pub section: Option<&'a str>,
    pub content: Option<&'a str>,
    pub class_number: Option<i32>,
    pub video_url: Option<&'a str>,
}

pub(crate) fn check_material_fields(
    errors: &mut FieldErrors,
    fields: MaterialFields<'_>,
    partial: bool,
) {
    check_text(
        errors,
        "title",
        fields.title,
        TextRule::between(3, 150).partial(partial),
    );
    check_text(
        errors,
        "section",
        fields.section,
        TextRule::between(3, 150).partial(partial),
    );
    check_text(
        errors,
        "content",
        fields.content,
        TextRule::between(5, 10000).partial(partial),
    );

    match fields.class_number {
        Some(number) if !AppConfig::get().school.is_valid_number(number) => {
            errors.add("class_number", invalid_choice_message(number));
        }
        Some(_) => {}
        None if !partial => errors.add("class_number", MSG_REQUIRED),
        None => {}
    }

    check_optional_url(errors, "video_url", fields.video_url);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields<'a>(title: &'a str, class_number: Option<i32>) -> MaterialFields<'a> {
        MaterialFields {
            title: Some(title),
            section: Some("Algebra"),
            content: Some("Linear equations"),
            class_number,
            video_url: None,
        }
    }

    #[test]
    fn test_title_too_short() {
        let mut errors = FieldErrors::new();
        check_material_fields(&mut errors, fields("ab", Some(10)), false);
        assert_eq!(
            errors.into_value(),
            serde_json::json!({ "title": ["Ensure this field has at least 3 characters."] })
        );
    }

    #[test]
    fn test_unknown_class_number() {
        let mut errors = FieldErrors::new();
        check_material_fields(&mut errors, fields("Equations", Some(42)), false);
        assert_eq!(
            errors.into_value()["class_number"][0],
            "\"42\" is not a valid choice."
        );
    }

    #[test]
    fn test_partial_update_skips_missing() {
        let mut errors = FieldErrors::new();
        let partial = MaterialFields {
            title: None,
            section: None,
            content: None,
            class_number: None,
            video_url: Some("not a url"),
        };
        check_material_fields(&mut errors, partial, true);
        assert_eq!(
            errors.into_value(),
            serde_json::json!({ "video_url": ["Enter a valid URL."] })
        );
    }
}
