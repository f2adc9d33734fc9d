pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::profiles::requests::UpdateProfileRequest;
use crate::storage::Storage;

pub struct ProfileService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProfileService {
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

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .map(|cache| cache.get_ref().clone())
    }

    pub async fn get_profile(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_profile(self, request, user_id).await
    }

    pub async fn update_profile(
        &self,
        request: &HttpRequest,
        user_id: i64,
        req: UpdateProfileRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_profile(self, request, user_id, req).await
    }
}
