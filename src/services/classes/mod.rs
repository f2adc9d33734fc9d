pub mod list;
pub mod students;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassService {
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

    /// 全部班级，按年级分组
    pub async fn list_classes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_grouped_classes(self, request).await
    }

    pub async fn list_classes_by_number(
        &self,
        request: &HttpRequest,
        number: i32,
    ) -> ActixResult<HttpResponse> {
        list::list_classes_by_number(self, request, number).await
    }

    pub async fn list_class_students(
        &self,
        request: &HttpRequest,
        number: i32,
        letter: String,
    ) -> ActixResult<HttpResponse> {
        students::list_class_students(self, request, number, letter).await
    }
}
