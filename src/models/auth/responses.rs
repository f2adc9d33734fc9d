use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::classes::entities::Class;

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct RegisterResponse {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub clazz: Class,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct LoginResponse {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub token: String,
    pub is_teacher: bool,
}
