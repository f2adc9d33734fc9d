use serde::Deserialize;
use ts_rs::TS;

/// 更新资料请求，所有字段均可省略
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "profile.ts")]
pub struct UpdateProfileRequest {
    pub user: Option<UpdateProfileUser>,
    pub info: Option<String>,
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "profile.ts")]
pub struct UpdateProfileUser {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}
