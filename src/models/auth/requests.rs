use serde::Deserialize;
use ts_rs::TS;

// 学生注册请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct RegisterRequest {
    pub user: Option<RegisterUser>,
    pub clazz: Option<RegisterClass>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct RegisterUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct RegisterClass {
    pub number: Option<i32>,
    pub letter: Option<String>,
}

// 登录请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct LoginRequest {
    /// 用户名或邮箱
    pub email_or_username: Option<String>,
    pub password: Option<String>,
}
