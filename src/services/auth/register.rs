use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AuthService;
use crate::config::SchoolConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{
        requests::{RegisterClass, RegisterRequest, RegisterUser},
        responses::RegisterResponse,
    },
    users::entities::{NewUser, User},
};
use crate::services::common::{VALIDATION_FAILED_MESSAGE, internal_error, validation_failed};
use crate::utils::password::hash_password;
use crate::utils::validate::{
    FieldErrors, MSG_REQUIRED, TextRule, check_email, check_text, invalid_choice_message,
};

const EMAIL_TAKEN_MESSAGE: &str = "Student with this email already exists.";
const USERNAME_TAKEN_MESSAGE: &str = "A user with that username already exists.";
const PASSWORD_BLANK_MESSAGE: &str = "Password cannot be empty.";
const PASSWORD_TOO_SHORT_MESSAGE: &str = "Password too short.";
const PASSWORD_MIN_LENGTH: usize = 6;

struct ValidRegistration {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    number: i32,
    letter: String,
}

fn validate_user(user: &RegisterUser) -> FieldErrors {
    let mut errors = FieldErrors::new();

    check_text(
        &mut errors,
        "first_name",
        user.first_name.as_deref(),
        TextRule::required(30),
    );
    check_text(
        &mut errors,
        "last_name",
        user.last_name.as_deref(),
        TextRule::required(30),
    );
    check_text(
        &mut errors,
        "email",
        user.email.as_deref(),
        TextRule::required(100),
    );
    if let Some(email) = user.email.as_deref() {
        check_email(&mut errors, "email", email);
    }

    match user.password.as_deref() {
        None => errors.add("password", MSG_REQUIRED),
        Some(password) if password.is_empty() => errors.add("password", PASSWORD_BLANK_MESSAGE),
        Some(password) if password.chars().count() < PASSWORD_MIN_LENGTH => {
            errors.add("password", PASSWORD_TOO_SHORT_MESSAGE)
        }
        Some(_) => {}
    }

    errors
}

fn validate_class(clazz: &RegisterClass, school: &SchoolConfig) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match clazz.number {
        None => errors.add("number", MSG_REQUIRED),
        Some(number) if !school.is_valid_number(number) => {
            errors.add("number", invalid_choice_message(number))
        }
        Some(_) => {}
    }
    match clazz.letter.as_deref() {
        None => errors.add("letter", MSG_REQUIRED),
        Some(letter) if !school.is_valid_letter(letter) => {
            errors.add("letter", invalid_choice_message(letter))
        }
        Some(_) => {}
    }

    errors
}

fn validate(
    req: RegisterRequest,
    school: &SchoolConfig,
) -> Result<ValidRegistration, FieldErrors> {
    let mut errors = FieldErrors::new();

    // 用户字段错误平铺在顶层，班级错误嵌套在 clazz 下
    match &req.user {
        Some(user) => errors = validate_user(user),
        None => errors.add("user", MSG_REQUIRED),
    }
    match &req.clazz {
        Some(clazz) => errors.nest("clazz", validate_class(clazz, school)),
        None => errors.add("clazz", MSG_REQUIRED),
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let (Some(user), Some(clazz)) = (req.user, req.clazz) else {
        return Err(errors);
    };

    Ok(ValidRegistration {
        first_name: user.first_name.unwrap_or_default(),
        last_name: user.last_name.unwrap_or_default(),
        email: user.email.unwrap_or_default(),
        password: user.password.unwrap_or_default(),
        number: clazz.number.unwrap_or_default(),
        letter: clazz.letter.unwrap_or_default(),
    })
}

fn uniqueness_failed(code: ErrorCode, field: &str, message: &str) -> HttpResponse {
    let mut errors = FieldErrors::new();
    errors.add(field, message);

    HttpResponse::BadRequest().json(ApiResponse::error(
        code,
        errors.into_value(),
        VALIDATION_FAILED_MESSAGE,
    ))
}

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 1. 校验请求
    let valid = match validate(register_request, &config.school) {
        Ok(valid) => valid,
        Err(errors) => return Ok(validation_failed(errors)),
    };

    // 2. 唯一性检查
    match storage.get_user_by_email(&valid.email).await {
        Ok(Some(_)) => {
            return Ok(uniqueness_failed(
                ErrorCode::UserEmailAlreadyExists,
                "email",
                EMAIL_TAKEN_MESSAGE,
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check email", e)),
    }

    let username = User::username_from_names(&valid.first_name, &valid.last_name);
    match storage.get_user_by_username(&username).await {
        Ok(Some(_)) => {
            return Ok(uniqueness_failed(
                ErrorCode::UserNameAlreadyExists,
                "username",
                USERNAME_TAKEN_MESSAGE,
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check username", e)),
    }

    // 3. 班级不存在则创建
    let class = match storage.ensure_class(valid.number, &valid.letter).await {
        Ok(class) => class,
        Err(e) => return Ok(internal_error("Failed to resolve class", e)),
    };

    // 4. 哈希密码并创建账号
    let password_hash = match hash_password(&valid.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Failed to hash password", e)),
    };

    let new_user = NewUser {
        username,
        email: valid.email,
        password_hash,
        first_name: valid.first_name,
        last_name: valid.last_name,
    };

    let student = match storage.create_student_account(new_user, class.id).await {
        Ok(student) => student,
        Err(e) => {
            tracing::error!("Failed to create student account: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Registration failed.",
                )),
            );
        }
    };

    // 5. 注册即登录
    let token = match student.user.generate_access_token() {
        Ok(token) => token,
        Err(e) => return Ok(internal_error("Failed to generate JWT token", e)),
    };

    info!(
        "Student {} registered in class {}",
        student.user.username,
        student.clazz.title()
    );

    let response = RegisterResponse {
        id: student.user.id,
        username: student.user.username,
        first_name: student.user.first_name,
        last_name: student.user.last_name,
        email: student.user.email,
        clazz: student.clazz,
        token,
    };

    Ok(HttpResponse::Created().json(ApiResponse::success(response, "Registration successful.")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(password: &str, number: i32) -> RegisterRequest {
        RegisterRequest {
            user: Some(RegisterUser {
                first_name: Some("Ivan".into()),
                last_name: Some("Petrov".into()),
                email: Some("ivan@example.com".into()),
                password: Some(password.into()),
            }),
            clazz: Some(RegisterClass {
                number: Some(number),
                letter: Some("A".into()),
            }),
        }
    }

    #[test]
    fn test_short_password() {
        let errors = validate(request("test", 10), &SchoolConfig::default())
            .err()
            .unwrap();
        assert_eq!(
            errors.into_value(),
            serde_json::json!({ "password": [PASSWORD_TOO_SHORT_MESSAGE] })
        );
    }

    #[test]
    fn test_empty_password() {
        let errors = validate(request("", 10), &SchoolConfig::default())
            .err()
            .unwrap();
        assert_eq!(
            errors.into_value()["password"][0],
            PASSWORD_BLANK_MESSAGE
        );
    }

    #[test]
    fn test_invalid_class_number() {
        let errors = validate(request("123456", 0), &SchoolConfig::default())
            .err()
            .unwrap();
        assert_eq!(
            errors.into_value(),
            serde_json::json!({ "clazz": { "number": ["\"0\" is not a valid choice."] } })
        );
    }

    #[test]
    fn test_valid_request() {
        let valid = validate(request("123456", 10), &SchoolConfig::default()).unwrap();
        assert_eq!(valid.number, 10);
        assert_eq!(valid.letter, "A");
    }
}
