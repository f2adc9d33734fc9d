//! 端到端接口场景：内存 SQLite + moka 缓存 + 记录型通知器

use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::{Days, Utc};
use serde_json::{Value, json};

use rust_elsyser_next::cache::{CacheResult, MokaCacheWrapper, ObjectCache};
use rust_elsyser_next::errors::Result;
use rust_elsyser_next::models::ErrorCode;
use rust_elsyser_next::middlewares::require_jwt::principal_cache_key;
use rust_elsyser_next::models::homeworks::entities::Homework;
use rust_elsyser_next::models::notifications::entities::{NewNotification, NotificationType};
use rust_elsyser_next::models::profiles::entities::{Student, Teacher};
use rust_elsyser_next::models::users::entities::{NewUser, User};
use rust_elsyser_next::routes;
use rust_elsyser_next::services::Notifier;
use rust_elsyser_next::storage::Storage;
use rust_elsyser_next::storage::sea_orm_storage::SeaOrmStorage;
use rust_elsyser_next::utils::{json_error_handler, query_error_handler};

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<(i64, i64)>>,
}

impl RecordingNotifier {
    fn sent(&self) -> Vec<(i64, i64)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_creation_email(&self, recipient: &User, homework: &Homework) -> Result<()> {
        self.sent.lock().unwrap().push((recipient.id, homework.id));
        Ok(())
    }
}

struct Fixture {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
    recorder: Arc<RecordingNotifier>,
}

impl Fixture {
    async fn new() -> Self {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await.unwrap());
        Self {
            storage,
            cache: Arc::new(MokaCacheWrapper::new(1000, 60)),
            recorder: Arc::new(RecordingNotifier::default()),
        }
    }

    fn new_user(first_name: &str, last_name: &str) -> NewUser {
        NewUser {
            username: User::username_from_names(first_name, last_name),
            email: format!("{}.{}@school.test", first_name, last_name).to_lowercase(),
            password_hash: "unused".to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }

    async fn teacher(&self, first_name: &str, last_name: &str, subject: &str) -> (Teacher, String) {
        let subject = self.storage.ensure_subject(subject).await.unwrap();
        let teacher = self
            .storage
            .create_teacher_account(Self::new_user(first_name, last_name), subject.id)
            .await
            .unwrap();
        let token = teacher.user.generate_access_token().unwrap();
        (teacher, token)
    }

    async fn student(
        &self,
        first_name: &str,
        last_name: &str,
        number: i32,
        letter: &str,
    ) -> (Student, String) {
        let class = self.storage.ensure_class(number, letter).await.unwrap();
        let student = self
            .storage
            .create_student_account(Self::new_user(first_name, last_name), class.id)
            .await
            .unwrap();
        let token = student.user.generate_access_token().unwrap();
        (student, token)
    }
}

macro_rules! init_app {
    ($fixture:expr) => {{
        let notifier: Arc<dyn Notifier> = $fixture.recorder.clone();
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($fixture.storage.clone()))
                .app_data(web::Data::new($fixture.cache.clone()))
                .app_data(web::Data::new(notifier))
                .configure(routes::configure_routes),
        )
        .await
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

async fn call_json<S, R, B, E>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = E>,
    B: MessageBody,
    E: std::fmt::Debug,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

fn day_offset(days: i64) -> String {
    let today = Utc::now().date_naive();
    let date = if days >= 0 {
        today.checked_add_days(Days::new(days as u64))
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    date.unwrap().format("%Y-%m-%d").to_string()
}

#[actix_web::test]
async fn test_register_rejects_short_password_with_flat_errors() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);

    let req = test::TestRequest::post()
        .uri("/students/register/")
        .set_json(json!({
            "user": {
                "first_name": "Ivan",
                "last_name": "Petrov",
                "email": "ivan@school.test",
                "password": "123"
            },
            "clazz": { "number": 10, "letter": "A" }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["password"], json!(["Password too short."]));
}

#[actix_web::test]
async fn test_register_login_round_trip_and_duplicate_email() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);

    let payload = json!({
        "user": {
            "first_name": "Ivan",
            "last_name": "Petrov",
            "email": "ivan@school.test",
            "password": "secret123"
        },
        "clazz": { "number": 10, "letter": "A" }
    });

    let req = test::TestRequest::post()
        .uri("/students/register/")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["username"], "Ivan_Petrov");
    assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));

    let req = test::TestRequest::post()
        .uri("/students/login/")
        .set_json(json!({ "email_or_username": "ivan@school.test", "password": "secret123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["is_teacher"], false);

    let req = test::TestRequest::post()
        .uri("/students/login/")
        .set_json(json!({ "email_or_username": "Ivan_Petrov", "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["data"]["non_field_errors"],
        json!(["Unable to log in with provided credentials."])
    );

    let req = test::TestRequest::post()
        .uri("/students/register/")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["data"]["email"],
        json!(["Student with this email already exists."])
    );
}

#[actix_web::test]
async fn test_missing_token_and_wrong_role() {
    let fixture = Fixture::new().await;
    let (_, student_token) = fixture.student("Ana", "Ivanova", 10, "A").await;
    let app = init_app!(fixture);

    let req = test::TestRequest::get().uri("/homeworks/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/homeworks/")
        .insert_header(bearer(&student_token))
        .set_json(json!({ "topic": "Essay", "clazz": 1, "deadline": day_offset(3) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_only_author_can_edit_homework() {
    let fixture = Fixture::new().await;
    let (_, author_token) = fixture.teacher("Maria", "Ivanova", "Mathematics").await;
    let (_, other_token) = fixture.teacher("Petar", "Georgiev", "Physics").await;
    let (student, _) = fixture.student("Ana", "Ivanova", 10, "A").await;
    let app = init_app!(fixture);

    let req = test::TestRequest::post()
        .uri("/homeworks/")
        .insert_header(bearer(&author_token))
        .set_json(json!({
            "topic": "Fractions",
            "clazz": student.clazz.id,
            "deadline": day_offset(5),
            "details": "Exercises 1-10"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let homework_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["clazz"], student.clazz.id);

    // 读取时关联对象展开
    let req = test::TestRequest::get()
        .uri(&format!("/homeworks/{homework_id}/"))
        .insert_header(bearer(&author_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["topic"], "Fractions");
    assert_eq!(body["data"]["details"], "Exercises 1-10");
    assert_eq!(body["data"]["clazz"]["id"], student.clazz.id);
    assert_eq!(body["data"]["subject"]["title"], "Mathematics");

    let req = test::TestRequest::put()
        .uri(&format!("/homeworks/{homework_id}/"))
        .insert_header(bearer(&other_token))
        .set_json(json!({ "topic": "Hijacked" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::NotOwner as i32);
    assert_eq!(body["message"], "You can edit only your own homeworks.");

    let homework = fixture
        .storage
        .get_homework_by_id(homework_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(homework.topic, "Fractions");

    let req = test::TestRequest::put()
        .uri(&format!("/homeworks/{homework_id}/"))
        .insert_header(bearer(&author_token))
        .set_json(json!({ "topic": "Fractions and decimals" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["topic"], "Fractions and decimals");
}

#[actix_web::test]
async fn test_homework_list_hides_past_deadlines() {
    let fixture = Fixture::new().await;
    let (_, teacher_token) = fixture.teacher("Maria", "Ivanova", "Mathematics").await;
    let (student, student_token) = fixture.student("Ana", "Ivanova", 10, "A").await;
    let app = init_app!(fixture);

    for (topic, offset) in [("Yesterday", -1), ("Today", 0), ("Tomorrow", 1)] {
        let req = test::TestRequest::post()
            .uri("/homeworks/")
            .insert_header(bearer(&teacher_token))
            .set_json(json!({
                "topic": topic,
                "clazz": student.clazz.id,
                "deadline": day_offset(offset)
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/homeworks/")
        .insert_header(bearer(&student_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let mut topics: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|item| item["topic"].as_str())
        .collect();
    topics.sort_unstable();
    assert_eq!(topics, vec!["Today", "Tomorrow"]);
}

#[actix_web::test]
async fn test_homework_creation_notifies_class() {
    let fixture = Fixture::new().await;
    let (_, teacher_token) = fixture.teacher("Maria", "Ivanova", "Mathematics").await;
    let (first, _) = fixture.student("Ana", "Ivanova", 10, "A").await;
    let (second, _) = fixture.student("Boris", "Petrov", 10, "A").await;
    fixture.student("Vera", "Koleva", 11, "B").await;
    let app = init_app!(fixture);

    let req = test::TestRequest::post()
        .uri("/homeworks/")
        .insert_header(bearer(&teacher_token))
        .set_json(json!({
            "topic": "Equations",
            "clazz": first.clazz.id,
            "deadline": day_offset(2)
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let homework_id = body["data"]["id"].as_i64().unwrap();

    // 通知在独立任务中发送
    for _ in 0..50 {
        if fixture.recorder.sent().len() >= 2 {
            break;
        }
        actix_web::rt::time::sleep(Duration::from_millis(20)).await;
    }

    let mut sent = fixture.recorder.sent();
    sent.sort();
    let mut expected = vec![(first.user.id, homework_id), (second.user.id, homework_id)];
    expected.sort();
    assert_eq!(sent, expected);
}

#[actix_web::test]
async fn test_news_is_scoped_to_class_and_comments_are_nested() {
    let fixture = Fixture::new().await;
    let (_, author_token) = fixture.student("Ana", "Ivanova", 10, "A").await;
    let (_, classmate_token) = fixture.student("Boris", "Petrov", 10, "A").await;
    let (_, outsider_token) = fixture.student("Vera", "Koleva", 11, "V").await;
    let app = init_app!(fixture);

    let mut news_ids = Vec::new();
    for title in ["Trip to the museum", "Sports day"] {
        let req = test::TestRequest::post()
            .uri("/news/")
            .insert_header(bearer(&author_token))
            .set_json(json!({ "title": title, "content": "Details will follow." }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        news_ids.push(body["data"]["id"].as_i64().unwrap());
    }

    // 其他班级看不到
    let req = test::TestRequest::get()
        .uri("/news/")
        .insert_header(bearer(&outsider_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"], json!([]));

    let req = test::TestRequest::get()
        .uri("/news/")
        .insert_header(bearer(&classmate_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));

    let req = test::TestRequest::get()
        .uri(&format!("/news/{}/", news_ids[0]))
        .insert_header(bearer(&outsider_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri(&format!("/news/{}/comments/", news_ids[0]))
        .insert_header(bearer(&classmate_token))
        .set_json(json!({ "content": "Count me in!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let comment_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/news/{}/comments/{comment_id}/", news_ids[0]))
        .insert_header(bearer(&author_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 评论不属于该新闻
    let req = test::TestRequest::get()
        .uri(&format!("/news/{}/comments/{comment_id}/", news_ids[1]))
        .insert_header(bearer(&author_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 只能删除自己的评论
    let req = test::TestRequest::delete()
        .uri(&format!("/news/{}/comments/{comment_id}/", news_ids[0]))
        .insert_header(bearer(&author_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(
        fixture
            .storage
            .get_comment_by_id(comment_id)
            .await
            .unwrap()
            .is_some()
    );
}

#[actix_web::test]
async fn test_grades_are_private_to_the_student() {
    let fixture = Fixture::new().await;
    let (teacher, teacher_token) = fixture.teacher("Maria", "Ivanova", "Mathematics").await;
    let (ana, ana_token) = fixture.student("Ana", "Ivanova", 10, "A").await;
    let (_, boris_token) = fixture.student("Boris", "Petrov", 10, "A").await;
    let app = init_app!(fixture);
    let subject_id = teacher.subject.id;

    let req = test::TestRequest::post()
        .uri(&format!("/subjects/{subject_id}/students/{}/grades/", ana.user.id))
        .insert_header(bearer(&teacher_token))
        .set_json(json!({ "value": 7.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(&format!("/subjects/{subject_id}/students/{}/grades/", ana.user.id))
        .insert_header(bearer(&teacher_token))
        .set_json(json!({ "value": 5.5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri(&format!("/subjects/{subject_id}/students/{}/grades/", ana.user.id))
        .insert_header(bearer(&ana_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::get()
        .uri(&format!("/subjects/{subject_id}/students/{}/grades/", ana.user.id))
        .insert_header(bearer(&boris_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri(&format!("/subjects/{subject_id}/grades/"))
        .insert_header(bearer(&boris_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"], json!([]));
}

#[actix_web::test]
async fn test_materials_are_nested_under_subject_and_owned() {
    let fixture = Fixture::new().await;
    let (author, author_token) = fixture.teacher("Maria", "Ivanova", "Mathematics").await;
    let (physics, physics_token) = fixture.teacher("Petar", "Georgiev", "Physics").await;
    let app = init_app!(fixture);
    let math_id = author.subject.id;
    let physics_id = physics.subject.id;

    let req = test::TestRequest::post()
        .uri(&format!("/subjects/{math_id}/materials/"))
        .insert_header(bearer(&author_token))
        .set_json(json!({
            "title": "Quadratic equations",
            "section": "Algebra",
            "content": "Discriminant and roots.",
            "class_number": 10
        }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let material_id = body["data"]["id"].as_i64().unwrap();

    // 挂在其他科目下
    let req = test::TestRequest::get()
        .uri(&format!("/subjects/{physics_id}/materials/{material_id}/"))
        .insert_header(bearer(&author_token))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/subjects/{math_id}/materials/{material_id}/"))
        .insert_header(bearer(&author_token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Quadratic equations");

    let req = test::TestRequest::delete()
        .uri(&format!("/subjects/{math_id}/materials/{material_id}/"))
        .insert_header(bearer(&physics_token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "You can delete only your own materials.");
    let material = fixture.storage.get_material_by_id(material_id).await.unwrap();
    assert_eq!(material.map(|m| m.title), Some("Quadratic equations".to_string()));

    let req = test::TestRequest::delete()
        .uri(&format!("/subjects/{math_id}/materials/{material_id}/"))
        .insert_header(bearer(&author_token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Material successfully deleted.");
    assert!(
        fixture
            .storage
            .get_material_by_id(material_id)
            .await
            .unwrap()
            .is_none()
    );
}

#[actix_web::test]
async fn test_exam_list_hides_past_dates_and_delete_is_owner_only() {
    let fixture = Fixture::new().await;
    let (_, author_token) = fixture.teacher("Maria", "Ivanova", "Mathematics").await;
    let (_, physics_token) = fixture.teacher("Petar", "Georgiev", "Physics").await;
    let (student, student_token) = fixture.student("Ana", "Ivanova", 10, "A").await;
    let app = init_app!(fixture);

    let mut exam_ids = Vec::new();
    for (topic, offset) in [("Yesterday", -1), ("Today", 0)] {
        let req = test::TestRequest::post()
            .uri("/exams/")
            .insert_header(bearer(&author_token))
            .set_json(json!({
                "topic": topic,
                "clazz": student.clazz.id,
                "date": day_offset(offset)
            }))
            .to_request();
        let (status, body) = call_json(&app, req).await;
        assert_eq!(status, StatusCode::CREATED);
        exam_ids.push(body["data"]["id"].as_i64().unwrap());
    }

    let req = test::TestRequest::get()
        .uri("/exams/")
        .insert_header(bearer(&student_token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let topics: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|item| item["topic"].as_str())
        .collect();
    assert_eq!(topics, vec!["Today"]);

    let today_exam = exam_ids[1];
    let req = test::TestRequest::delete()
        .uri(&format!("/exams/{today_exam}/"))
        .insert_header(bearer(&physics_token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "You can delete only your own exams.");
    assert!(fixture.storage.get_exam_by_id(today_exam).await.unwrap().is_some());

    let req = test::TestRequest::delete()
        .uri(&format!("/exams/{today_exam}/"))
        .insert_header(bearer(&author_token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Exam successfully deleted.");
    assert!(fixture.storage.get_exam_by_id(today_exam).await.unwrap().is_none());
}

#[actix_web::test]
async fn test_only_author_can_edit_news() {
    let fixture = Fixture::new().await;
    let (_, author_token) = fixture.student("Ana", "Ivanova", 10, "A").await;
    let (_, classmate_token) = fixture.student("Boris", "Petrov", 10, "A").await;
    let app = init_app!(fixture);

    let req = test::TestRequest::post()
        .uri("/news/")
        .insert_header(bearer(&author_token))
        .set_json(json!({ "title": "Trip to the museum", "content": "Details will follow." }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let news_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/news/{news_id}/"))
        .insert_header(bearer(&classmate_token))
        .set_json(json!({ "title": "Cancelled" }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "You can edit only your own posts.");

    let news = fixture.storage.get_news_by_id(news_id).await.unwrap().unwrap();
    assert_eq!(news.title, "Trip to the museum");
}

#[actix_web::test]
async fn test_grade_mutations_by_other_subject_teacher_are_rejected() {
    let fixture = Fixture::new().await;
    let (teacher, teacher_token) = fixture.teacher("Maria", "Ivanova", "Mathematics").await;
    let (_, physics_token) = fixture.teacher("Petar", "Georgiev", "Physics").await;
    let (ana, _) = fixture.student("Ana", "Ivanova", 10, "A").await;
    let app = init_app!(fixture);
    let grades_uri = format!(
        "/subjects/{}/students/{}/grades/",
        teacher.subject.id, ana.user.id
    );

    let req = test::TestRequest::post()
        .uri(&grades_uri)
        .insert_header(bearer(&teacher_token))
        .set_json(json!({ "value": 4.5 }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let grade_id = body["data"]["id"].as_i64().unwrap();
    let grade_uri = format!("{grades_uri}{grade_id}/");

    let req = test::TestRequest::put()
        .uri(&grade_uri)
        .insert_header(bearer(&physics_token))
        .set_json(json!({ "value": 2.0 }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "You can edit only your own grades.");

    let req = test::TestRequest::delete()
        .uri(&grade_uri)
        .insert_header(bearer(&physics_token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "You can delete only your own grades.");

    let grade = fixture.storage.get_grade_by_id(grade_id).await.unwrap().unwrap();
    assert_eq!(grade.value, 4.5);

    let req = test::TestRequest::put()
        .uri(&grade_uri)
        .insert_header(bearer(&teacher_token))
        .set_json(json!({ "value": 5.0 }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["value"], 5.0);
}

#[actix_web::test]
async fn test_submissions_are_nested_and_split_by_role() {
    let fixture = Fixture::new().await;
    let (_, teacher_token) = fixture.teacher("Maria", "Ivanova", "Mathematics").await;
    let (ana, ana_token) = fixture.student("Ana", "Ivanova", 10, "A").await;
    let (_, boris_token) = fixture.student("Boris", "Petrov", 10, "A").await;
    let app = init_app!(fixture);

    let mut homework_ids = Vec::new();
    for topic in ["Fractions", "Decimals"] {
        let req = test::TestRequest::post()
            .uri("/homeworks/")
            .insert_header(bearer(&teacher_token))
            .set_json(json!({
                "topic": topic,
                "clazz": ana.clazz.id,
                "deadline": day_offset(3)
            }))
            .to_request();
        let (status, body) = call_json(&app, req).await;
        assert_eq!(status, StatusCode::CREATED);
        homework_ids.push(body["data"]["id"].as_i64().unwrap());
    }
    let submissions_uri = format!("/homeworks/{}/submissions/", homework_ids[0]);

    let req = test::TestRequest::post()
        .uri(&submissions_uri)
        .insert_header(bearer(&ana_token))
        .set_json(json!({
            "content": "All exercises done.",
            "solution_url": "https://example.com/solution"
        }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let submission_id = body["data"]["id"].as_i64().unwrap();
    let submission_uri = format!("{submissions_uri}{submission_id}/");

    // 挂在其他作业下
    let req = test::TestRequest::get()
        .uri(&format!(
            "/homeworks/{}/submissions/{submission_id}/",
            homework_ids[1]
        ))
        .insert_header(bearer(&ana_token))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri(&submission_uri)
        .insert_header(bearer(&boris_token))
        .set_json(json!({ "content": "Overwritten" }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "You can edit only your own submissions.");

    let req = test::TestRequest::delete()
        .uri(&submission_uri)
        .insert_header(bearer(&boris_token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "You can delete only your own submissions.");

    let submission = fixture
        .storage
        .get_submission_by_id(submission_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(submission.content, "All exercises done.");
    assert!(!submission.checked);

    // 作业布置者只能批改
    let req = test::TestRequest::put()
        .uri(&submission_uri)
        .insert_header(bearer(&teacher_token))
        .set_json(json!({ "content": "Rewritten by teacher" }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["data"]["content"],
        json!(["Only the submitting student can change this field."])
    );

    let req = test::TestRequest::put()
        .uri(&submission_uri)
        .insert_header(bearer(&teacher_token))
        .set_json(json!({ "checked": true }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["checked"], true);

    let req = test::TestRequest::delete()
        .uri(&submission_uri)
        .insert_header(bearer(&ana_token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Submission successfully deleted.");
}

#[actix_web::test]
async fn test_profile_update_checks_target_and_evicts_cached_principal() {
    let fixture = Fixture::new().await;
    let (ana, ana_token) = fixture.student("Ana", "Ivanova", 10, "A").await;
    let (boris, _) = fixture.student("Boris", "Petrov", 10, "A").await;
    let app = init_app!(fixture);

    // 不存在的用户先于权限检查返回 404
    let req = test::TestRequest::put()
        .uri("/profile/99999/")
        .insert_header(bearer(&ana_token))
        .set_json(json!({ "info": "Hello" }))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri(&format!("/profile/{}/", boris.user.id))
        .insert_header(bearer(&ana_token))
        .set_json(json!({ "info": "Hello" }))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let key = principal_cache_key(ana.user.id);
    assert!(matches!(
        fixture.cache.get_raw(&key).await,
        CacheResult::Found(_)
    ));

    let req = test::TestRequest::put()
        .uri(&format!("/profile/{}/", ana.user.id))
        .insert_header(bearer(&ana_token))
        .set_json(json!({ "info": "Likes maths." }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["info"], "Likes maths.");

    // 同一用户的其他令牌也不会再读到旧主体
    assert_eq!(fixture.cache.get_raw(&key).await, CacheResult::NotFound);
}

#[actix_web::test]
async fn test_notifications_can_be_marked_read_by_recipient_only() {
    let fixture = Fixture::new().await;
    let (ana, ana_token) = fixture.student("Ana", "Ivanova", 10, "A").await;
    let (_, boris_token) = fixture.student("Boris", "Petrov", 10, "A").await;
    let app = init_app!(fixture);

    let notification = fixture
        .storage
        .create_notification(NewNotification {
            user_id: ana.user.id,
            notification_type: NotificationType::HomeworkCreated,
            title: "New homework: Fractions".to_string(),
            content: None,
            reference_type: Some("homework".to_string()),
            reference_id: Some(1),
        })
        .await
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/notifications/")
        .insert_header(bearer(&ana_token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Query successful.");
    assert_eq!(body["data"]["unread"], 1);

    let read_uri = format!("/notifications/{}/read/", notification.id);
    let req = test::TestRequest::put()
        .uri(&read_uri)
        .insert_header(bearer(&boris_token))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri(&read_uri)
        .insert_header(bearer(&ana_token))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/notifications/")
        .insert_header(bearer(&ana_token))
        .to_request();
    let (_, body) = call_json(&app, req).await;
    assert_eq!(body["data"]["unread"], 0);
    assert_eq!(body["data"]["items"][0]["is_read"], true);
}
