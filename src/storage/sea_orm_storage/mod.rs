//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod classes;
mod exams;
mod grades;
mod homeworks;
mod materials;
mod news;
mod notifications;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{ElsyserError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Self::migrate(&db).await?;

        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    /// 单连接内存数据库，连接关闭后数据即丢失
    pub async fn new_in_memory() -> Result<Self> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| ElsyserError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| ElsyserError::database_connection(format!("SQLite 连接失败: {e}")))?;

        let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);
        Self::migrate(&db).await?;

        Ok(Self { db })
    }

    async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("数据库迁移失败: {e}")))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ElsyserError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| ElsyserError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| ElsyserError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ElsyserError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    classes::entities::Class,
    comments::entities::{Comment, NewComment},
    exams::{
        entities::{Exam, ExamListQuery, NewExam},
        requests::UpdateExamRequest,
    },
    grades::entities::{Grade, GradeListQuery, NewGrade},
    homeworks::{
        entities::{Homework, HomeworkListQuery, NewHomework},
        requests::UpdateHomeworkRequest,
    },
    materials::{
        entities::{Material, MaterialListQuery, NewMaterial},
        requests::UpdateMaterialRequest,
    },
    news::{
        entities::{NewNews, News, NewsListQuery},
        requests::UpdateNewsRequest,
    },
    notifications::entities::{NewNotification, Notification},
    profiles::entities::{ProfileChanges, Student, Teacher},
    subjects::entities::Subject,
    submissions::entities::{NewSubmission, Submission, SubmissionChanges, SubmissionListQuery},
    users::entities::{NewUser, User},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_student_account(&self, user: NewUser, class_id: i64) -> Result<Student> {
        self.create_student_account_impl(user, class_id).await
    }

    async fn create_teacher_account(&self, user: NewUser, subject_id: i64) -> Result<Teacher> {
        self.create_teacher_account_impl(user, subject_id).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>> {
        self.get_student_by_user_id_impl(user_id).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_user_id_impl(user_id).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn list_students_by_class(&self, class_id: i64) -> Result<Vec<Student>> {
        self.list_students_by_class_impl(class_id).await
    }

    async fn update_profile(&self, user_id: i64, changes: ProfileChanges) -> Result<bool> {
        self.update_profile_impl(user_id, changes).await
    }

    // 班级与科目模块
    async fn ensure_class(&self, number: i32, letter: &str) -> Result<Class> {
        self.ensure_class_impl(number, letter).await
    }

    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(id).await
    }

    async fn get_class_by_number_and_letter(
        &self,
        number: i32,
        letter: &str,
    ) -> Result<Option<Class>> {
        self.get_class_by_number_and_letter_impl(number, letter)
            .await
    }

    async fn list_classes(&self, number: Option<i32>) -> Result<Vec<Class>> {
        self.list_classes_impl(number).await
    }

    async fn ensure_subject(&self, title: &str) -> Result<Subject> {
        self.ensure_subject_impl(title).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    // 作业模块
    async fn create_homework(&self, homework: NewHomework) -> Result<Homework> {
        self.create_homework_impl(homework).await
    }

    async fn get_homework_by_id(&self, id: i64) -> Result<Option<Homework>> {
        self.get_homework_by_id_impl(id).await
    }

    async fn list_homeworks(&self, query: HomeworkListQuery) -> Result<Vec<Homework>> {
        self.list_homeworks_impl(query).await
    }

    async fn update_homework(
        &self,
        id: i64,
        update: UpdateHomeworkRequest,
    ) -> Result<Option<Homework>> {
        self.update_homework_impl(id, update).await
    }

    async fn delete_homework(&self, id: i64) -> Result<bool> {
        self.delete_homework_impl(id).await
    }

    // 提交模块
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission> {
        self.create_submission_impl(submission).await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn list_submissions(&self, query: SubmissionListQuery) -> Result<Vec<Submission>> {
        self.list_submissions_impl(query).await
    }

    async fn update_submission(
        &self,
        id: i64,
        changes: SubmissionChanges,
    ) -> Result<Option<Submission>> {
        self.update_submission_impl(id, changes).await
    }

    async fn delete_submission(&self, id: i64) -> Result<bool> {
        self.delete_submission_impl(id).await
    }

    // 考试模块
    async fn create_exam(&self, exam: NewExam) -> Result<Exam> {
        self.create_exam_impl(exam).await
    }

    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>> {
        self.get_exam_by_id_impl(id).await
    }

    async fn list_exams(&self, query: ExamListQuery) -> Result<Vec<Exam>> {
        self.list_exams_impl(query).await
    }

    async fn update_exam(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>> {
        self.update_exam_impl(id, update).await
    }

    async fn delete_exam(&self, id: i64) -> Result<bool> {
        self.delete_exam_impl(id).await
    }

    // 学习资料模块
    async fn create_material(&self, material: NewMaterial) -> Result<Material> {
        self.create_material_impl(material).await
    }

    async fn get_material_by_id(&self, id: i64) -> Result<Option<Material>> {
        self.get_material_by_id_impl(id).await
    }

    async fn list_materials(&self, query: MaterialListQuery) -> Result<Vec<Material>> {
        self.list_materials_impl(query).await
    }

    async fn update_material(
        &self,
        id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>> {
        self.update_material_impl(id, update).await
    }

    async fn delete_material(&self, id: i64) -> Result<bool> {
        self.delete_material_impl(id).await
    }

    // 新闻与评论模块
    async fn create_news(&self, news: NewNews) -> Result<News> {
        self.create_news_impl(news).await
    }

    async fn get_news_by_id(&self, id: i64) -> Result<Option<News>> {
        self.get_news_by_id_impl(id).await
    }

    async fn list_news(&self, query: NewsListQuery) -> Result<Vec<News>> {
        self.list_news_impl(query).await
    }

    async fn update_news(&self, id: i64, update: UpdateNewsRequest) -> Result<Option<News>> {
        self.update_news_impl(id, update).await
    }

    async fn delete_news(&self, id: i64) -> Result<bool> {
        self.delete_news_impl(id).await
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment> {
        self.create_comment_impl(comment).await
    }

    async fn get_comment_by_id(&self, id: i64) -> Result<Option<Comment>> {
        self.get_comment_by_id_impl(id).await
    }

    async fn list_comments(&self, news_id: i64) -> Result<Vec<Comment>> {
        self.list_comments_impl(news_id).await
    }

    async fn update_comment(&self, id: i64, content: String) -> Result<Option<Comment>> {
        self.update_comment_impl(id, content).await
    }

    async fn delete_comment(&self, id: i64) -> Result<bool> {
        self.delete_comment_impl(id).await
    }

    // 成绩模块
    async fn create_grade(&self, grade: NewGrade) -> Result<Grade> {
        self.create_grade_impl(grade).await
    }

    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_id_impl(id).await
    }

    async fn list_grades(&self, query: GradeListQuery) -> Result<Vec<Grade>> {
        self.list_grades_impl(query).await
    }

    async fn update_grade(&self, id: i64, value: f64) -> Result<Option<Grade>> {
        self.update_grade_impl(id, value).await
    }

    async fn delete_grade(&self, id: i64) -> Result<bool> {
        self.delete_grade_impl(id).await
    }

    // 通知模块
    async fn create_notification(&self, notification: NewNotification) -> Result<Notification> {
        self.create_notification_impl(notification).await
    }

    async fn list_notifications_by_user(&self, user_id: i64) -> Result<Vec<Notification>> {
        self.list_notifications_by_user_impl(user_id).await
    }

    async fn count_unread_notifications(&self, user_id: i64) -> Result<u64> {
        self.count_unread_notifications_impl(user_id).await
    }

    async fn mark_notification_read(&self, user_id: i64, id: i64) -> Result<bool> {
        self.mark_notification_read_impl(user_id, id).await
    }
}
