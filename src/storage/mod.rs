use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户与资料
    // 创建用户及学生资料（同一事务）
    async fn create_student_account(&self, user: NewUser, class_id: i64) -> Result<Student>;
    // 创建用户及教师资料（同一事务）
    async fn create_teacher_account(&self, user: NewUser, subject_id: i64) -> Result<Teacher>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    // 列出班级学生
    async fn list_students_by_class(&self, class_id: i64) -> Result<Vec<Student>>;
    // 更新用户与其资料，用户不存在时返回 false
    async fn update_profile(&self, user_id: i64, changes: ProfileChanges) -> Result<bool>;

    /// 班级与科目
    // 不存在则创建
    async fn ensure_class(&self, number: i32, letter: &str) -> Result<Class>;
    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>>;
    async fn get_class_by_number_and_letter(
        &self,
        number: i32,
        letter: &str,
    ) -> Result<Option<Class>>;
    // 列出班级，可按年级过滤
    async fn list_classes(&self, number: Option<i32>) -> Result<Vec<Class>>;
    async fn ensure_subject(&self, title: &str) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects(&self) -> Result<Vec<Subject>>;

    /// 作业
    async fn create_homework(&self, homework: NewHomework) -> Result<Homework>;
    async fn get_homework_by_id(&self, id: i64) -> Result<Option<Homework>>;
    async fn list_homeworks(&self, query: HomeworkListQuery) -> Result<Vec<Homework>>;
    async fn update_homework(
        &self,
        id: i64,
        update: UpdateHomeworkRequest,
    ) -> Result<Option<Homework>>;
    async fn delete_homework(&self, id: i64) -> Result<bool>;

    /// 作业提交
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission>;
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    async fn list_submissions(&self, query: SubmissionListQuery) -> Result<Vec<Submission>>;
    async fn update_submission(
        &self,
        id: i64,
        changes: SubmissionChanges,
    ) -> Result<Option<Submission>>;
    async fn delete_submission(&self, id: i64) -> Result<bool>;

    /// 考试
    async fn create_exam(&self, exam: NewExam) -> Result<Exam>;
    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>>;
    async fn list_exams(&self, query: ExamListQuery) -> Result<Vec<Exam>>;
    async fn update_exam(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>>;
    async fn delete_exam(&self, id: i64) -> Result<bool>;

    /// 学习资料
    async fn create_material(&self, material: NewMaterial) -> Result<Material>;
    async fn get_material_by_id(&self, id: i64) -> Result<Option<Material>>;
    async fn list_materials(&self, query: MaterialListQuery) -> Result<Vec<Material>>;
    async fn update_material(
        &self,
        id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>>;
    async fn delete_material(&self, id: i64) -> Result<bool>;

    /// 新闻与评论
    async fn create_news(&self, news: NewNews) -> Result<News>;
    async fn get_news_by_id(&self, id: i64) -> Result<Option<News>>;
    async fn list_news(&self, query: NewsListQuery) -> Result<Vec<News>>;
    async fn update_news(&self, id: i64, update: UpdateNewsRequest) -> Result<Option<News>>;
    async fn delete_news(&self, id: i64) -> Result<bool>;
    async fn create_comment(&self, comment: NewComment) -> Result<Comment>;
    async fn get_comment_by_id(&self, id: i64) -> Result<Option<Comment>>;
    // 列出某条新闻下的评论
    async fn list_comments(&self, news_id: i64) -> Result<Vec<Comment>>;
    async fn update_comment(&self, id: i64, content: String) -> Result<Option<Comment>>;
    async fn delete_comment(&self, id: i64) -> Result<bool>;

    /// 成绩
    async fn create_grade(&self, grade: NewGrade) -> Result<Grade>;
    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>>;
    async fn list_grades(&self, query: GradeListQuery) -> Result<Vec<Grade>>;
    async fn update_grade(&self, id: i64, value: f64) -> Result<Option<Grade>>;
    async fn delete_grade(&self, id: i64) -> Result<bool>;

    /// 通知
    async fn create_notification(&self, notification: NewNotification) -> Result<Notification>;
    async fn list_notifications_by_user(&self, user_id: i64) -> Result<Vec<Notification>>;
    async fn count_unread_notifications(&self, user_id: i64) -> Result<u64>;
    // 未找到或不属于该用户时返回 false
    async fn mark_notification_read(&self, user_id: i64, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
