pub mod auth;
pub mod classes;
pub mod comments;
pub mod common;
pub mod exams;
pub mod grades;
pub mod homeworks;
pub mod materials;
pub mod news;
pub mod notifications;
pub mod profiles;
pub mod subjects;
pub mod submissions;

pub use auth::AuthService;
pub use classes::ClassService;
pub use comments::CommentService;
pub use exams::ExamService;
pub use grades::GradeService;
pub use homeworks::HomeworkService;
pub use materials::MaterialService;
pub use news::NewsService;
pub use notifications::{NotificationService, Notifier, StorageNotifier};
pub use profiles::ProfileService;
pub use subjects::SubjectService;
pub use submissions::SubmissionService;
