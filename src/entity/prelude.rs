//! 预导入模块，方便使用

pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::comments::{
    ActiveModel as CommentActiveModel, Entity as Comments, Model as CommentModel,
};
pub use super::exams::{ActiveModel as ExamActiveModel, Entity as Exams, Model as ExamModel};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::homeworks::{
    ActiveModel as HomeworkActiveModel, Entity as Homeworks, Model as HomeworkModel,
};
pub use super::materials::{
    ActiveModel as MaterialActiveModel, Entity as Materials, Model as MaterialModel,
};
pub use super::news::{ActiveModel as NewsActiveModel, Entity as News, Model as NewsModel};
pub use super::notifications::{
    ActiveModel as NotificationActiveModel, Entity as Notifications, Model as NotificationModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
