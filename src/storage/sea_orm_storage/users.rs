//! 用户与学生/教师资料存储操作

use super::SeaOrmStorage;
use crate::entity::classes::Entity as Classes;
use crate::entity::students::{
    ActiveModel as StudentActiveModel, Column as StudentColumn, Entity as Students,
    Model as StudentModel,
};
use crate::entity::subjects::Entity as Subjects;
use crate::entity::teachers::{
    ActiveModel as TeacherActiveModel, Column as TeacherColumn, Entity as Teachers,
    Model as TeacherModel,
};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{ElsyserError, Result};
use crate::models::{
    profiles::entities::{DEFAULT_PROFILE_IMAGE_URL, ProfileChanges, Student, Teacher},
    users::entities::{NewUser, User},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 插入用户行
    async fn insert_user<C: ConnectionTrait>(conn: &C, user: NewUser) -> Result<i64> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(user.username),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(conn)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.id)
    }

    /// 创建学生账号
    pub async fn create_student_account_impl(
        &self,
        user: NewUser,
        class_id: i64,
    ) -> Result<Student> {
        let txn = self.db.begin().await?;

        let user_id = Self::insert_user(&txn, user).await?;
        let student = StudentActiveModel {
            user_id: Set(user_id),
            class_id: Set(class_id),
            info: Set(String::new()),
            profile_image_url: Set(DEFAULT_PROFILE_IMAGE_URL.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ElsyserError::database_operation(format!("创建学生资料失败: {e}")))?;

        txn.commit().await?;

        self.load_student(student)
            .await?
            .ok_or_else(|| ElsyserError::not_found(format!("学生资料 {user_id} 不完整")))
    }

    /// 创建教师账号
    pub async fn create_teacher_account_impl(
        &self,
        user: NewUser,
        subject_id: i64,
    ) -> Result<Teacher> {
        let txn = self.db.begin().await?;

        let user_id = Self::insert_user(&txn, user).await?;
        let teacher = TeacherActiveModel {
            user_id: Set(user_id),
            subject_id: Set(subject_id),
            info: Set(String::new()),
            profile_image_url: Set(DEFAULT_PROFILE_IMAGE_URL.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ElsyserError::database_operation(format!("创建教师资料失败: {e}")))?;

        txn.commit().await?;

        self.load_teacher(teacher)
            .await?
            .ok_or_else(|| ElsyserError::not_found(format!("教师资料 {user_id} 不完整")))
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名或邮箱获取用户
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("更新登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 补全学生资料的用户与班级
    async fn load_student(&self, model: StudentModel) -> Result<Option<Student>> {
        let user = Users::find_by_id(model.user_id).one(&self.db).await?;
        let class = Classes::find_by_id(model.class_id).one(&self.db).await?;

        Ok(match (user, class) {
            (Some(user), Some(class)) => Some(model.into_student(user, class)),
            _ => None,
        })
    }

    async fn load_teacher(&self, model: TeacherModel) -> Result<Option<Teacher>> {
        let user = Users::find_by_id(model.user_id).one(&self.db).await?;
        let subject = Subjects::find_by_id(model.subject_id).one(&self.db).await?;

        Ok(match (user, subject) {
            (Some(user), Some(subject)) => Some(model.into_teacher(user, subject)),
            _ => None,
        })
    }

    pub async fn get_student_by_user_id_impl(&self, user_id: i64) -> Result<Option<Student>> {
        let model = Students::find()
            .filter(StudentColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询学生资料失败: {e}")))?;

        match model {
            Some(model) => self.load_student(model).await,
            None => Ok(None),
        }
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let model = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询学生资料失败: {e}")))?;

        match model {
            Some(model) => self.load_student(model).await,
            None => Ok(None),
        }
    }

    pub async fn get_teacher_by_user_id_impl(&self, user_id: i64) -> Result<Option<Teacher>> {
        let model = Teachers::find()
            .filter(TeacherColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询教师资料失败: {e}")))?;

        match model {
            Some(model) => self.load_teacher(model).await,
            None => Ok(None),
        }
    }

    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let model = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询教师资料失败: {e}")))?;

        match model {
            Some(model) => self.load_teacher(model).await,
            None => Ok(None),
        }
    }

    /// 列出班级学生
    pub async fn list_students_by_class_impl(&self, class_id: i64) -> Result<Vec<Student>> {
        let class = match Classes::find_by_id(class_id).one(&self.db).await? {
            Some(class) => class,
            None => return Ok(Vec::new()),
        };

        let rows = Students::find()
            .filter(StudentColumn::ClassId.eq(class_id))
            .order_by_asc(StudentColumn::Id)
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询班级学生失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(student, user)| {
                user.map(|user| student.into_student(user, class.clone()))
            })
            .collect())
    }

    /// 更新用户与资料
    pub async fn update_profile_impl(&self, user_id: i64, changes: ProfileChanges) -> Result<bool> {
        if Users::find_by_id(user_id).one(&self.db).await?.is_none() {
            return Ok(false);
        }

        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().timestamp();

        let mut user = ActiveModel {
            id: Set(user_id),
            updated_at: Set(now),
            ..Default::default()
        };
        if let Some(username) = changes.username {
            user.username = Set(username);
        }
        if let Some(first_name) = changes.first_name {
            user.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = Set(last_name);
        }
        if let Some(email) = changes.email {
            user.email = Set(email);
        }
        user.update(&txn)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("更新用户失败: {e}")))?;

        if changes.info.is_some() || changes.profile_image_url.is_some() {
            let teacher = Teachers::find()
                .filter(TeacherColumn::UserId.eq(user_id))
                .one(&txn)
                .await?;

            // 同时存在时以教师资料为准
            if let Some(teacher) = teacher {
                let mut model: TeacherActiveModel = teacher.into();
                if let Some(info) = changes.info {
                    model.info = Set(info);
                }
                if let Some(url) = changes.profile_image_url {
                    model.profile_image_url = Set(url);
                }
                model.update(&txn).await.map_err(|e| {
                    ElsyserError::database_operation(format!("更新教师资料失败: {e}"))
                })?;
            } else if let Some(student) = Students::find()
                .filter(StudentColumn::UserId.eq(user_id))
                .one(&txn)
                .await?
            {
                let mut model: StudentActiveModel = student.into();
                if let Some(info) = changes.info {
                    model.info = Set(info);
                }
                if let Some(url) = changes.profile_image_url {
                    model.profile_image_url = Set(url);
                }
                model.update(&txn).await.map_err(|e| {
                    ElsyserError::database_operation(format!("更新学生资料失败: {e}"))
                })?;
            }
        }

        txn.commit().await?;
        Ok(true)
    }
}
