//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::homeworks::{ActiveModel, Column, Entity as Homeworks};
use crate::errors::{ElsyserError, Result};
use crate::models::homeworks::{
    entities::{Homework, HomeworkListQuery, NewHomework},
    requests::UpdateHomeworkRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_homework_impl(&self, req: NewHomework) -> Result<Homework> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            topic: Set(req.topic),
            subject_id: Set(req.subject_id),
            class_id: Set(req.class_id),
            author_id: Set(req.author_id),
            deadline: Set(req.deadline),
            details: Set(req.details),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_homework())
    }

    /// 通过 ID 获取作业
    pub async fn get_homework_by_id_impl(&self, homework_id: i64) -> Result<Option<Homework>> {
        let result = Homeworks::find_by_id(homework_id)
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_homework()))
    }

    /// 列出作业，按截止日期升序
    pub async fn list_homeworks_impl(&self, query: HomeworkListQuery) -> Result<Vec<Homework>> {
        let mut select = Homeworks::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(not_before) = query.not_before {
            select = select.filter(Column::Deadline.gte(not_before));
        }

        let results = select
            .order_by_asc(Column::Deadline)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_homework()).collect())
    }

    /// 更新作业（作者不可变）
    pub async fn update_homework_impl(
        &self,
        homework_id: i64,
        update: UpdateHomeworkRequest,
    ) -> Result<Option<Homework>> {
        // 先检查作业是否存在
        if self.get_homework_by_id_impl(homework_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(homework_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(topic) = update.topic {
            model.topic = Set(topic);
        }
        if let Some(class_id) = update.clazz {
            model.class_id = Set(class_id);
        }
        if let Some(deadline) = update.deadline {
            model.deadline = Set(deadline);
        }
        if let Some(details) = update.details {
            model.details = Set(details);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("更新作业失败: {e}")))?;

        self.get_homework_by_id_impl(homework_id).await
    }

    /// 删除作业，提交随外键级联删除
    pub async fn delete_homework_impl(&self, homework_id: i64) -> Result<bool> {
        let result = Homeworks::delete_by_id(homework_id)
            .exec(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
