use super::SeaOrmStorage;
use crate::entity::exams::{ActiveModel, Column, Entity as Exams};
use crate::errors::{ElsyserError, Result};
use crate::models::exams::{
    entities::{Exam, ExamListQuery, NewExam},
    requests::UpdateExamRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_exam_impl(&self, req: NewExam) -> Result<Exam> {
        let now = chrono::Utc::now().timestamp();

        let result = ActiveModel {
            subject_id: Set(req.subject_id),
            class_id: Set(req.class_id),
            author_id: Set(req.author_id),
            date: Set(req.date),
            topic: Set(req.topic),
            details: Set(req.details),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| ElsyserError::database_operation(format!("创建考试失败: {e}")))?;

        Ok(result.into_exam())
    }

    pub async fn get_exam_by_id_impl(&self, exam_id: i64) -> Result<Option<Exam>> {
        let result = Exams::find_by_id(exam_id)
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询考试失败: {e}")))?;

        Ok(result.map(|m| m.into_exam()))
    }

    /// 列出考试，按日期升序
    pub async fn list_exams_impl(&self, query: ExamListQuery) -> Result<Vec<Exam>> {
        let mut select = Exams::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(not_before) = query.not_before {
            select = select.filter(Column::Date.gte(not_before));
        }

        let results = select
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询考试列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_exam()).collect())
    }

    pub async fn update_exam_impl(
        &self,
        exam_id: i64,
        update: UpdateExamRequest,
    ) -> Result<Option<Exam>> {
        if self.get_exam_by_id_impl(exam_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(exam_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(class_id) = update.clazz {
            model.class_id = Set(class_id);
        }
        if let Some(date) = update.date {
            model.date = Set(date);
        }
        if let Some(topic) = update.topic {
            model.topic = Set(topic);
        }
        if let Some(details) = update.details {
            model.details = Set(details);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("更新考试失败: {e}")))?;

        self.get_exam_by_id_impl(exam_id).await
    }

    pub async fn delete_exam_impl(&self, exam_id: i64) -> Result<bool> {
        let result = Exams::delete_by_id(exam_id)
            .exec(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("删除考试失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
