//! 成绩存储操作

use super::SeaOrmStorage;
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::errors::{ElsyserError, Result};
use crate::models::grades::entities::{Grade, GradeListQuery, NewGrade};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_grade_impl(&self, req: NewGrade) -> Result<Grade> {
        let result = ActiveModel {
            subject_id: Set(req.subject_id),
            student_id: Set(req.student_id),
            author_id: Set(req.author_id),
            value: Set(req.value),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| ElsyserError::database_operation(format!("创建成绩失败: {e}")))?;

        Ok(result.into_grade())
    }

    pub async fn get_grade_by_id_impl(&self, grade_id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(grade_id)
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 列出成绩，最新的在前
    pub async fn list_grades_impl(&self, query: GradeListQuery) -> Result<Vec<Grade>> {
        let mut select = Grades::find();

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        let results = select
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_grade()).collect())
    }

    pub async fn update_grade_impl(&self, grade_id: i64, value: f64) -> Result<Option<Grade>> {
        if self.get_grade_by_id_impl(grade_id).await?.is_none() {
            return Ok(None);
        }

        ActiveModel {
            id: Set(grade_id),
            value: Set(value),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| ElsyserError::database_operation(format!("更新成绩失败: {e}")))?;

        self.get_grade_by_id_impl(grade_id).await
    }

    pub async fn delete_grade_impl(&self, grade_id: i64) -> Result<bool> {
        let result = Grades::delete_by_id(grade_id)
            .exec(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("删除成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
