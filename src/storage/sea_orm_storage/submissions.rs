//! 作业提交存储操作

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{ElsyserError, Result};
use crate::models::submissions::entities::{
    NewSubmission, Submission, SubmissionChanges, SubmissionListQuery,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建提交
    pub async fn create_submission_impl(&self, req: NewSubmission) -> Result<Submission> {
        let model = ActiveModel {
            homework_id: Set(req.homework_id),
            student_id: Set(req.student_id),
            content: Set(req.content),
            solution_url: Set(req.solution_url.filter(|url| !url.is_empty())),
            checked: Set(false),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("创建提交失败: {e}")))?;

        Ok(result.into_submission())
    }

    pub async fn get_submission_by_id_impl(&self, submission_id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出提交
    pub async fn list_submissions_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<Vec<Submission>> {
        let mut select = Submissions::find();

        if let Some(homework_id) = query.homework_id {
            select = select.filter(Column::HomeworkId.eq(homework_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        let results = select
            .order_by_asc(Column::SubmittedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 更新提交；solution_url 传空串表示清除
    pub async fn update_submission_impl(
        &self,
        submission_id: i64,
        changes: SubmissionChanges,
    ) -> Result<Option<Submission>> {
        if self.get_submission_by_id_impl(submission_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(submission_id),
            ..Default::default()
        };

        if let Some(content) = changes.content {
            model.content = Set(content);
        }
        if let Some(solution_url) = changes.solution_url {
            model.solution_url = Set(Some(solution_url).filter(|url| !url.is_empty()));
        }
        if let Some(checked) = changes.checked {
            model.checked = Set(checked);
        }

        if model.is_changed() {
            model
                .update(&self.db)
                .await
                .map_err(|e| ElsyserError::database_operation(format!("更新提交失败: {e}")))?;
        }

        self.get_submission_by_id_impl(submission_id).await
    }

    pub async fn delete_submission_impl(&self, submission_id: i64) -> Result<bool> {
        let result = Submissions::delete_by_id(submission_id)
            .exec(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("删除提交失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
