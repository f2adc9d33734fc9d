//! 通知存储操作

use super::SeaOrmStorage;
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::{ElsyserError, Result};
use crate::models::notifications::entities::{NewNotification, Notification};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建通知
    pub async fn create_notification_impl(&self, req: NewNotification) -> Result<Notification> {
        let model = ActiveModel {
            user_id: Set(req.user_id),
            notification_type: Set(req.notification_type.to_string()),
            title: Set(req.title),
            content: Set(req.content),
            reference_type: Set(req.reference_type),
            reference_id: Set(req.reference_id),
            is_read: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ElsyserError::notification(format!("创建通知失败: {e}")))?;

        Ok(result.into_notification())
    }

    /// 列出用户通知，最新的在前
    pub async fn list_notifications_by_user_impl(&self, user_id: i64) -> Result<Vec<Notification>> {
        let results = Notifications::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询通知列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_notification()).collect())
    }

    pub async fn count_unread_notifications_impl(&self, user_id: i64) -> Result<u64> {
        Notifications::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("统计未读通知失败: {e}")))
    }

    /// 标记通知为已读，只作用于接收者本人的通知
    pub async fn mark_notification_read_impl(&self, user_id: i64, id: i64) -> Result<bool> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("标记通知已读失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
