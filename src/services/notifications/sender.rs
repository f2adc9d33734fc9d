//! 新作业通知
//!
//! 作业创建后在独立任务中逐个通知班级学生，失败只记录日志。

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::models::homeworks::entities::Homework;
use crate::models::notifications::entities::{NewNotification, NotificationType};
use crate::models::users::entities::User;
use crate::storage::Storage;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_creation_email(&self, recipient: &User, homework: &Homework) -> Result<()>;
}

/// 默认实现：写入站内通知
pub struct StorageNotifier {
    storage: Arc<dyn Storage>,
}

impl StorageNotifier {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl Notifier for StorageNotifier {
    async fn send_creation_email(&self, recipient: &User, homework: &Homework) -> Result<()> {
        let notification = self
            .storage
            .create_notification(NewNotification {
                user_id: recipient.id,
                notification_type: NotificationType::HomeworkCreated,
                title: format!("New homework: {}", homework.topic),
                content: Some(format!("Deadline: {}", homework.deadline)),
                reference_type: Some("homework".to_string()),
                reference_id: Some(homework.id),
            })
            .await?;

        debug!(
            "Notification {} queued for {} <{}>",
            notification.id, recipient.username, recipient.email
        );
        Ok(())
    }
}

/// 派发新作业通知，不等待结果
pub fn dispatch_homework_created(
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
    homework: Homework,
) {
    actix_web::rt::spawn(async move {
        let students = match storage.list_students_by_class(homework.class_id).await {
            Ok(students) => students,
            Err(e) => {
                warn!(
                    "Failed to load recipients for homework {}: {}",
                    homework.id, e
                );
                return;
            }
        };

        let mut sent = 0usize;
        for student in &students {
            match notifier.send_creation_email(&student.user, &homework).await {
                Ok(()) => sent += 1,
                Err(e) => warn!(
                    "Failed to notify {} about homework {}: {}",
                    student.user.username, homework.id, e
                ),
            }
        }

        info!(
            "Homework {} notifications sent: {}/{}",
            homework.id,
            sent,
            students.len()
        );
    });
}
