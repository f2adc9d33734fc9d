//! 班级与科目存储操作

use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::subjects::{
    ActiveModel as SubjectActiveModel, Column as SubjectColumn, Entity as Subjects,
};
use crate::errors::{ElsyserError, Result};
use crate::models::{classes::entities::Class, subjects::entities::Subject};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 获取或创建班级
    pub async fn ensure_class_impl(&self, number: i32, letter: &str) -> Result<Class> {
        if let Some(class) = self.get_class_by_number_and_letter_impl(number, letter).await? {
            return Ok(class);
        }

        let model = ActiveModel {
            number: Set(number),
            letter: Set(letter.to_string()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_class())
    }

    pub async fn get_class_by_id_impl(&self, id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    pub async fn get_class_by_number_and_letter_impl(
        &self,
        number: i32,
        letter: &str,
    ) -> Result<Option<Class>> {
        let result = Classes::find()
            .filter(Column::Number.eq(number))
            .filter(Column::Letter.eq(letter))
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 列出班级，按年级、字母排序
    pub async fn list_classes_impl(&self, number: Option<i32>) -> Result<Vec<Class>> {
        let mut select = Classes::find();
        if let Some(number) = number {
            select = select.filter(Column::Number.eq(number));
        }

        let results = select
            .order_by_asc(Column::Number)
            .order_by_asc(Column::Letter)
            .all(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_class()).collect())
    }

    /// 获取或创建科目
    pub async fn ensure_subject_impl(&self, title: &str) -> Result<Subject> {
        let existing = Subjects::find()
            .filter(SubjectColumn::Title.eq(title))
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询科目失败: {e}")))?;

        if let Some(subject) = existing {
            return Ok(subject.into_subject());
        }

        let result = SubjectActiveModel {
            title: Set(title.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| ElsyserError::database_operation(format!("创建科目失败: {e}")))?;

        Ok(result.into_subject())
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn list_subjects_impl(&self) -> Result<Vec<Subject>> {
        let results = Subjects::find()
            .order_by_asc(SubjectColumn::Title)
            .all(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_subject()).collect())
    }
}
