//! 新闻与评论存储操作

use super::SeaOrmStorage;
use crate::entity::comments::{
    ActiveModel as CommentActiveModel, Column as CommentColumn, Entity as Comments,
};
use crate::entity::news::{ActiveModel, Column, Entity as NewsEntity, Model as NewsModel};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{ElsyserError, Result};
use crate::models::{
    comments::entities::{Comment, NewComment},
    news::{
        entities::{NewNews, News, NewsListQuery},
        requests::UpdateNewsRequest,
    },
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 补全新闻所属班级（发布者所在班级）
    async fn attach_news_class(&self, model: NewsModel) -> Result<Option<News>> {
        let author = Students::find_by_id(model.author_id)
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询新闻作者失败: {e}")))?;

        Ok(author.map(|author| model.into_news(author.class_id)))
    }

    pub async fn create_news_impl(&self, req: NewNews) -> Result<News> {
        let now = chrono::Utc::now().timestamp();

        let result = ActiveModel {
            title: Set(req.title),
            content: Set(req.content),
            author_id: Set(req.author_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| ElsyserError::database_operation(format!("创建新闻失败: {e}")))?;

        let news_id = result.id;
        self.attach_news_class(result)
            .await?
            .ok_or_else(|| ElsyserError::not_found(format!("新闻 {news_id} 的作者不存在")))
    }

    pub async fn get_news_by_id_impl(&self, news_id: i64) -> Result<Option<News>> {
        let result = NewsEntity::find_by_id(news_id)
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询新闻失败: {e}")))?;

        match result {
            Some(model) => self.attach_news_class(model).await,
            None => Ok(None),
        }
    }

    /// 列出新闻，最新的在前
    pub async fn list_news_impl(&self, query: NewsListQuery) -> Result<Vec<News>> {
        let mut select = NewsEntity::find().find_also_related(Students);

        if let Some(class_id) = query.class_id {
            select = select.filter(StudentColumn::ClassId.eq(class_id));
        }

        let rows = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询新闻列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(news, author)| author.map(|author| news.into_news(author.class_id)))
            .collect())
    }

    pub async fn update_news_impl(
        &self,
        news_id: i64,
        update: UpdateNewsRequest,
    ) -> Result<Option<News>> {
        if self.get_news_by_id_impl(news_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(news_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(content) = update.content {
            model.content = Set(content);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("更新新闻失败: {e}")))?;

        self.get_news_by_id_impl(news_id).await
    }

    /// 删除新闻，评论随外键级联删除
    pub async fn delete_news_impl(&self, news_id: i64) -> Result<bool> {
        let result = NewsEntity::delete_by_id(news_id)
            .exec(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("删除新闻失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn create_comment_impl(&self, req: NewComment) -> Result<Comment> {
        let now = chrono::Utc::now().timestamp();

        let result = CommentActiveModel {
            news_id: Set(req.news_id),
            posted_by: Set(req.posted_by),
            content: Set(req.content),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| ElsyserError::database_operation(format!("创建评论失败: {e}")))?;

        Ok(result.into_comment())
    }

    pub async fn get_comment_by_id_impl(&self, comment_id: i64) -> Result<Option<Comment>> {
        let result = Comments::find_by_id(comment_id)
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询评论失败: {e}")))?;

        Ok(result.map(|m| m.into_comment()))
    }

    /// 列出新闻评论，按发表顺序
    pub async fn list_comments_impl(&self, news_id: i64) -> Result<Vec<Comment>> {
        let results = Comments::find()
            .filter(CommentColumn::NewsId.eq(news_id))
            .order_by_asc(CommentColumn::CreatedAt)
            .order_by_asc(CommentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询评论列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_comment()).collect())
    }

    pub async fn update_comment_impl(
        &self,
        comment_id: i64,
        content: String,
    ) -> Result<Option<Comment>> {
        if self.get_comment_by_id_impl(comment_id).await?.is_none() {
            return Ok(None);
        }

        CommentActiveModel {
            id: Set(comment_id),
            content: Set(content),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| ElsyserError::database_operation(format!("更新评论失败: {e}")))?;

        self.get_comment_by_id_impl(comment_id).await
    }

    pub async fn delete_comment_impl(&self, comment_id: i64) -> Result<bool> {
        let result = Comments::delete_by_id(comment_id)
            .exec(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("删除评论失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
