use super::seed::SeedData;
use super::{ErrorKind, Result, Store};
use crate::article::{Article, ArticleSummary};
use crate::comment::{Comment, NewComment};
use crate::topic::Topic;
use chrono::Utc;
use parking_lot::RwLock;

#[derive(Debug, Default)]
struct Tables {
    topics: Vec<Topic>,
    usernames: Vec<String>,
    articles: Vec<Article>,
    comments: Vec<Comment>,
    last_comment_id: i32,
}

/// In-process store with the same observable behaviour as `PgStore`.
///
/// Every operation takes the lock once, so increments and inserts are
/// atomic with respect to concurrent requests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Loads `data` the way the Postgres seed does: ids are assigned from 1
    /// in insertion order.
    pub fn seeded(data: &SeedData) -> Self {
        let articles = data
            .articles
            .iter()
            .zip(1..)
            .map(|(article, article_id)| Article {
                article_id,
                title: article.title.clone(),
                topic: article.topic.clone(),
                author: article.author.clone(),
                body: article.body.clone(),
                created_at: article.created_at,
                votes: article.votes,
                article_img_url: article.article_img_url.clone(),
            })
            .collect();
        let comments: Vec<Comment> = data
            .comments
            .iter()
            .zip(1..)
            .map(|(comment, comment_id)| Comment {
                comment_id,
                body: comment.body.clone(),
                article_id: comment.article_id,
                author: comment.author.clone(),
                votes: comment.votes,
                created_at: comment.created_at,
            })
            .collect();
        let tables = Tables {
            topics: data.topics.clone(),
            usernames: data.users.iter().map(|u| u.username.clone()).collect(),
            articles,
            last_comment_id: comments.len() as i32,
            comments,
        };
        MemoryStore {
            tables: RwLock::new(tables),
        }
    }
}

impl Store for MemoryStore {
    fn topics(&self) -> Result<Vec<Topic>> {
        let mut topics = self.tables.read().topics.clone();
        topics.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(topics)
    }

    fn topic_exists(&self, slug: &str) -> Result<bool> {
        Ok(self.tables.read().topics.iter().any(|t| t.slug == slug))
    }

    fn articles(&self, topic: Option<&str>) -> Result<Vec<ArticleSummary>> {
        let tables = self.tables.read();
        let mut summaries: Vec<ArticleSummary> = tables
            .articles
            .iter()
            .filter(|a| topic.map_or(true, |slug| a.topic == slug))
            .map(|article| {
                let count = tables
                    .comments
                    .iter()
                    .filter(|c| c.article_id == article.article_id)
                    .count();
                ArticleSummary::from(article, count as i64)
            })
            .collect();
        summaries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.article_id.cmp(&a.article_id))
        });
        Ok(summaries)
    }

    fn article(&self, article_id: i32) -> Result<Option<Article>> {
        let tables = self.tables.read();
        Ok(tables
            .articles
            .iter()
            .find(|a| a.article_id == article_id)
            .cloned())
    }

    fn increment_article_votes(
        &self,
        article_id: i32,
        inc_votes: i32,
    ) -> Result<Option<Article>> {
        let mut tables = self.tables.write();
        let article = match tables
            .articles
            .iter_mut()
            .find(|a| a.article_id == article_id)
        {
            Some(article) => article,
            None => return Ok(None),
        };
        article.votes = article
            .votes
            .checked_add(inc_votes)
            .ok_or(ErrorKind::VoteOverflow(article_id))?;
        Ok(Some(article.clone()))
    }

    fn comments_for_article(&self, article_id: i32) -> Result<Vec<Comment>> {
        let tables = self.tables.read();
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.comment_id.cmp(&a.comment_id))
        });
        Ok(comments)
    }

    fn user_exists(&self, username: &str) -> Result<bool> {
        Ok(self.tables.read().usernames.iter().any(|u| u == username))
    }

    fn insert_comment(&self, comment: NewComment) -> Result<Comment> {
        let mut tables = self.tables.write();
        tables.last_comment_id += 1;
        let comment = Comment {
            comment_id: tables.last_comment_id,
            body: comment.body,
            article_id: comment.article_id,
            author: comment.author,
            votes: 0,
            created_at: Utc::now(),
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    fn comment(&self, comment_id: i32) -> Result<Option<Comment>> {
        let tables = self.tables.read();
        Ok(tables
            .comments
            .iter()
            .find(|c| c.comment_id == comment_id)
            .cloned())
    }

    fn delete_comment(&self, comment_id: i32) -> Result<bool> {
        let mut tables = self.tables.write();
        let before = tables.comments.len();
        tables.comments.retain(|c| c.comment_id != comment_id);
        Ok(tables.comments.len() < before)
    }
}
