use crate::db::schema::articles;
use crate::db::{DbConnection, Store};
use crate::types::*;
use crate::utils::serialize_date;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Text, Timestamptz};
use rocket::serde::json::{self, Json};

/// A full article, as returned by the single-article routes.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = articles)]
pub struct Article {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    #[serde(serialize_with = "serialize_date")]
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,
}

/// Listing row: no `body`, plus the number of comments currently
/// referencing the article.
#[derive(Debug, Clone, PartialEq, QueryableByName, Serialize)]
pub struct ArticleSummary {
    #[diesel(sql_type = Integer)]
    pub article_id: i32,
    #[diesel(sql_type = Text)]
    pub title: String,
    #[diesel(sql_type = Text)]
    pub topic: String,
    #[diesel(sql_type = Text)]
    pub author: String,
    #[diesel(sql_type = Timestamptz)]
    #[serde(serialize_with = "serialize_date")]
    pub created_at: DateTime<Utc>,
    #[diesel(sql_type = Integer)]
    pub votes: i32,
    #[diesel(sql_type = Text)]
    pub article_img_url: String,
    #[diesel(sql_type = BigInt)]
    pub comment_count: i64,
}

impl ArticleSummary {
    pub fn from(article: &Article, comment_count: i64) -> Self {
        ArticleSummary {
            article_id: article.article_id,
            title: article.title.clone(),
            topic: article.topic.clone(),
            author: article.author.clone(),
            created_at: article.created_at,
            votes: article.votes,
            article_img_url: article.article_img_url.clone(),
            comment_count,
        }
    }
}

impl Article {
    pub fn load(id: ResourceId, store: &dyn Store) -> Result<Article, ApiError> {
        store.article(id.0)?.ok_or(ApiError::NotFound(NO_ARTICLE))
    }
}

#[derive(Debug, Serialize)]
pub struct ArticleContainer<T> {
    article: T,
}

#[derive(Debug, Serialize)]
pub struct ArticlesContainer<T> {
    articles: T,
}

#[derive(Debug, Serialize)]
pub struct UpdatedArticleContainer<T> {
    #[serde(rename = "updatedArticle")]
    updated_article: T,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoteUpdate {
    pub inc_votes: i32,
}

#[get("/?<topic>")]
pub fn list(
    conn: DbConnection<'_>,
    topic: Option<&str>,
) -> ApiResult<ArticlesContainer<Vec<ArticleSummary>>> {
    if let Some(slug) = topic {
        if !conn.topic_exists(slug)? {
            return Err(ApiError::NotFound(NO_TOPIC));
        }
    }
    let articles = conn.articles(topic)?;
    Ok(Json(ArticlesContainer { articles }))
}

#[get("/<article_id>")]
pub fn get(
    conn: DbConnection<'_>,
    article_id: Result<ResourceId, ApiError>,
) -> ApiResult<ArticleContainer<Article>> {
    let article = Article::load(article_id?, &*conn)?;
    Ok(Json(ArticleContainer { article }))
}

#[patch("/<article_id>", data = "<update>")]
pub fn update(
    conn: DbConnection<'_>,
    article_id: Result<ResourceId, ApiError>,
    update: Result<Json<VoteUpdate>, json::Error<'_>>,
) -> ApiResult<UpdatedArticleContainer<Article>> {
    let article_id = article_id?;
    let update = update?.into_inner();
    let updated_article = conn
        .increment_article_votes(article_id.0, update.inc_votes)?
        .ok_or(ApiError::NotFound(NO_ARTICLE))?;
    Ok(Json(UpdatedArticleContainer { updated_article }))
}
