use crate::article::{Article, ArticleSummary};
use crate::comment::{Comment, NewComment};
use crate::config::Config;
use crate::topic::Topic;
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::ConnectionManager;
use diesel::result::Error as DieselError;
use diesel::sql_types::{Nullable, Text};
use diesel::{delete as diesel_delete, insert_into, select, sql_query, update as diesel_update};
use rocket::http::Status;
use rocket::request::{self, FromRequest, Outcome, Request};
use std::ops::Deref;

pub mod memory;
pub mod schema;
pub mod seed;

use self::schema::{articles, comments, topics, users};

// An alias to the type for a pool of Diesel Postgres connections.
pub type Pool = r2d2::Pool<ConnectionManager<PgConnection>>;

error_chain! {
    foreign_links {
        Var(::std::env::VarError);
        ParseInt(::std::num::ParseIntError);
        R2D2(::r2d2::Error);
        Diesel(DieselError);
    }

    errors {
        VoteOverflow(article_id: i32) {
            description("vote count out of range")
            display("vote count of article {} out of range", article_id)
        }
    }
}

/// Data access used by the request handlers.
///
/// Lookups by id return `Ok(None)` when no row matches; only genuine
/// failures (pool, connection, query) surface as `Err`.
pub trait Store: Send + Sync {
    fn topics(&self) -> Result<Vec<Topic>>;

    fn topic_exists(&self, slug: &str) -> Result<bool>;

    /// Articles without their bodies, newest first, each carrying the live
    /// number of comments that reference it.
    fn articles(&self, topic: Option<&str>) -> Result<Vec<ArticleSummary>>;

    fn article(&self, article_id: i32) -> Result<Option<Article>>;

    /// Adds `inc_votes` to the stored count in one statement and returns the
    /// updated article.
    fn increment_article_votes(&self, article_id: i32, inc_votes: i32)
        -> Result<Option<Article>>;

    /// Comments on one article, newest first.
    fn comments_for_article(&self, article_id: i32) -> Result<Vec<Comment>>;

    fn user_exists(&self, username: &str) -> Result<bool>;

    fn insert_comment(&self, comment: NewComment) -> Result<Comment>;

    fn comment(&self, comment_id: i32) -> Result<Option<Comment>>;

    /// Returns whether a row was removed.
    fn delete_comment(&self, comment_id: i32) -> Result<bool>;
}

/// Request guard handing a handler the managed store.
pub struct DbConnection<'r>(&'r dyn Store);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for DbConnection<'r> {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, ()> {
        match request.rocket().state::<Box<dyn Store>>() {
            Some(store) => Outcome::Success(DbConnection(&**store)),
            None => Outcome::Error((Status::InternalServerError, ())),
        }
    }
}

// For the convenience of using a DbConnection as a &dyn Store.
impl<'r> Deref for DbConnection<'r> {
    type Target = dyn Store + 'r;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

static SELECT_ARTICLE_SUMMARIES: &str = "SELECT articles.article_id,
       articles.title,
       articles.topic,
       articles.author,
       articles.created_at,
       articles.votes,
       articles.article_img_url,
       COUNT(comments.comment_id) AS comment_count
  FROM articles
  LEFT JOIN comments ON comments.article_id = articles.article_id
 WHERE $1::VARCHAR IS NULL OR articles.topic = $1
 GROUP BY articles.article_id
 ORDER BY articles.created_at DESC, articles.article_id DESC;";

/// Postgres-backed store over an r2d2 pool; one pooled connection per call.
pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    pub fn new(pool: Pool) -> Self {
        PgStore { pool }
    }

    pub fn connect(config: &Config) -> Result<Self> {
        Ok(PgStore::new(init_pool(config)?))
    }

    fn conn(&self) -> Result<r2d2::PooledConnection<ConnectionManager<PgConnection>>> {
        Ok(self.pool.get()?)
    }
}

impl Store for PgStore {
    fn topics(&self) -> Result<Vec<Topic>> {
        let mut conn = self.conn()?;
        let rows = topics::table
            .order(topics::slug)
            .select(Topic::as_select())
            .load(&mut conn)?;
        Ok(rows)
    }

    fn topic_exists(&self, slug: &str) -> Result<bool> {
        let mut conn = self.conn()?;
        let found = select(exists(topics::table.filter(topics::slug.eq(slug))))
            .get_result::<bool>(&mut conn)?;
        Ok(found)
    }

    fn articles(&self, topic: Option<&str>) -> Result<Vec<ArticleSummary>> {
        let mut conn = self.conn()?;
        let rows = sql_query(SELECT_ARTICLE_SUMMARIES)
            .bind::<Nullable<Text>, _>(topic)
            .load::<ArticleSummary>(&mut conn)?;
        Ok(rows)
    }

    fn article(&self, article_id: i32) -> Result<Option<Article>> {
        let mut conn = self.conn()?;
        let row = articles::table
            .find(article_id)
            .select(Article::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row)
    }

    fn increment_article_votes(
        &self,
        article_id: i32,
        inc_votes: i32,
    ) -> Result<Option<Article>> {
        let mut conn = self.conn()?;
        let row = diesel_update(articles::table.find(article_id))
            .set(articles::votes.eq(articles::votes + inc_votes))
            .returning(Article::as_returning())
            .get_result(&mut conn)
            .optional()?;
        Ok(row)
    }

    fn comments_for_article(&self, article_id: i32) -> Result<Vec<Comment>> {
        let mut conn = self.conn()?;
        let rows = comments::table
            .filter(comments::article_id.eq(article_id))
            .order((comments::created_at.desc(), comments::comment_id.desc()))
            .select(Comment::as_select())
            .load(&mut conn)?;
        Ok(rows)
    }

    fn user_exists(&self, username: &str) -> Result<bool> {
        let mut conn = self.conn()?;
        let found = select(exists(users::table.filter(users::username.eq(username))))
            .get_result::<bool>(&mut conn)?;
        Ok(found)
    }

    fn insert_comment(&self, comment: NewComment) -> Result<Comment> {
        let mut conn = self.conn()?;
        let row = insert_into(comments::table)
            .values(&comment)
            .returning(Comment::as_returning())
            .get_result(&mut conn)?;
        Ok(row)
    }

    fn comment(&self, comment_id: i32) -> Result<Option<Comment>> {
        let mut conn = self.conn()?;
        let row = comments::table
            .find(comment_id)
            .select(Comment::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row)
    }

    fn delete_comment(&self, comment_id: i32) -> Result<bool> {
        let mut conn = self.conn()?;
        let removed = diesel_delete(comments::table.find(comment_id)).execute(&mut conn)?;
        Ok(removed > 0)
    }
}

pub fn init_pool(config: &Config) -> Result<Pool> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
    let pool = Pool::builder()
        .max_size(config.pool_size)
        .build(manager)?;
    log::info!("database pool ready ({} connections)", config.pool_size);
    Ok(pool)
}
