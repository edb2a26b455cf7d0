use crate::article::Article;
use crate::db::schema::comments;
use crate::db::{DbConnection, Store};
use crate::types::*;
use crate::utils::serialize_date;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rocket::response::status::{Created, NoContent};
use rocket::serde::json::{self, Json};

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = comments)]
pub struct Comment {
    pub comment_id: i32,
    pub body: String,
    pub article_id: i32,
    pub author: String,
    pub votes: i32,
    #[serde(serialize_with = "serialize_date")]
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn load(id: ResourceId, store: &dyn Store) -> Result<Comment, ApiError> {
        store.comment(id.0)?.ok_or(ApiError::NotFound(NO_COMMENT))
    }
}

/// Row for `insert_into(comments)`; `votes` and `created_at` come from the
/// column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub struct NewComment {
    pub article_id: i32,
    pub author: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentBody {
    username: String,
    body: String,
}

impl Validate for CommentBody {
    type Error = ApiError;
    fn validate(self, store: &dyn Store) -> Result<Self, ApiError> {
        if self.body.trim().is_empty() {
            return Err(ApiError::BadRequest);
        }
        // an unknown author is the caller's mistake, not a missing resource
        if !store.user_exists(&self.username)? {
            return Err(ApiError::BadRequest);
        }
        Ok(self)
    }
}

#[derive(Debug, Serialize)]
pub struct CommentContainer<T> {
    comment: T,
}

#[derive(Debug, Serialize)]
pub struct CommentsContainer<T> {
    comments: T,
}

#[get("/<article_id>/comments")]
pub fn list(
    conn: DbConnection<'_>,
    article_id: Result<ResourceId, ApiError>,
) -> ApiResult<CommentsContainer<Vec<Comment>>> {
    let article = Article::load(article_id?, &*conn)?;
    let comments = conn.comments_for_article(article.article_id)?;
    Ok(Json(CommentsContainer { comments }))
}

#[post("/<article_id>/comments", data = "<details>")]
pub fn create(
    conn: DbConnection<'_>,
    article_id: Result<ResourceId, ApiError>,
    details: Result<Json<CommentBody>, json::Error<'_>>,
) -> Result<Created<Json<CommentContainer<Comment>>>, ApiError> {
    let article_id = article_id?;
    let details = details?.validate(&*conn)?.into_inner();
    if conn.article(article_id.0)?.is_none() {
        return Err(ApiError::BadRequest);
    }

    let comment = conn.insert_comment(NewComment {
        article_id: article_id.0,
        author: details.username,
        body: details.body,
    })?;

    let location = format!("/api/comments/{}", comment.comment_id);
    Ok(Created::new(location).body(Json(CommentContainer { comment })))
}

#[get("/<comment_id>")]
pub fn get(
    conn: DbConnection<'_>,
    comment_id: Result<ResourceId, ApiError>,
) -> ApiResult<CommentContainer<Comment>> {
    let comment = Comment::load(comment_id?, &*conn)?;
    Ok(Json(CommentContainer { comment }))
}

#[delete("/<comment_id>")]
pub fn delete(
    conn: DbConnection<'_>,
    comment_id: Result<ResourceId, ApiError>,
) -> Result<NoContent, ApiError> {
    let comment_id = comment_id?;
    if conn.delete_comment(comment_id.0)? {
        Ok(NoContent)
    } else {
        Err(ApiError::NotFound(NO_COMMENT))
    }
}
