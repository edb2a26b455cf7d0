use crate::db::schema::topics;
use crate::db::DbConnection;
use crate::types::ApiResult;
use diesel::prelude::*;
use rocket::serde::json::Json;

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, Serialize)]
#[diesel(table_name = topics)]
pub struct Topic {
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct TopicsContainer<T> {
    topics: T,
}

#[get("/topics")]
pub fn list(conn: DbConnection<'_>) -> ApiResult<TopicsContainer<Vec<Topic>>> {
    let topics = conn.topics()?;
    Ok(Json(TopicsContainer { topics }))
}
