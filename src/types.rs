use crate::db::{self, ErrorKind, Store};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use rocket::http::Status;
use rocket::request::{FromParam, Request};
use rocket::response::{self, Responder};
use rocket::serde::json::{self, Json};

pub trait Validate
where
    Self: Sized,
{
    type Error;
    fn validate(self, store: &dyn Store) -> Result<Self, Self::Error>;
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest,
    NotFound(&'static str),
    Store(db::Error),
}

pub const NO_ARTICLE: &str = "No article found with that id";
pub const NO_COMMENT: &str = "No comment found with that id";
pub const NO_TOPIC: &str = "No topic found with that slug";

impl From<db::Error> for ApiError {
    fn from(err: db::Error) -> ApiError {
        // the referenced article or author vanished between the checks and the insert
        let dangling_reference = matches!(
            *err.kind(),
            ErrorKind::Diesel(DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                _
            ))
        );
        if dangling_reference {
            ApiError::BadRequest
        } else {
            ApiError::Store(err)
        }
    }
}

impl<'a> From<json::Error<'a>> for ApiError {
    fn from(err: json::Error<'a>) -> ApiError {
        log::debug!("rejected request body: {:?}", err);
        ApiError::BadRequest
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

impl ApiError {
    fn status_and_msg(&self) -> (Status, &'static str) {
        match *self {
            ApiError::BadRequest => (Status::BadRequest, "Bad Request"),
            ApiError::NotFound(msg) => (Status::NotFound, msg),
            ApiError::Store(_) => (Status::InternalServerError, "Internal Server Error"),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        if let ApiError::Store(ref err) = self {
            log::error!("store failure on {} {}: {}", req.method(), req.uri(), err);
        }
        let (status, msg) = self.status_and_msg();
        (status, Json(json!({ "msg": msg }))).respond_to(req)
    }
}

impl<T> Validate for Json<T>
where
    T: Validate,
{
    type Error = <T as Validate>::Error;
    fn validate(self, store: &dyn Store) -> Result<Self, Self::Error> {
        let inner = self.into_inner();
        let validated = inner.validate(store)?;
        Ok(Json(validated))
    }
}

/// Numeric path identifier (`article_id`, `comment_id`).
///
/// Only plain ASCII digits that fit a Postgres `INT` are accepted, so a
/// malformed id is rejected before any query is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub i32);

impl<'a> FromParam<'a> for ResourceId {
    type Error = ApiError;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        if param.is_empty() || !param.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ApiError::BadRequest);
        }
        param
            .parse::<i32>()
            .map(ResourceId)
            .map_err(|_| ApiError::BadRequest)
    }
}
