extern crate news;
extern crate rocket;
#[macro_use]
extern crate serde_json;

use news::db::memory::MemoryStore;
use news::db::seed::SeedData;
use rocket::http::{ContentType, Status};
use rocket::local::blocking::{Client, LocalResponse};
use serde_json::Value;

const IMG_URL: &str =
    "https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700";

fn client() -> Client {
    let store = MemoryStore::seeded(&SeedData::test());
    Client::tracked(news::rocket(Box::new(store))).expect("valid rocket instance")
}

fn json_body(response: LocalResponse<'_>) -> Value {
    response.into_json::<Value>().expect("json body")
}

fn get(client: &Client, uri: &str) -> (Status, Value) {
    let response = client.get(uri.to_string()).dispatch();
    (response.status(), json_body(response))
}

fn send(client: &Client, patch: bool, uri: &str, body: Value) -> (Status, Value) {
    let request = if patch {
        client.patch(uri.to_string())
    } else {
        client.post(uri.to_string())
    };
    let response = request
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch();
    (response.status(), json_body(response))
}

fn post(client: &Client, uri: &str, body: Value) -> (Status, Value) {
    send(client, false, uri, body)
}

fn patch(client: &Client, uri: &str, body: Value) -> (Status, Value) {
    send(client, true, uri, body)
}

fn assert_msg(actual: (Status, Value), status: Status, msg: &str) {
    assert_eq!(actual.0, status, "body: {}", actual.1);
    assert_eq!(actual.1, json!({ "msg": msg }));
}

fn assert_sorted_newest_first(items: &[Value]) {
    let dates: Vec<&str> = items
        .iter()
        .map(|item| item["created_at"].as_str().expect("created_at string"))
        .collect();
    assert!(
        dates.windows(2).all(|pair| pair[0] >= pair[1]),
        "not sorted: {:?}",
        dates
    );
}

fn assert_full_article(article: &Value) {
    assert!(article["author"].is_string());
    assert!(article["title"].is_string());
    assert!(article["article_id"].is_number());
    assert!(article["body"].is_string());
    assert!(article["topic"].is_string());
    assert!(article["created_at"].is_string());
    assert!(article["votes"].is_number());
    assert!(article["article_img_url"].is_string());
}

fn assert_comment_shape(comment: &Value) {
    assert!(comment["comment_id"].is_number());
    assert!(comment["votes"].is_number());
    assert!(comment["created_at"].is_string());
    assert!(comment["author"].is_string());
    assert!(comment["body"].is_string());
    assert!(comment["article_id"].is_number());
}

fn comment_count(client: &Client, article_id: i64) -> i64 {
    let (_, body) = get(client, "/api/articles");
    body["articles"]
        .as_array()
        .expect("articles array")
        .iter()
        .find(|a| a["article_id"] == article_id)
        .and_then(|a| a["comment_count"].as_i64())
        .expect("article listed")
}

mod routing {
    use super::*;

    #[test]
    fn unknown_route_is_not_found() {
        let client = client();
        assert_msg(
            get(&client, "/this-route-will-never-exist"),
            Status::NotFound,
            "Route not found!",
        );
        assert_msg(
            get(&client, "/api/nothing-here"),
            Status::NotFound,
            "Route not found!",
        );
    }

    #[test]
    fn unknown_method_is_not_found() {
        let client = client();
        let response = client.put("/api/topics").dispatch();
        assert_eq!(response.status(), Status::NotFound);
        assert_eq!(json_body(response), json!({ "msg": "Route not found!" }));
    }

    #[test]
    fn endpoints_are_documented() {
        let client = client();
        let (status, body) = get(&client, "/api");
        assert_eq!(status, Status::Ok);
        assert!(body["endpoints"].is_object());
        assert!(body["endpoints"]["GET /api"].is_object());
        assert!(body["endpoints"]["GET /api"]["description"].is_string());
        assert!(body["endpoints"]["DELETE /api/comments/:comment_id"]["description"].is_string());
    }
}

mod topics {
    use super::*;

    #[test]
    fn lists_every_topic() {
        let client = client();
        let (status, body) = get(&client, "/api/topics");
        assert_eq!(status, Status::Ok);
        let topics = body["topics"].as_array().expect("topics array");
        assert_eq!(topics.len(), 3);
        for topic in topics {
            assert!(topic["slug"].is_string());
            assert!(topic["description"].is_string());
        }
    }
}

mod articles {
    use super::*;

    #[test]
    fn fetches_a_single_article_with_its_body() {
        let client = client();
        let (status, body) = get(&client, "/api/articles/1");
        assert_eq!(status, Status::Ok);
        assert_full_article(&body["article"]);
        assert_eq!(body["article"]["article_id"], 1);
        assert_eq!(body["article"]["body"], "I find this existence challenging");
        assert_eq!(body["article"]["created_at"], "2020-07-09T20:11:00.000Z");
    }

    #[test]
    fn malformed_id_is_a_bad_request() {
        let client = client();
        assert_msg(
            get(&client, "/api/articles/this-is-not-a-valid-id"),
            Status::BadRequest,
            "Bad Request",
        );
        assert_msg(get(&client, "/api/articles/-1"), Status::BadRequest, "Bad Request");
    }

    #[test]
    fn missing_article_is_not_found() {
        let client = client();
        assert_msg(
            get(&client, "/api/articles/9999999"),
            Status::NotFound,
            "No article found with that id",
        );
    }

    #[test]
    fn lists_articles_without_bodies() {
        let client = client();
        let (status, body) = get(&client, "/api/articles");
        assert_eq!(status, Status::Ok);
        let articles = body["articles"].as_array().expect("articles array");
        assert_eq!(articles.len(), 13);
        for article in articles {
            assert!(article["author"].is_string());
            assert!(article["title"].is_string());
            assert!(article["article_id"].is_number());
            assert!(article["topic"].is_string());
            assert!(article["created_at"].is_string());
            assert!(article["votes"].is_number());
            assert!(article["article_img_url"].is_string());
            assert!(article["comment_count"].is_number());
            assert!(article.get("body").is_none());
        }
        assert!(articles.contains(&json!({
            "author": "icellusedkars",
            "title": "Eight pug gifs that remind me of mitch",
            "article_id": 3,
            "topic": "mitch",
            "created_at": "2020-11-03T09:12:00.000Z",
            "votes": 0,
            "article_img_url": IMG_URL,
            "comment_count": 2
        })));
    }

    #[test]
    fn lists_newest_first() {
        let client = client();
        let (_, body) = get(&client, "/api/articles");
        let articles = body["articles"].as_array().expect("articles array");
        assert_sorted_newest_first(articles);
        assert_eq!(articles[0]["article_id"], 3);
    }

    #[test]
    fn filters_by_topic() {
        let client = client();
        let (status, body) = get(&client, "/api/articles?topic=cats");
        assert_eq!(status, Status::Ok);
        let articles = body["articles"].as_array().expect("articles array");
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0]["topic"], "cats");

        let (status, body) = get(&client, "/api/articles?topic=paper");
        assert_eq!(status, Status::Ok);
        assert_eq!(body, json!({ "articles": [] }));

        assert_msg(
            get(&client, "/api/articles?topic=dogs"),
            Status::NotFound,
            "No topic found with that slug",
        );
    }

    #[test]
    fn repeated_reads_are_identical() {
        let client = client();
        assert_eq!(get(&client, "/api/articles"), get(&client, "/api/articles"));
        assert_eq!(
            get(&client, "/api/articles/1/comments"),
            get(&client, "/api/articles/1/comments")
        );
    }
}

mod votes {
    use super::*;

    #[test]
    fn increments_votes() {
        let client = client();
        let (status, body) = patch(&client, "/api/articles/1", json!({ "inc_votes": 1000 }));
        assert_eq!(status, Status::Ok);
        let article = &body["updatedArticle"];
        assert_full_article(article);
        assert_eq!(article["article_id"], 1);
        assert_eq!(article["title"], "Living in the shadow of a great man");
        assert_eq!(article["topic"], "mitch");
        assert_eq!(article["author"], "butter_bridge");
        assert_eq!(article["created_at"], "2020-07-09T20:11:00.000Z");
        assert_eq!(article["votes"], 1100);
        assert_eq!(article["article_img_url"], IMG_URL);

        let (_, body) = get(&client, "/api/articles/1");
        assert_eq!(body["article"]["votes"], 1100);
    }

    #[test]
    fn negative_increment_can_go_below_zero() {
        let client = client();
        let (status, body) = patch(&client, "/api/articles/1", json!({ "inc_votes": -1000 }));
        assert_eq!(status, Status::Ok);
        assert_eq!(body["updatedArticle"]["votes"], -900);
    }

    #[test]
    fn malformed_id_is_a_bad_request() {
        let client = client();
        assert_msg(
            patch(&client, "/api/articles/NOT-A-VALID-ID", json!({ "inc_votes": 1000 })),
            Status::BadRequest,
            "Bad Request",
        );
    }

    #[test]
    fn missing_article_is_not_found() {
        let client = client();
        assert_msg(
            patch(&client, "/api/articles/9999", json!({ "inc_votes": 1000 })),
            Status::NotFound,
            "No article found with that id",
        );
    }

    #[test]
    fn malformed_bodies_are_bad_requests() {
        let client = client();
        for body in vec![
            json!({ "not_the_correct_key": 1000 }),
            json!({ "inc_votes": "lots" }),
            json!({ "inc_votes": 1.5 }),
            json!({ "inc_votes": 1, "votes": 5 }),
            json!({}),
        ] {
            assert_msg(
                patch(&client, "/api/articles/1", body),
                Status::BadRequest,
                "Bad Request",
            );
        }
        let (_, body) = get(&client, "/api/articles/1");
        assert_eq!(body["article"]["votes"], 100);
    }

    #[test]
    fn non_json_body_is_a_bad_request() {
        let client = client();
        let response = client
            .patch("/api/articles/1")
            .header(ContentType::JSON)
            .body("inc_votes=1")
            .dispatch();
        assert_eq!(response.status(), Status::BadRequest);
        assert_eq!(json_body(response), json!({ "msg": "Bad Request" }));
    }
}

mod comments {
    use super::*;

    #[test]
    fn lists_comments_for_an_article() {
        let client = client();
        let (status, body) = get(&client, "/api/articles/1/comments");
        assert_eq!(status, Status::Ok);
        let comments = body["comments"].as_array().expect("comments array");
        assert_eq!(comments.len(), 11);
        for comment in comments {
            assert_comment_shape(comment);
            assert_eq!(comment["article_id"], 1);
        }
        assert!(comments.contains(&json!({
            "comment_id": 2,
            "body": "The beautiful thing about treasure is that it exists. Got to find out what kind of sheets these are; not cotton, not rayon, silky.",
            "votes": 14,
            "author": "butter_bridge",
            "article_id": 1,
            "created_at": "2020-10-31T03:03:00.000Z"
        })));
    }

    #[test]
    fn lists_newest_first() {
        let client = client();
        let (_, body) = get(&client, "/api/articles/1/comments");
        let comments = body["comments"].as_array().expect("comments array");
        assert_sorted_newest_first(comments);
        assert_eq!(comments[0]["comment_id"], 5);
    }

    #[test]
    fn article_without_comments_has_an_empty_list() {
        let client = client();
        let (status, body) = get(&client, "/api/articles/2/comments");
        assert_eq!(status, Status::Ok);
        assert_eq!(body, json!({ "comments": [] }));
    }

    #[test]
    fn listing_rejects_bad_ids() {
        let client = client();
        assert_msg(
            get(&client, "/api/articles/NOT-A-VALID-ID/comments"),
            Status::BadRequest,
            "Bad Request",
        );
        assert_msg(
            get(&client, "/api/articles/99999/comments"),
            Status::NotFound,
            "No article found with that id",
        );
    }

    #[test]
    fn creates_a_comment() {
        let client = client();
        let response = client
            .post("/api/articles/1/comments")
            .header(ContentType::JSON)
            .body(
                json!({
                    "username": "lurker",
                    "body": "Wow this test adds a new comment!"
                })
                .to_string(),
            )
            .dispatch();
        assert_eq!(response.status(), Status::Created);
        assert_eq!(response.headers().get_one("Location"), Some("/api/comments/19"));
        let body = json_body(response);
        let comment = &body["comment"];
        assert_comment_shape(comment);
        assert_eq!(comment["comment_id"], 19);
        assert_eq!(comment["votes"], 0);
        assert_eq!(comment["author"], "lurker");
        assert_eq!(comment["body"], "Wow this test adds a new comment!");
        assert_eq!(comment["article_id"], 1);

        let (_, listed) = get(&client, "/api/articles/1/comments");
        assert_eq!(listed["comments"][0], *comment);
        assert_eq!(comment_count(&client, 1), 12);
    }

    #[test]
    fn unknown_author_is_a_bad_request() {
        let client = client();
        assert_msg(
            post(
                &client,
                "/api/articles/1/comments",
                json!({ "username": "louis", "body": "Wow this test adds a new comment!" }),
            ),
            Status::BadRequest,
            "Bad Request",
        );
    }

    #[test]
    fn missing_article_is_a_bad_request() {
        let client = client();
        assert_msg(
            post(
                &client,
                "/api/articles/99999/comments",
                json!({ "username": "lurker", "body": "Wow this test adds a new comment!" }),
            ),
            Status::BadRequest,
            "Bad Request",
        );
    }

    #[test]
    fn malformed_bodies_are_bad_requests() {
        let client = client();
        for body in vec![
            json!({
                "NotACorrectUsername": "lurker",
                "NotACorrectBody": "Wow this test adds a new comment!"
            }),
            json!({ "username": "lurker" }),
            json!({ "body": "no author" }),
            json!({ "username": "lurker", "body": "   " }),
        ] {
            assert_msg(
                post(&client, "/api/articles/1/comments", body),
                Status::BadRequest,
                "Bad Request",
            );
        }
        assert_msg(
            post(
                &client,
                "/api/articles/one/comments",
                json!({ "username": "lurker", "body": "hi" }),
            ),
            Status::BadRequest,
            "Bad Request",
        );
        assert_eq!(comment_count(&client, 1), 11);
    }

    #[test]
    fn fetches_a_single_comment() {
        let client = client();
        let (status, body) = get(&client, "/api/comments/2");
        assert_eq!(status, Status::Ok);
        assert_comment_shape(&body["comment"]);
        assert_eq!(body["comment"]["votes"], 14);
        assert_eq!(body["comment"]["author"], "butter_bridge");

        assert_msg(get(&client, "/api/comments/abc"), Status::BadRequest, "Bad Request");
        assert_msg(
            get(&client, "/api/comments/9999"),
            Status::NotFound,
            "No comment found with that id",
        );
    }

    #[test]
    fn deletes_a_comment() {
        let client = client();
        assert_eq!(comment_count(&client, 3), 2);

        let response = client.delete("/api/comments/10").dispatch();
        assert_eq!(response.status(), Status::NoContent);
        assert!(response.into_string().unwrap_or_default().is_empty());

        assert_msg(
            get(&client, "/api/comments/10"),
            Status::NotFound,
            "No comment found with that id",
        );
        assert_eq!(comment_count(&client, 3), 1);

        let response = client.delete("/api/comments/10").dispatch();
        assert_eq!(response.status(), Status::NotFound);
        assert_eq!(
            json_body(response),
            json!({ "msg": "No comment found with that id" })
        );
    }

    #[test]
    fn delete_rejects_malformed_ids() {
        let client = client();
        let response = client.delete("/api/comments/not-an-id").dispatch();
        assert_eq!(response.status(), Status::BadRequest);
        assert_eq!(json_body(response), json!({ "msg": "Bad Request" }));
    }
}
