use super::schema::{articles, comments, topics, users};
use super::{PgStore, Result};
use crate::topic::Topic;
use crate::utils::at;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::{insert_into, sql_query};

const IMG_URL: &str =
    "https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700";

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct SeedUser {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = articles)]
pub struct SeedArticle {
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub struct SeedComment {
    pub body: String,
    pub article_id: i32,
    pub author: String,
    pub votes: i32,
    pub created_at: DateTime<Utc>,
}

/// A full data set. Articles and comments are listed in id order; the
/// `article_id` of a comment is the 1-based position of its article.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub topics: Vec<Topic>,
    pub users: Vec<SeedUser>,
    pub articles: Vec<SeedArticle>,
    pub comments: Vec<SeedComment>,
}

fn topic(slug: &str, description: &str) -> Topic {
    Topic {
        slug: slug.to_string(),
        description: description.to_string(),
    }
}

fn user(username: &str, name: &str, avatar_url: &str) -> SeedUser {
    SeedUser {
        username: username.to_string(),
        name: name.to_string(),
        avatar_url: avatar_url.to_string(),
    }
}

fn article(
    title: &str,
    topic: &str,
    author: &str,
    body: &str,
    created_at: &str,
    votes: i32,
) -> SeedArticle {
    SeedArticle {
        title: title.to_string(),
        topic: topic.to_string(),
        author: author.to_string(),
        body: body.to_string(),
        created_at: at(created_at),
        votes,
        article_img_url: IMG_URL.to_string(),
    }
}

fn comment(body: &str, article_id: i32, author: &str, votes: i32, created_at: &str) -> SeedComment {
    SeedComment {
        body: body.to_string(),
        article_id,
        author: author.to_string(),
        votes,
        created_at: at(created_at),
    }
}

impl SeedData {
    /// The fixture set the API tests are written against.
    pub fn test() -> SeedData {
        SeedData {
            topics: vec![
                topic("mitch", "The man, the Mitch, the legend"),
                topic("cats", "Not dogs"),
                topic("paper", "what books are made of"),
            ],
            users: vec![
                user(
                    "butter_bridge",
                    "jonny",
                    "https://www.healthytherapies.com/wp-content/uploads/2016/06/Lime3.jpg",
                ),
                user(
                    "icellusedkars",
                    "sam",
                    "https://avatars2.githubusercontent.com/u/24604688?s=460&v=4",
                ),
                user(
                    "rogersop",
                    "paul",
                    "https://avatars2.githubusercontent.com/u/24394918?s=400&v=4",
                ),
                user(
                    "lurker",
                    "do_nothing",
                    "https://www.golenbock.com/wp-content/uploads/2015/01/placeholder-user.png",
                ),
            ],
            articles: vec![
                article("Living in the shadow of a great man", "mitch", "butter_bridge",
                    "I find this existence challenging", "2020-07-09T20:11:00Z", 100),
                article("Sony Vaio; or, The Laptop", "mitch", "icellusedkars",
                    "Call me Mitchell. Some years ago I bought a laptop.", "2020-10-16T05:03:00Z", 0),
                article("Eight pug gifs that remind me of mitch", "mitch", "icellusedkars",
                    "some gifs", "2020-11-03T09:12:00Z", 0),
                article("Student SUES Mitch!", "mitch", "rogersop",
                    "We all love Mitch and his wonderful, unique typing style.", "2020-05-06T01:14:00Z", 0),
                article("UNCOVERED: catspiracy to bring down democracy", "cats", "rogersop",
                    "Bastet walks amongst us, and the cats are taking arms!", "2020-08-03T13:14:00Z", 0),
                article("A", "mitch", "icellusedkars",
                    "Delicious tin of cat food", "2020-10-18T01:00:00Z", 0),
                article("Z", "mitch", "icellusedkars",
                    "I was hungry.", "2020-01-07T14:08:00Z", 0),
                article("Does Mitch predate civilisation?", "mitch", "icellusedkars",
                    "Archaeologists have uncovered a gigantic statue from the dawn of humanity.",
                    "2020-04-17T01:08:00Z", 0),
                article("They're not exactly dogs, are they?", "mitch", "butter_bridge",
                    "Well? Think about it.", "2020-06-06T09:10:00Z", 0),
                article("Seven inspirational thought leaders from Manchester UK", "mitch", "rogersop",
                    "Who are we kidding, there is only one, and it's Mitch!", "2020-05-14T04:15:00Z", 0),
                article("Am I a cat?", "mitch", "icellusedkars",
                    "Having run out of ideas for articles, I am staring at the wall blankly, like a cat. Does this make me a cat?",
                    "2020-01-15T22:21:00Z", 0),
                article("Moustache", "mitch", "butter_bridge",
                    "Have you seen the size of that thing?", "2020-10-11T11:24:00Z", 0),
                article("Another article about Mitch", "mitch", "butter_bridge",
                    "There will never be enough articles about Mitch!", "2020-10-11T12:24:00Z", 0),
            ],
            comments: vec![
                comment("Oh, I've got compassion running out of my nose, pal! I'm the Sultan of Sentiment!",
                    9, "butter_bridge", 16, "2020-04-06T12:17:00Z"),
                comment("The beautiful thing about treasure is that it exists. Got to find out what kind of sheets these are; not cotton, not rayon, silky.",
                    1, "butter_bridge", 14, "2020-10-31T03:03:00Z"),
                comment("Replacing the quiet elegance of the dark suit and tie with the casual indifference of these muted earth tones is a form of fashion suicide, but, uh, I'd still be happy to take it.",
                    1, "icellusedkars", 100, "2020-03-01T01:13:00Z"),
                comment(" I carry a log. Yes. Is it funny to you? It is not to me.",
                    1, "icellusedkars", -100, "2020-02-23T12:01:00Z"),
                comment("I hate streaming noses", 1, "icellusedkars", 0, "2020-11-03T21:00:00Z"),
                comment("I hate streaming eyes even more", 1, "icellusedkars", 0, "2020-04-11T21:02:00Z"),
                comment("Lobster pot", 1, "icellusedkars", 0, "2020-05-15T20:19:00Z"),
                comment("Delicious crackerbreads", 1, "icellusedkars", 0, "2020-04-14T20:19:00Z"),
                comment("Superficially charming", 1, "icellusedkars", 0, "2020-01-01T03:08:00Z"),
                comment("git push origin master", 3, "icellusedkars", 0, "2020-06-20T07:24:00Z"),
                comment("Ambidextrous marsupial", 3, "icellusedkars", 0, "2020-09-19T23:10:00Z"),
                comment("Massive intercranial brain haemorrhage", 1, "icellusedkars", 0, "2020-03-02T07:10:00Z"),
                comment("Fruit pastilles", 1, "icellusedkars", 0, "2020-06-15T10:25:00Z"),
                comment("What do you see? I have no idea where this will lead us. This place I speak of, is known as the Black Lodge.",
                    5, "icellusedkars", 16, "2020-06-09T05:00:00Z"),
                comment("I am 100% sure that we're not completely sure.",
                    5, "butter_bridge", 1, "2020-11-24T00:08:00Z"),
                comment("This is a bad article name", 6, "butter_bridge", 1, "2020-10-11T15:23:00Z"),
                comment("The owls are not what they seem.", 9, "icellusedkars", 20, "2020-03-14T17:02:00Z"),
                comment("This morning, I showered for nine minutes.",
                    1, "butter_bridge", 16, "2020-07-21T00:20:00Z"),
            ],
        }
    }
}

impl PgStore {
    /// Replaces every row with `data` in a single transaction, restarting
    /// the id sequences so ids line up with the data set's order.
    pub fn seed(&self, data: &SeedData) -> Result<()> {
        let mut conn = self.conn()?;
        conn.transaction::<_, DieselError, _>(|conn| {
            sql_query("TRUNCATE comments, articles, users, topics RESTART IDENTITY CASCADE;")
                .execute(conn)?;
            insert_into(topics::table).values(&data.topics).execute(conn)?;
            insert_into(users::table).values(&data.users).execute(conn)?;
            insert_into(articles::table).values(&data.articles).execute(conn)?;
            insert_into(comments::table).values(&data.comments).execute(conn)?;
            Ok(())
        })?;
        log::info!(
            "seeded {} topics, {} users, {} articles, {} comments",
            data.topics.len(),
            data.users.len(),
            data.articles.len(),
            data.comments.len()
        );
        Ok(())
    }
}
