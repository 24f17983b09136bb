//! Blog models shared by the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, TimeZone};
use helios_hal::Mapper;
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostId {
    pub post_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserId {
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentId {
    pub comment_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub comment_id: CommentId,
    pub dates: IndexMap<String, String>,
    pub comment: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub post_id: PostId,
    pub title: String,
    pub content: String,
    pub author: User,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleComment {
    pub comment_id: i64,
    pub comment: String,
    pub user_id: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplePost {
    pub post_id: i64,
    pub title: String,
    pub body: String,
    pub author_id: i64,
    pub comments: Vec<SimpleComment>,
}

impl SimplePost {
    pub fn new(post_id: i64, title: &str, body: &str, author_id: i64) -> Self {
        Self {
            post_id,
            title: title.to_string(),
            body: body.to_string(),
            author_id,
            comments: Vec::new(),
        }
    }
}

pub fn user(id: i64, name: &str) -> User {
    User {
        user_id: UserId { user_id: id },
        name: name.to_string(),
        password: Some("ilovemyjob".to_string()),
    }
}

fn rfc3339(date: &str) -> String {
    DateTime::parse_from_rfc3339(date)
        .expect("valid date")
        .to_rfc3339()
}

/// Post 9 by user 1, with one comment by user 2.
pub fn complex_post() -> Post {
    let dates = IndexMap::from([
        ("created_at".to_string(), rfc3339("2015-07-18T12:13:00+00:00")),
        ("accepted_at".to_string(), rfc3339("2015-07-19T00:00:00+00:00")),
    ]);

    Post {
        post_id: PostId { post_id: 9 },
        title: "Hello World".to_string(),
        content: "Your first post".to_string(),
        author: user(1, "Post Author"),
        comments: vec![Comment {
            comment_id: CommentId { comment_id: 1000 },
            dates,
            comment: "Have no fear, sers, your king is safe.".to_string(),
            user: user(2, "Barristan Selmy"),
        }],
    }
}

/// Post 1 with five comments, one per day from 2015-07-19 in Madrid summer time.
pub fn simple_post() -> SimplePost {
    let madrid = FixedOffset::east_opt(2 * 3600).expect("valid offset");
    let mut post = SimplePost::new(1, "post title", "post body", 2);
    for i in 1..=5u32 {
        let created_at = madrid
            .with_ymd_and_hms(2015, 7, 18 + i, 12, 48, 0)
            .single()
            .expect("unambiguous date");
        post.comments.push(SimpleComment {
            comment_id: i64::from(i * 10),
            comment: format!("I am writing comment no. {}", i),
            user_id: format!("User {}", i * 5),
            created_at: created_at.to_rfc3339(),
        });
    }
    post
}

/// Mapping definitions for the blog models, in their data form.
pub fn blog_mappings(curie: bool, with_auxiliary: bool) -> String {
    let curies = if curie {
        r#"{"name": "example", "href": "http://example.com/docs/rels/{rel}"}"#
    } else {
        "{}"
    };
    let (post_urls, user_urls) = if with_auxiliary {
        (
            r#""comments": "http://example.com/posts/{postId}/comments""#,
            r#""friends": "http://example.com/users/{userId}/friends",
               "comments": "http://example.com/users/{userId}/comments""#,
        )
    } else {
        ("", "")
    };
    let sep = |extra: &str| if extra.is_empty() { "" } else { "," };

    format!(
        r#"[
          {{
            "class": "Post",
            "alias": "Message",
            "aliased_properties": {{"author": "author", "title": "headline", "content": "body"}},
            "hide_properties": [],
            "id_properties": ["postId"],
            "urls": {{"self": "http://example.com/posts/{{postId}}"{post_sep}{post_urls}}},
            "curies": {curies}
          }},
          {{
            "class": "User",
            "alias": "",
            "aliased_properties": {{}},
            "hide_properties": ["password"],
            "id_properties": ["userId"],
            "urls": {{"self": "http://example.com/users/{{userId}}"{user_sep}{user_urls}}},
            "curies": {curies}
          }},
          {{
            "class": "Comment",
            "alias": "",
            "aliased_properties": {{}},
            "hide_properties": [],
            "id_properties": ["commentId"],
            "urls": {{"self": "http://example.com/comments/{{commentId}}"}},
            "curies": {curies}
          }}
        ]"#,
        post_sep = sep(post_urls),
        user_sep = sep(user_urls),
    )
}

pub fn blog_mapper(curie: bool, with_auxiliary: bool) -> Mapper {
    Mapper::from_json_str(&blog_mappings(curie, with_auxiliary)).expect("valid mappings")
}
