use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Post;
use crate::schema::{posts, users};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostAuthor {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostWithAuthor {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: PostAuthor,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListPostsResponse {
    pub posts: Vec<PostWithAuthor>,
}

#[utoipa::path(
    get,
    path = "/api/forum/posts",
    tag = "forum",
    responses(
        (status = 200, description = "All forum posts with author details", body = ListPostsResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn list_posts(State(pool): State<Arc<DbPool>>) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let rows: Vec<(Post, String, String)> = match posts::table
        .inner_join(users::table)
        .order(posts::created_at.desc())
        .select((Post::as_select(), users::name, users::email))
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch posts".to_string(),
                }),
            )
                .into_response()
        }
    };

    let posts = rows
        .into_iter()
        .map(|(post, name, email)| PostWithAuthor {
            id: post.id,
            title: post.title,
            content: post.content,
            author: PostAuthor { name, email },
            created_at: post.created_at,
        })
        .collect();

    (StatusCode::OK, Json(ListPostsResponse { posts })).into_response()
}
