#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response, header::AUTHORIZATION},
};
use foodgram::{AppState, command::Command, db, query::Query, routes::router};
use foodgram_db::table::{AuthToken, Ingredient, Recipe, RecipeIngredient, ShoppingCart, User};
use foodgram_shopping::{Branding, ShoppingListRenderer};
use http_body_util::BodyExt;
use sea_query::{Query as Statement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use temp_dir::TempDir;
use tower::ServiceExt;
use ulid::Ulid;

pub struct TestApp {
    pub router: Router,
    pub write_pool: SqlitePool,
    pub read_pool: SqlitePool,
    _dir: TempDir,
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(Branding::default()).await
}

pub async fn setup_test_app_with(branding: Branding) -> TestApp {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite:{}", dir.child("foodgram.db").display());

    let write_pool = db::create_write_pool(&url).await.unwrap();
    db::migrate(&write_pool).await.unwrap();
    let read_pool = db::create_read_pool(&url, 2).await.unwrap();

    let state = AppState {
        query: Query::new(read_pool.clone()),
        command: Command::new(write_pool.clone()),
        renderer: ShoppingListRenderer::new(branding).unwrap(),
        pool: read_pool.clone(),
    };

    TestApp {
        router: router(state),
        write_pool,
        read_pool,
        _dir: dir,
    }
}

impl TestApp {
    async fn execute(&self, statement: &mut sea_query::InsertStatement) {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_pool)
            .await
            .unwrap();
    }

    /// Returns the user id and its API token
    pub async fn create_user(&self, username: &str) -> (String, String) {
        let id = Ulid::new().to_string();
        let token = format!("{username}-token");

        self.execute(
            Statement::insert()
                .into_table(User::Table)
                .columns([User::Id, User::Username, User::Email, User::CreatedAt])
                .values_panic([
                    id.to_owned().into(),
                    username.into(),
                    format!("{username}@foodgram.test").into(),
                    0i64.into(),
                ]),
        )
        .await;

        self.execute(
            Statement::insert()
                .into_table(AuthToken::Table)
                .columns([AuthToken::Key, AuthToken::UserId, AuthToken::CreatedAt])
                .values_panic([token.to_owned().into(), id.to_owned().into(), 0i64.into()]),
        )
        .await;

        (id, token)
    }

    pub async fn create_ingredient(&self, name: &str, unit: &str) -> String {
        let id = Ulid::new().to_string();

        self.execute(
            Statement::insert()
                .into_table(Ingredient::Table)
                .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
                .values_panic([id.to_owned().into(), name.into(), unit.into()]),
        )
        .await;

        id
    }

    pub async fn create_recipe(
        &self,
        author_id: &str,
        name: &str,
        ingredients: &[(&str, i64)],
    ) -> String {
        let id = Ulid::new().to_string();

        self.execute(
            Statement::insert()
                .into_table(Recipe::Table)
                .columns([
                    Recipe::Id,
                    Recipe::AuthorId,
                    Recipe::Name,
                    Recipe::Text,
                    Recipe::CookingTime,
                    Recipe::CreatedAt,
                ])
                .values_panic([
                    id.to_owned().into(),
                    author_id.into(),
                    name.into(),
                    "Mix everything.".into(),
                    15i64.into(),
                    0i64.into(),
                ]),
        )
        .await;

        for (ingredient_id, amount) in ingredients {
            self.execute(
                Statement::insert()
                    .into_table(RecipeIngredient::Table)
                    .columns([
                        RecipeIngredient::Id,
                        RecipeIngredient::RecipeId,
                        RecipeIngredient::IngredientId,
                        RecipeIngredient::Amount,
                    ])
                    .values_panic([
                        Ulid::new().to_string().into(),
                        id.to_owned().into(),
                        (*ingredient_id).into(),
                        (*amount).into(),
                    ]),
            )
            .await;
        }

        id
    }

    pub async fn put_in_cart(&self, user_id: &str, recipe_id: &str) {
        self.execute(
            Statement::insert()
                .into_table(ShoppingCart::Table)
                .columns([
                    ShoppingCart::Id,
                    ShoppingCart::UserId,
                    ShoppingCart::RecipeId,
                    ShoppingCart::CreatedAt,
                ])
                .values_panic([
                    Ulid::new().to_string().into(),
                    user_id.into(),
                    recipe_id.into(),
                    0i64.into(),
                ]),
        )
        .await;
    }

    pub async fn request(&self, method: Method, uri: &str, token: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Token {token}"));
        }

        self.router
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn pdf_page_count(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes).unwrap().get_pages().len()
}

/// Text of every page, in page order.
pub fn pdf_text(bytes: &[u8]) -> String {
    let doc = lopdf::Document::load_mem(bytes).unwrap();
    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    doc.extract_text(&pages).unwrap()
}
