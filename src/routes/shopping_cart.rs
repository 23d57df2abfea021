use axum::{
    Json,
    extract::{Path, Query, State},
    http::{
        HeaderValue, StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::IntoResponse,
};
use foodgram_shopping::IngredientAggregationService;
use serde::Deserialize;
use std::str::FromStr;
use strum::EnumString;

use crate::{auth::AuthUser, error::AppError, routes::AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum FileFormat {
    Pdf,
}

#[derive(Debug, Default, Deserialize)]
pub struct DownloadParams {
    pub format: Option<String>,
}

impl DownloadParams {
    fn file_format(&self) -> Result<FileFormat, AppError> {
        match self.format.as_deref() {
            None => Ok(FileFormat::Pdf),
            Some(value) => FileFormat::from_str(value)
                .map_err(|_| AppError::BadRequest("Unsupported file format".to_owned())),
        }
    }
}

pub async fn download(
    AuthUser(user): AuthUser,
    State(app): State<AppState>,
    Query(params): Query<DownloadParams>,
) -> Result<impl IntoResponse, AppError> {
    let FileFormat::Pdf = params.file_format()?;

    let lines = app.query.shopping_cart_lines(&user.id).await?;
    let (lines, rejected) = IngredientAggregationService::partition_valid(lines);
    for err in rejected {
        tracing::warn!(user = user.id, err = %err, "skipping invalid shopping cart line");
    }

    let bytes =
        foodgram_shopping::generate_shopping_list_document(&lines, &user.username, &app.renderer)?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        foodgram_shopping::attachment_filename(&user.username)
    );
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|err| AppError::InternalError(err.to_string()))?;

    tracing::info!(
        user = user.id,
        lines = lines.len(),
        bytes = bytes.len(),
        "shopping list generated"
    );

    Ok((
        [
            (
                CONTENT_TYPE,
                HeaderValue::from_static(foodgram_shopping::CONTENT_TYPE),
            ),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

pub async fn add(
    AuthUser(user): AuthUser,
    State(app): State<AppState>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, AppError> {
    let Some(recipe) = app.query.find_recipe(&id).await? else {
        return Err(AppError::NotFound);
    };

    if !app.command.add_to_shopping_cart(&user.id, &recipe.id).await? {
        return Err(AppError::BadRequest(
            "Recipe is already in the shopping cart".to_owned(),
        ));
    }

    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn remove(
    AuthUser(user): AuthUser,
    State(app): State<AppState>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, AppError> {
    let Some(recipe) = app.query.find_recipe(&id).await? else {
        return Err(AppError::NotFound);
    };

    if !app
        .command
        .remove_from_shopping_cart(&user.id, &recipe.id)
        .await?
    {
        return Err(AppError::BadRequest(
            "Recipe is not in the shopping cart".to_owned(),
        ));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_format() {
        let params = |format: Option<&str>| DownloadParams {
            format: format.map(str::to_owned),
        };

        assert_eq!(params(None).file_format().unwrap(), FileFormat::Pdf);
        assert_eq!(params(Some("pdf")).file_format().unwrap(), FileFormat::Pdf);
        assert!(params(Some("csv")).file_format().is_err());
        assert!(params(Some("")).file_format().is_err());
    }
}
