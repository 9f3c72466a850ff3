//! Form-field extractor accepting both urlencoded and multipart bodies.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};

use crate::errors::AppError;

/// Text fields of a form body. File parts of a multipart body are skipped.
#[derive(Debug, Default)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    /// Value of a field that must be present.
    pub fn required(&self, name: &str) -> Result<String, AppError> {
        self.0
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::Validation(format!("Missing form field '{name}'")))
    }

    /// Parsed value of an optional numeric field. Absent and empty both mean `None`.
    pub fn optional_usize(&self, name: &str) -> Result<Option<usize>, AppError> {
        match self.0.get(name).map(|v| v.trim()) {
            None | Some("") => Ok(None),
            Some(value) => value.parse::<usize>().map(Some).map_err(|_| {
                AppError::Validation(format!(
                    "Form field '{name}' must be a non-negative integer, got '{value}'"
                ))
            }),
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for FormFields {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(&req) {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;

            let mut fields = HashMap::new();
            while let Some(field) = multipart.next_field().await? {
                if field.file_name().is_some() {
                    continue;
                }
                let Some(name) = field.name().map(str::to_string) else {
                    continue;
                };
                fields.insert(name, field.text().await?);
            }
            return Ok(Self(fields));
        }

        let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        Ok(Self(fields))
    }
}
