//! Multipart upload extractor
//!
//! Collects the text fields and files of the create-resource and
//! add-version forms. Files are buffered in memory; the body size is bounded
//! by the `DefaultBodyLimit` layer.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};
use hub_core::AssetUpload;
use hub_service::dto::{AddVersionRequest, CreateResourceRequest, UploadedFiles};

use crate::response::ApiError;

/// Parsed upload form
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    files: UploadedFiles,
}

/// Canonical field name for accepted aliases
fn canonical(name: &str) -> &str {
    match name {
        "pluginType" => "plugin_type",
        "zip" => "archive",
        "images[]" => "images",
        other => other,
    }
}

impl UploadForm {
    fn push_text(&mut self, name: &str, value: String) {
        self.fields.insert(canonical(name).to_string(), value);
    }

    fn push_file(&mut self, name: &str, upload: AssetUpload) {
        match canonical(name) {
            "archive" => self.files.archive = Some(upload),
            "images" => self.files.images.push(upload),
            other => tracing::debug!(field = other, "Ignoring unexpected file field"),
        }
    }

    fn take(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Split into the create-resource request and its files
    pub fn into_create_request(mut self) -> (CreateResourceRequest, UploadedFiles) {
        let request = CreateResourceRequest {
            title: self.take("title"),
            description: self.take("description"),
            plugin_type: self.take("plugin_type"),
            category: self.take("category"),
            content: self.take("content"),
            version: self.take("version"),
            changelog: self.take("changelog"),
        };
        (request, self.files)
    }

    /// Split into the add-version request and its files
    pub fn into_version_request(mut self) -> (AddVersionRequest, UploadedFiles) {
        let request = AddVersionRequest {
            version: self.take("version"),
            changelog: self.take("changelog"),
        };
        (request, self.files)
    }
}

#[async_trait]
impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_form(e.body_text()))?;

        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::invalid_form(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                // Empty file inputs arrive with a blank file name
                Some(file_name) if !file_name.is_empty() => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::invalid_form(e.body_text()))?;
                    form.push_file(&name, AssetUpload::new(file_name, bytes.to_vec()));
                }
                Some(_) => {}
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| ApiError::invalid_form(e.body_text()))?;
                    form.push_text(&name, value);
                }
            }
        }

        Ok(form)
    }
}
