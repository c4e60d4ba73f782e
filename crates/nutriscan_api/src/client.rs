use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use nutriscan_protocol::defaults::API_TIMEOUT_SECS;
use nutriscan_protocol::{
    AdminStats, ApiResponse, Correction, CorrectionStatus, Favorite, FavoriteStatus,
    FavoritesPage, HistoryPage, MigrateScansRequest, MigratedData, Product, ScanRequest,
    UpdatePreferencesRequest, UserProfile,
};

use crate::error::ApiError;
use crate::token::TokenSource;

/// Client for the NutriScan backend REST API.
///
/// `base_url` already includes the version segment, e.g.
/// `http://localhost:8000/api/v1`. Every call attaches the current bearer
/// token (if any) and maps a 401 into a forced sign-out via the token
/// source before surfacing [`ApiError::Unauthorized`].
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenSource>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // ------------------------------------------------------------------
    // Scanning
    // ------------------------------------------------------------------

    /// `POST /scan` — resolve a barcode or QR payload into a product.
    pub async fn scan_product(&self, request: &ScanRequest) -> Result<Product, ApiError> {
        tracing::debug!(code = %request.code, kind = %request.kind, "scanning product");
        self.request_json(self.http.post(self.url("/scan")).json(request))
            .await
    }

    // ------------------------------------------------------------------
    // History & migration
    // ------------------------------------------------------------------

    /// `GET /user/history` — paginated scan history for the signed-in user.
    pub async fn user_history(&self, page: u32, limit: u32) -> Result<HistoryPage, ApiError> {
        self.request_json(
            self.http
                .get(self.url("/user/history"))
                .query(&[("page", page), ("limit", limit)]),
        )
        .await
    }

    /// `POST /user/history/migrate` — upload a batch of guest scans.
    pub async fn migrate_guest_scans(
        &self,
        request: &MigrateScansRequest,
    ) -> Result<MigratedData, ApiError> {
        tracing::info!(count = request.scans.len(), "migrating guest scans");
        self.request_json(self.http.post(self.url("/user/history/migrate")).json(request))
            .await
    }

    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    /// `GET /favorites` — paginated favorites list.
    pub async fn favorites(&self, page: u32, limit: u32) -> Result<FavoritesPage, ApiError> {
        self.request_json(
            self.http
                .get(self.url("/favorites"))
                .query(&[("page", page), ("limit", limit)]),
        )
        .await
    }

    /// `POST /favorites` — add a product to favorites.
    pub async fn add_favorite(&self, product_id: &str) -> Result<Favorite, ApiError> {
        self.request_json(
            self.http
                .post(self.url("/favorites"))
                .json(&serde_json::json!({ "product_id": product_id })),
        )
        .await
    }

    /// `DELETE /favorites/{id}` — remove a product from favorites.
    pub async fn remove_favorite(&self, product_id: &str) -> Result<(), ApiError> {
        self.request_ack(self.http.delete(self.url(&format!("/favorites/{product_id}"))))
            .await
    }

    /// `GET /favorites/{id}/check` — whether a product is favorited.
    pub async fn favorite_status(&self, product_id: &str) -> Result<FavoriteStatus, ApiError> {
        self.request_json(
            self.http
                .get(self.url(&format!("/favorites/{product_id}/check"))),
        )
        .await
    }

    // ------------------------------------------------------------------
    // User profile & preferences
    // ------------------------------------------------------------------

    /// `GET /user/me` — profile and preferences of the signed-in user.
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        self.request_json(self.http.get(self.url("/user/me"))).await
    }

    /// `POST /user/preferences` — update allergies/diets.
    pub async fn update_preferences(
        &self,
        request: &UpdatePreferencesRequest,
    ) -> Result<UserProfile, ApiError> {
        self.request_json(self.http.post(self.url("/user/preferences")).json(request))
            .await
    }

    // ------------------------------------------------------------------
    // Corrections
    // ------------------------------------------------------------------

    /// `POST /corrections` — submit a product data correction, optionally
    /// with a supporting photo (multipart).
    pub async fn submit_correction(
        &self,
        product_id: &str,
        field_name: &str,
        old_value: &str,
        new_value: &str,
        photo: Option<&Path>,
    ) -> Result<Correction, ApiError> {
        let mut form = reqwest::multipart::Form::new()
            .text("product_id", product_id.to_string())
            .text("field_name", field_name.to_string())
            .text("old_value", old_value.to_string())
            .text("new_value", new_value.to_string());

        if let Some(path) = photo {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| ApiError::Attachment {
                    path: path.to_path_buf(),
                    source,
                })?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "photo.jpg".to_string());
            let part = reqwest::multipart::Part::bytes(bytes)
                .file_name(filename.clone())
                .mime_str(&photo_mime(&filename))?;
            form = form.part("photo", part);
        }

        self.request_json(self.http.post(self.url("/corrections")).multipart(form))
            .await
    }

    // ------------------------------------------------------------------
    // Admin
    // ------------------------------------------------------------------

    /// `GET /admin/corrections` — corrections awaiting review.
    pub async fn admin_corrections(
        &self,
        status: Option<CorrectionStatus>,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Correction>, ApiError> {
        let mut query: Vec<(&str, String)> = vec![
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(status) = status {
            query.push(("status", status.to_string()));
        }
        self.request_json(self.http.get(self.url("/admin/corrections")).query(&query))
            .await
    }

    /// `GET /admin/corrections/{id}` — one correction with full detail.
    pub async fn admin_correction(&self, id: &str) -> Result<Correction, ApiError> {
        self.request_json(
            self.http
                .get(self.url(&format!("/admin/corrections/{id}"))),
        )
        .await
    }

    /// `PATCH /admin/corrections/{id}/approve`
    pub async fn approve_correction(&self, id: &str) -> Result<Correction, ApiError> {
        self.request_json(
            self.http
                .patch(self.url(&format!("/admin/corrections/{id}/approve"))),
        )
        .await
    }

    /// `PATCH /admin/corrections/{id}/reject`
    pub async fn reject_correction(&self, id: &str) -> Result<Correction, ApiError> {
        self.request_json(
            self.http
                .patch(self.url(&format!("/admin/corrections/{id}/reject"))),
        )
        .await
    }

    /// `GET /admin/stats`
    pub async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.request_json(self.http.get(self.url("/admin/stats"))).await
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    async fn request_json<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(builder).await?;
        let envelope: ApiResponse<T> = response.json().await?;
        envelope.into_data().map_err(ApiError::Api)
    }

    /// For endpoints whose success payload carries nothing we need.
    async fn request_ack(&self, builder: reqwest::RequestBuilder) -> Result<(), ApiError> {
        let response = self.send(builder).await?;
        let envelope: ApiResponse<serde_json::Value> = response.json().await?;
        if envelope.success {
            Ok(())
        } else {
            Err(ApiError::Api(
                envelope
                    .message
                    .unwrap_or_else(|| "request failed".to_string()),
            ))
        }
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let builder = match self.tokens.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let response = builder.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!("backend rejected credentials, forcing sign-out");
            self.tokens.on_unauthorized();
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: extract_message(&body),
            });
        }
        Ok(response)
    }
}

/// Pull a human-readable message out of an error body, tolerating both the
/// envelope shape and FastAPI-style `{"detail": ...}` responses.
fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "detail", "error"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no error detail provided".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

fn photo_mime(filename: &str) -> String {
    match filename.rsplit('.').next().map(|ext| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "png" => "image/png".to_string(),
        Some(ext) if ext == "gif" => "image/gif".to_string(),
        Some(ext) if ext == "webp" => "image/webp".to_string(),
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg".to_string(),
        _ => "image/jpeg".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::NoAuth;

    #[test]
    fn base_url_and_paths_join_cleanly() {
        let client =
            ApiClient::new("http://localhost:8000/api/v1/", Arc::new(NoAuth)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(client.url("/scan"), "http://localhost:8000/api/v1/scan");
        assert_eq!(
            client.url("favorites/p1/check"),
            "http://localhost:8000/api/v1/favorites/p1/check"
        );
    }

    #[test]
    fn extract_message_handles_envelope_and_detail() {
        assert_eq!(
            extract_message(r#"{"success":false,"message":"bad barcode"}"#),
            "bad barcode"
        );
        assert_eq!(extract_message(r#"{"detail":"not found"}"#), "not found");
        assert_eq!(extract_message(""), "no error detail provided");
        assert_eq!(extract_message("boom"), "boom");
    }

    #[test]
    fn photo_mime_guesses_from_extension() {
        assert_eq!(photo_mime("label.PNG"), "image/png");
        assert_eq!(photo_mime("front.jpeg"), "image/jpeg");
        assert_eq!(photo_mime("no_extension"), "image/jpeg");
    }
}
