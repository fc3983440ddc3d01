//! REST client for the marketplace backend.
//!
//! # Design
//! - One client per app boot; the bearer token is read from storage on every request.
//! - Every response goes through the shared envelope and error normalization in `core::http`.
//! - A 401 clears the stored session and hands control to the app's unauthorized callback.

use crate::core::auth::bearer_header;
use crate::core::config::UiConfig;
use crate::core::http::{ApiError, Page, decode_data, decode_page, error_from_response};
use crate::core::search::{SearchBackend, SearchQuery, SearchRequest};
use crate::core::storage::{KeyValueStore, TOKEN_KEY, clear_session};
use crate::features::countries::state::CountryGuide;
use crate::features::network::state::{PartnerQuery, PartnerSearch};
use crate::features::partners::state::{ReviewFeed, ReviewQuery};
use crate::features::properties::state::{PropertyQuery, PropertySearch};
use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::rc::Rc;
use terracasa_api_models::{
    AuthResponse, ChangePasswordRequest, ContactPartnerRequest, Country, CountryOverview,
    CountrySection, ForgotPasswordRequest, ListingStatus, LoginRequest, PartnerSummary,
    ProfileUpdate, PropertyDraft, PropertySummary, RegisterRequest, Review,
    ReviewRequest, User, VerifyCodeRequest,
};
use tracing::{debug, warn};
use yew::Callback;

#[derive(Clone, Copy, Debug)]
enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Marketplace API client.
pub struct ApiClient {
    config: UiConfig,
    storage: Rc<dyn KeyValueStore>,
    on_unauthorized: Callback<()>,
}

impl ApiClient {
    /// Client bound to `config`, reading the token from `storage`.
    pub fn new(
        config: UiConfig,
        storage: Rc<dyn KeyValueStore>,
        on_unauthorized: Callback<()>,
    ) -> Self {
        Self {
            config,
            storage,
            on_unauthorized,
        }
    }

    /// Resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &UiConfig {
        &self.config
    }

    fn request(&self, verb: Verb, path: &str) -> Request {
        let url = self.config.endpoint(path);
        let request = match verb {
            Verb::Get => Request::get(&url),
            Verb::Post => Request::post(&url),
            Verb::Put => Request::put(&url),
            Verb::Patch => Request::patch(&url),
            Verb::Delete => Request::delete(&url),
        };
        match self.storage.get(TOKEN_KEY).as_deref().and_then(bearer_header) {
            Some(value) => request.header("Authorization", &value),
            None => request,
        }
    }

    async fn execute(&self, request: Request) -> Result<Value, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::network(err.to_string()))?;
        let status = response.status();
        let text = response.text().await.map_err(|err| ApiError::Decode {
            detail: err.to_string(),
        })?;
        if !(200..300).contains(&status) {
            let err = error_from_response(status, &text);
            if err.is_unauthorized() {
                warn!("session rejected; signing out");
                clear_session(&*self.storage);
                self.on_unauthorized.emit(());
            }
            return Err(err);
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|err| ApiError::Decode {
            detail: err.to_string(),
        })
    }

    async fn send(&self, verb: Verb, path: &str) -> Result<Value, ApiError> {
        debug!(?verb, path, "api request");
        self.execute(self.request(verb, path)).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        verb: Verb,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        debug!(?verb, path, "api request");
        let request = self
            .request(verb, path)
            .json(body)
            .map_err(|err| ApiError::Encode {
                detail: err.to_string(),
            })?;
        self.execute(request).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        decode_data(self.send(Verb::Get, path).await?)
    }

    // auth

    /// `POST /auth/register`.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`].
    pub async fn register(&self, body: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        decode_data(self.send_json(Verb::Post, "/auth/register", body).await?)
    }

    /// `POST /auth/login`.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`].
    pub async fn login(&self, body: &LoginRequest) -> Result<AuthResponse, ApiError> {
        decode_data(self.send_json(Verb::Post, "/auth/login", body).await?)
    }

    /// `GET /me`.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`].
    pub async fn me(&self) -> Result<User, ApiError> {
        self.get("/me").await
    }

    /// `PATCH /me`.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`].
    pub async fn update_profile(&self, body: &ProfileUpdate) -> Result<User, ApiError> {
        decode_data(self.send_json(Verb::Patch, "/me", body).await?)
    }

    /// `PUT /auth/change-password`.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`].
    pub async fn change_password(&self, body: &ChangePasswordRequest) -> Result<(), ApiError> {
        self.send_json(Verb::Put, "/auth/change-password", body)
            .await
            .map(drop)
    }

    /// `POST /auth/forgot-password`.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`].
    pub async fn forgot_password(&self, body: &ForgotPasswordRequest) -> Result<(), ApiError> {
        self.send_json(Verb::Post, "/auth/forgot-password", body)
            .await
            .map(drop)
    }

    /// `POST /auth/verify-code`.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`].
    pub async fn verify_code(&self, body: &VerifyCodeRequest) -> Result<(), ApiError> {
        self.send_json(Verb::Post, "/auth/verify-code", body)
            .await
            .map(drop)
    }

    // countries

    /// `GET /countries`.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`].
    pub async fn countries(&self) -> Result<Vec<Country>, ApiError> {
        self.get("/countries").await
    }

    /// Overview and sections of one country.
    ///
    /// # Errors
    /// Returns the first failing request's [`ApiError`].
    pub async fn country_guide(&self, code: &str) -> Result<CountryGuide, ApiError> {
        let code = urlencoding::encode(code);
        let overview: CountryOverview = self.get(&format!("/countries/{code}")).await?;
        let sections: Vec<CountrySection> =
            self.get(&format!("/countries/{code}/sections")).await?;
        Ok(CountryGuide { overview, sections })
    }

    // properties

    /// `POST /properties`.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`].
    pub async fn create_property(&self, draft: &PropertyDraft) -> Result<(), ApiError> {
        self.send_json(Verb::Post, "/properties", draft)
            .await
            .map(drop)
    }

    /// `DELETE /properties/{id}`.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`].
    pub async fn delete_property(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/properties/{}", urlencoding::encode(id));
        self.send(Verb::Delete, &path).await.map(drop)
    }

    /// `POST /properties/{id}/submit`.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`].
    pub async fn submit_property(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/properties/{}/submit", urlencoding::encode(id));
        self.send(Verb::Post, &path).await.map(drop)
    }

    /// `GET /partners/me/properties`, optionally filtered by status.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`].
    pub async fn my_properties(
        &self,
        status: Option<ListingStatus>,
    ) -> Result<Vec<PropertySummary>, ApiError> {
        let path = match status {
            Some(status) => format!("/partners/me/properties?status={}", status.as_str()),
            None => "/partners/me/properties".to_string(),
        };
        self.get(&path).await
    }

    // partners

    /// Public partner profile, `GET /{partnerId}`.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`].
    pub async fn partner_profile(&self, id: &str) -> Result<PartnerSummary, ApiError> {
        self.get(&format!("/{}", urlencoding::encode(id))).await
    }

    /// `POST /partners/{id}/contact`.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`].
    pub async fn contact_partner(
        &self,
        id: &str,
        body: &ContactPartnerRequest,
    ) -> Result<(), ApiError> {
        let path = format!("/partners/{}/contact", urlencoding::encode(id));
        self.send_json(Verb::Post, &path, body).await.map(drop)
    }

    /// `POST /partners/{id}/reviews`.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`].
    pub async fn create_review(
        &self,
        query: &ReviewQuery,
        body: &ReviewRequest,
    ) -> Result<Review, ApiError> {
        decode_data(self.send_json(Verb::Post, &query.path(), body).await?)
    }

    /// `PATCH /partners/{id}/reviews/{reviewId}`.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`].
    pub async fn update_review(
        &self,
        query: &ReviewQuery,
        review_id: &str,
        body: &ReviewRequest,
    ) -> Result<Review, ApiError> {
        let path = format!("{}/{}", query.path(), urlencoding::encode(review_id));
        decode_data(self.send_json(Verb::Patch, &path, body).await?)
    }

    /// `DELETE /partners/{id}/reviews/{reviewId}`.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`].
    pub async fn delete_review(&self, query: &ReviewQuery, review_id: &str) -> Result<(), ApiError> {
        let path = format!("{}/{}", query.path(), urlencoding::encode(review_id));
        self.send(Verb::Delete, &path).await.map(drop)
    }
}

#[async_trait(?Send)]
impl SearchBackend<PropertySearch> for ApiClient {
    async fn fetch(
        &self,
        request: &SearchRequest<PropertyQuery>,
    ) -> Result<Page<PropertySummary>, ApiError> {
        let path = request.params().with_path("/properties");
        decode_page(
            self.send(Verb::Get, &path).await?,
            request.page,
            request.page_size,
        )
    }
}

#[async_trait(?Send)]
impl SearchBackend<PartnerSearch> for ApiClient {
    async fn fetch(
        &self,
        request: &SearchRequest<PartnerQuery>,
    ) -> Result<Page<PartnerSummary>, ApiError> {
        // The partner list is served whole; refinements run client-side.
        let path = request.query.to_params().with_path("/partners");
        decode_page(
            self.send(Verb::Get, &path).await?,
            request.page,
            request.page_size,
        )
    }
}

#[async_trait(?Send)]
impl SearchBackend<ReviewFeed> for ApiClient {
    async fn fetch(&self, request: &SearchRequest<ReviewQuery>) -> Result<Page<Review>, ApiError> {
        let Some(base) = request.query.feed_path() else {
            return Err(ApiError::Encode {
                detail: "review feed has no partner".to_string(),
            });
        };
        let path = request.params().with_path(&base);
        decode_page(
            self.send(Verb::Get, &path).await?,
            request.page,
            request.page_size,
        )
    }
}
