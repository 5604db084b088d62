// Typed client for the external server-action layer. The backend itself
// (queries, auth, business rules) lives outside this repository.
use gloo_net::http::Request;
use gloo_storage::{LocalStorage, Storage};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

const API_BASE_URL: &str = "/api/v1";
const AUTH_TOKEN_KEY: &str = "haven_auth_token";

// ============================================
// ERROR HANDLING
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    pub code: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// ============================================
// HTTP CLIENT
// ============================================

pub struct ApiClient;

impl ApiClient {
    fn get_auth_token() -> Option<String> {
        LocalStorage::get::<String>(AUTH_TOKEN_KEY).ok()
    }

    pub fn set_auth_token(token: &str) {
        let _ = LocalStorage::set(AUTH_TOKEN_KEY, token);
    }

    pub fn clear_auth_token() {
        LocalStorage::delete(AUTH_TOKEN_KEY);
    }

    pub fn is_authenticated() -> bool {
        Self::get_auth_token().is_some()
    }

    async fn request<T: DeserializeOwned>(method: &str, endpoint: &str) -> ApiResult<T> {
        let url = format!("{}{}", API_BASE_URL, endpoint);

        let mut req = match method {
            "GET" => Request::get(&url),
            "DELETE" => Request::delete(&url),
            _ => return Err(ApiError { message: "Invalid method".to_string(), code: None }),
        };

        if let Some(token) = Self::get_auth_token() {
            req = req.header("Authorization", &format!("Bearer {}", token));
        }

        let response = req.send().await.map_err(|e| ApiError {
            message: e.to_string(),
            code: Some("NETWORK_ERROR".to_string()),
        })?;

        if response.ok() {
            response.json::<T>().await.map_err(|e| ApiError {
                message: e.to_string(),
                code: Some("PARSE_ERROR".to_string()),
            })
        } else {
            let error = response.json::<ApiError>().await.unwrap_or(ApiError {
                message: format!("HTTP Error: {}", response.status()),
                code: Some(format!("HTTP_{}", response.status())),
            });
            Err(error)
        }
    }

    async fn request_with_body<T: DeserializeOwned, B: Serialize>(
        method: &str,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = format!("{}{}", API_BASE_URL, endpoint);

        let mut req = match method {
            "POST" => Request::post(&url),
            "PUT" => Request::put(&url),
            "PATCH" => Request::patch(&url),
            _ => return Err(ApiError { message: "Invalid method".to_string(), code: None }),
        };

        if let Some(token) = Self::get_auth_token() {
            req = req.header("Authorization", &format!("Bearer {}", token));
        }

        let response = req
            .header("Content-Type", "application/json")
            .json(body)
            .map_err(|e| ApiError {
                message: e.to_string(),
                code: Some("SERIALIZE_ERROR".to_string()),
            })?
            .send()
            .await
            .map_err(|e| ApiError {
                message: e.to_string(),
                code: Some("NETWORK_ERROR".to_string()),
            })?;

        if response.ok() {
            response.json::<T>().await.map_err(|e| ApiError {
                message: e.to_string(),
                code: Some("PARSE_ERROR".to_string()),
            })
        } else {
            let error = response.json::<ApiError>().await.unwrap_or(ApiError {
                message: format!("HTTP Error: {}", response.status()),
                code: Some(format!("HTTP_{}", response.status())),
            });
            Err(error)
        }
    }

    /// Multipart upload; the browser sets the content type and boundary.
    async fn post_multipart<T: DeserializeOwned>(
        endpoint: &str,
        form: web_sys::FormData,
    ) -> ApiResult<T> {
        let url = format!("{}{}", API_BASE_URL, endpoint);

        let mut req = Request::post(&url);
        if let Some(token) = Self::get_auth_token() {
            req = req.header("Authorization", &format!("Bearer {}", token));
        }

        let response = req
            .body(form)
            .map_err(|e| ApiError {
                message: e.to_string(),
                code: Some("SERIALIZE_ERROR".to_string()),
            })?
            .send()
            .await
            .map_err(|e| ApiError {
                message: e.to_string(),
                code: Some("NETWORK_ERROR".to_string()),
            })?;

        if response.ok() {
            response.json::<T>().await.map_err(|e| ApiError {
                message: e.to_string(),
                code: Some("PARSE_ERROR".to_string()),
            })
        } else {
            let error = response.json::<ApiError>().await.unwrap_or(ApiError {
                message: format!("HTTP Error: {}", response.status()),
                code: Some(format!("HTTP_{}", response.status())),
            });
            Err(error)
        }
    }

    pub async fn get<T: DeserializeOwned>(endpoint: &str) -> ApiResult<T> {
        Self::request("GET", endpoint).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(endpoint: &str, body: &B) -> ApiResult<T> {
        Self::request_with_body("POST", endpoint, body).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(endpoint: &str, body: &B) -> ApiResult<T> {
        Self::request_with_body("PUT", endpoint, body).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(endpoint: &str, body: &B) -> ApiResult<T> {
        Self::request_with_body("PATCH", endpoint, body).await
    }

    pub async fn delete<T: DeserializeOwned>(endpoint: &str) -> ApiResult<T> {
        Self::request("DELETE", endpoint).await
    }
}

// ============================================
// SESSION SERVICE
// ============================================

pub mod session {
    use super::*;
    use haven_shared::User;

    #[derive(Debug, Clone, Serialize)]
    pub struct LoginRequest {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    pub struct LoginResponse {
        pub token: String,
        pub user: User,
    }

    pub async fn login(email: &str, password: &str) -> ApiResult<LoginResponse> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = ApiClient::post("/auth/login", &req).await?;
        ApiClient::set_auth_token(&response.token);
        Ok(response)
    }

    pub async fn logout() {
        // Revocation failure is not actionable for the user; the local
        // session is torn down regardless.
        let _: ApiResult<()> = ApiClient::post("/auth/logout", &()).await;
    }

    /// Identity plus granted capabilities, fetched once per mount.
    pub async fn current_user() -> ApiResult<User> {
        ApiClient::get("/auth/me").await
    }
}

// ============================================
// DASHBOARD SERVICE
// ============================================

pub mod stats {
    use super::*;
    use haven_shared::DashboardSummary;

    pub async fn summary() -> ApiResult<DashboardSummary> {
        ApiClient::get("/dashboard").await
    }
}

// ============================================
// CONTACTS SERVICE
// ============================================

pub mod contacts {
    use super::*;
    use haven_shared::{Contact, UpdateContactRequest};

    #[derive(Debug, Clone, Serialize)]
    pub struct CreateContactRequest {
        pub first_name: String,
        pub last_name: String,
        pub email: Option<String>,
        pub phone: Option<String>,
    }

    pub async fn list() -> ApiResult<Vec<Contact>> {
        ApiClient::get("/contacts").await
    }

    pub async fn get(id: i64) -> ApiResult<Contact> {
        ApiClient::get(&format!("/contacts/{}", id)).await
    }

    pub async fn create(contact: &CreateContactRequest) -> ApiResult<Contact> {
        ApiClient::post("/contacts", contact).await
    }

    /// Partial update; each editor module sends only its own fields.
    pub async fn update(id: i64, contact: &UpdateContactRequest) -> ApiResult<Contact> {
        ApiClient::patch(&format!("/contacts/{}", id), contact).await
    }

    pub async fn delete(id: i64) -> ApiResult<()> {
        ApiClient::delete(&format!("/contacts/{}", id)).await
    }
}

// ============================================
// TASKS SERVICE
// ============================================

pub mod tasks {
    use super::*;
    use haven_shared::{CreateTaskRequest, Task, UpdateTaskRequest};

    pub async fn list_for_contact(contact_id: i64) -> ApiResult<Vec<Task>> {
        ApiClient::get(&format!("/contacts/{}/tasks", contact_id)).await
    }

    pub async fn create(task: &CreateTaskRequest) -> ApiResult<Task> {
        ApiClient::post("/tasks", task).await
    }

    pub async fn update(id: i64, task: &UpdateTaskRequest) -> ApiResult<Task> {
        ApiClient::patch(&format!("/tasks/{}", id), task).await
    }

    pub async fn delete(id: i64) -> ApiResult<()> {
        ApiClient::delete(&format!("/tasks/{}", id)).await
    }
}

// ============================================
// COMMENTS SERVICE
// ============================================

pub mod comments {
    use super::*;
    use haven_shared::{CreateCommentRequest, UserComment};

    #[derive(Debug, Clone, Serialize)]
    pub struct UpdateCommentRequest {
        pub content: String,
    }

    pub async fn list_for_contact(contact_id: i64) -> ApiResult<Vec<UserComment>> {
        ApiClient::get(&format!("/contacts/{}/comments", contact_id)).await
    }

    pub async fn create(comment: &CreateCommentRequest) -> ApiResult<UserComment> {
        ApiClient::post("/comments", comment).await
    }

    pub async fn update(id: i64, content: &str) -> ApiResult<UserComment> {
        let req = UpdateCommentRequest { content: content.to_string() };
        ApiClient::patch(&format!("/comments/{}", id), &req).await
    }

    pub async fn delete(id: i64) -> ApiResult<()> {
        ApiClient::delete(&format!("/comments/{}", id)).await
    }
}

// ============================================
// PROSPECTS SERVICE
// ============================================

pub mod prospects {
    use super::*;
    use haven_shared::{CreateProspectRequest, Prospect};

    pub async fn list_for_contact(contact_id: i64) -> ApiResult<Vec<Prospect>> {
        ApiClient::get(&format!("/contacts/{}/prospects", contact_id)).await
    }

    pub async fn create(prospect: &CreateProspectRequest) -> ApiResult<Prospect> {
        ApiClient::post("/prospects", prospect).await
    }

    pub async fn update(id: i64, prospect: &CreateProspectRequest) -> ApiResult<Prospect> {
        ApiClient::put(&format!("/prospects/{}", id), prospect).await
    }

    pub async fn delete(id: i64) -> ApiResult<()> {
        ApiClient::delete(&format!("/prospects/{}", id)).await
    }
}

// ============================================
// LISTINGS SERVICE
// ============================================

pub mod listings {
    use super::*;
    use haven_shared::{Listing, ListingContact};

    pub async fn owner_listings_for_contact(contact_id: i64) -> ApiResult<Vec<Listing>> {
        ApiClient::get(&format!("/contacts/{}/listings?relationship=owner", contact_id)).await
    }

    pub async fn buyer_listings_for_contact(contact_id: i64) -> ApiResult<Vec<Listing>> {
        ApiClient::get(&format!("/contacts/{}/listings?relationship=buyer", contact_id)).await
    }

    /// Compact shapes for the association picker.
    pub async fn list_compact(search: &str) -> ApiResult<Vec<Listing>> {
        ApiClient::get(&format!("/listings/compact?q={}", search)).await
    }

    pub async fn add_contact_relationship(
        listing_id: i64,
        contact_id: i64,
        relationship: &str,
    ) -> ApiResult<ListingContact> {
        let body = ListingContact {
            listing_id,
            contact_id,
            relationship: relationship.to_string(),
        };
        ApiClient::post("/listing-contacts", &body).await
    }

    pub async fn remove_contact_relationship(
        listing_id: i64,
        contact_id: i64,
        relationship: &str,
    ) -> ApiResult<()> {
        ApiClient::delete(&format!(
            "/listing-contacts/{}/{}?relationship={}",
            listing_id, contact_id, relationship
        ))
        .await
    }
}

// ============================================
// SITE CONFIGURATION SERVICE
// ============================================

pub mod site {
    use super::*;
    use haven_shared::WebsiteConfig;

    #[derive(Debug, Clone, Deserialize)]
    pub struct UploadResponse {
        pub url: String,
    }

    pub async fn get_config() -> ApiResult<WebsiteConfig> {
        ApiClient::get("/site/config").await
    }

    pub async fn update_config(config: &WebsiteConfig) -> ApiResult<WebsiteConfig> {
        ApiClient::put("/site/config", config).await
    }

    /// Returns the URL the hero `<img>` consumes directly.
    pub async fn upload_hero_image(file: web_sys::File) -> ApiResult<UploadResponse> {
        let form = web_sys::FormData::new().map_err(|_| ApiError {
            message: "FormData unavailable".to_string(),
            code: None,
        })?;
        form.append_with_blob("image", &file).map_err(|_| ApiError {
            message: "Could not attach file".to_string(),
            code: None,
        })?;
        ApiClient::post_multipart("/site/hero/image", form).await
    }

    pub async fn upload_hero_video(file: web_sys::File) -> ApiResult<UploadResponse> {
        let form = web_sys::FormData::new().map_err(|_| ApiError {
            message: "FormData unavailable".to_string(),
            code: None,
        })?;
        form.append_with_blob("video", &file).map_err(|_| ApiError {
            message: "Could not attach file".to_string(),
            code: None,
        })?;
        ApiClient::post_multipart("/site/hero/video", form).await
    }

    pub async fn delete_hero_media(kind: &str) -> ApiResult<()> {
        ApiClient::delete(&format!("/site/hero/{}", kind)).await
    }
}

// ============================================
// TESTIMONIALS SERVICE
// ============================================

pub mod testimonials {
    use super::*;
    use haven_shared::{Testimonial, TestimonialRequest};

    pub async fn list() -> ApiResult<Vec<Testimonial>> {
        ApiClient::get("/testimonials").await
    }

    pub async fn create(testimonial: &TestimonialRequest) -> ApiResult<Testimonial> {
        ApiClient::post("/testimonials", testimonial).await
    }

    pub async fn update(id: i64, testimonial: &TestimonialRequest) -> ApiResult<Testimonial> {
        ApiClient::put(&format!("/testimonials/{}", id), testimonial).await
    }

    pub async fn delete(id: i64) -> ApiResult<()> {
        ApiClient::delete(&format!("/testimonials/{}", id)).await
    }

    /// Replaces an empty list with the starter set.
    pub async fn seed() -> ApiResult<Vec<Testimonial>> {
        ApiClient::post("/testimonials/seed", &()).await
    }
}

// ============================================
// OFFICES SERVICE
// ============================================

pub mod offices {
    use super::*;
    use haven_shared::{Office, OfficeRequest};

    pub async fn list() -> ApiResult<Vec<Office>> {
        ApiClient::get("/offices").await
    }

    pub async fn create(office: &OfficeRequest) -> ApiResult<Office> {
        ApiClient::post("/offices", office).await
    }

    pub async fn update(id: i64, office: &OfficeRequest) -> ApiResult<Office> {
        ApiClient::put(&format!("/offices/{}", id), office).await
    }

    pub async fn delete(id: i64) -> ApiResult<()> {
        ApiClient::delete(&format!("/offices/{}", id)).await
    }
}

// ============================================
// LOCATIONS SERVICE
// ============================================

pub mod locations {
    use super::*;
    use haven_shared::{City, Neighborhood};

    pub async fn all_cities() -> ApiResult<Vec<City>> {
        ApiClient::get("/locations/cities").await
    }

    pub async fn neighborhoods_by_city(city_id: i64) -> ApiResult<Vec<Neighborhood>> {
        ApiClient::get(&format!("/locations/cities/{}/neighborhoods", city_id)).await
    }

    pub async fn location_by_neighborhood(neighborhood_id: i64) -> ApiResult<Neighborhood> {
        ApiClient::get(&format!("/locations/neighborhoods/{}", neighborhood_id)).await
    }
}
