use std::path::PathBuf;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{
    multipart::{Form, Part},
    Client, RequestBuilder,
};
use serde::de::DeserializeOwned;

use tg_boundary::{
    Category, LikeState, NewCategory, NewPlace, NewReview, Place, Review, UpdatePlace,
};
use tg_core::{
    gateways::{DirectoryGateway, PlaceQuery},
    outcome::Outcome,
};

use crate::{into_ack, into_outcome};

/// Authorized Tourist Guide API. The bearer token is attached to every
/// request.
#[derive(Clone)]
pub struct UserApi {
    url: String,
    token: String,
    client: Client,
}

impl UserApi {
    #[must_use]
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            client: Client::new(),
        }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    fn auth_header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }

    fn with_auth(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("Authorization", self.auth_header_value())
    }

    async fn send<T>(&self, req: RequestBuilder) -> Outcome<T>
    where
        T: DeserializeOwned,
    {
        into_outcome(self.with_auth(req).send().await).await
    }

    async fn send_ack(&self, req: RequestBuilder) -> Outcome<()> {
        into_ack(self.with_auth(req).send().await).await
    }
}

#[async_trait]
impl DirectoryGateway for UserApi {
    async fn places(&self, query: &PlaceQuery) -> Outcome<Vec<Place>> {
        let url = places_url(&self.url, query);
        self.send(self.client.get(&url)).await
    }

    async fn my_places(&self) -> Outcome<Vec<Place>> {
        let url = format!("{}/places/user/my-places", self.url);
        self.send(self.client.get(&url)).await
    }

    async fn place(&self, place_id: &str) -> Outcome<Place> {
        let url = format!("{}/places/{place_id}", self.url);
        self.send(self.client.get(&url)).await
    }

    async fn create_place(&self, place: &NewPlace, images: &[PathBuf]) -> Outcome<Place> {
        let mut form = Form::new()
            .text("name", place.name.clone())
            .text("location", place.location.clone())
            .text("city", place.city.clone())
            .text("description", place.description.clone())
            .text("category", place.category.clone());
        if let Some(link) = &place.link {
            form = form.text("link", link.clone());
        }
        let form = match attach_images(form, images).await {
            Ok(form) => form,
            Err(cause) => return Outcome::TransportError(cause),
        };
        let url = format!("{}/places", self.url);
        self.send(self.client.post(&url).multipart(form)).await
    }

    async fn update_place(
        &self,
        place_id: &str,
        update: &UpdatePlace,
        images: &[PathBuf],
    ) -> Outcome<Place> {
        let mut form = Form::new();
        if let Some(name) = &update.name {
            form = form.text("name", name.clone());
        }
        if let Some(location) = &update.location {
            form = form.text("location", location.clone());
        }
        if let Some(city) = &update.city {
            form = form.text("city", city.clone());
        }
        if let Some(description) = &update.description {
            form = form.text("description", description.clone());
        }
        if let Some(category) = &update.category {
            form = form.text("category", category.clone());
        }
        if let Some(link) = &update.link {
            form = form.text("link", link.clone());
        }
        let form = match attach_images(form, images).await {
            Ok(form) => form,
            Err(cause) => return Outcome::TransportError(cause),
        };
        let url = format!("{}/places/{place_id}", self.url);
        self.send(self.client.put(&url).multipart(form)).await
    }

    async fn delete_place(&self, place_id: &str) -> Outcome<()> {
        let url = format!("{}/places/{place_id}", self.url);
        self.send_ack(self.client.delete(&url)).await
    }

    async fn pending_places(&self) -> Outcome<Vec<Place>> {
        let url = format!("{}/places/pending", self.url);
        self.send(self.client.get(&url)).await
    }

    async fn approve_place(&self, place_id: &str) -> Outcome<()> {
        let url = format!("{}/places/{place_id}/approve", self.url);
        self.send_ack(self.client.put(&url)).await
    }

    async fn categories(&self) -> Outcome<Vec<Category>> {
        let url = format!("{}/categories", self.url);
        self.send(self.client.get(&url)).await
    }

    async fn create_category(&self, category: &NewCategory) -> Outcome<Category> {
        let url = format!("{}/categories", self.url);
        self.send(self.client.post(&url).json(category)).await
    }

    async fn toggle_like(&self, place_id: &str) -> Outcome<LikeState> {
        let url = format!("{}/likes/{place_id}", self.url);
        self.send(self.client.post(&url)).await
    }

    async fn liked_places(&self) -> Outcome<Vec<Place>> {
        let url = format!("{}/likes", self.url);
        self.send(self.client.get(&url)).await
    }

    async fn like_status(&self, place_id: &str) -> Outcome<LikeState> {
        let url = format!("{}/likes/{place_id}/status", self.url);
        self.send(self.client.get(&url)).await
    }

    async fn reviews(&self, place_id: &str) -> Outcome<Vec<Review>> {
        let url = format!("{}/reviews/{place_id}", self.url);
        self.send(self.client.get(&url)).await
    }

    async fn add_review(&self, place_id: &str, review: &NewReview) -> Outcome<Review> {
        let url = format!("{}/reviews/{place_id}", self.url);
        self.send(self.client.post(&url).json(review)).await
    }

    async fn update_review(&self, review_id: &str, review: &NewReview) -> Outcome<Review> {
        let url = format!("{}/reviews/{review_id}", self.url);
        self.send(self.client.put(&url).json(review)).await
    }

    async fn delete_review(&self, review_id: &str) -> Outcome<()> {
        let url = format!("{}/reviews/{review_id}", self.url);
        self.send_ack(self.client.delete(&url)).await
    }
}

fn places_url(endpoint_url: &str, query: &PlaceQuery) -> String {
    let mut url = format!("{endpoint_url}/places");
    if !query.is_empty() {
        let PlaceQuery {
            category,
            search,
            city,
        } = query;
        let mut params = vec![];
        if let Some(category) = category {
            params.push(("category", encode(category)));
        }
        if let Some(search) = search {
            params.push(("search", encode(search)));
        }
        if let Some(city) = city {
            params.push(("city", encode(city)));
        }
        let params = params
            .into_iter()
            .map(|(key, value)| [key, &value].join("="))
            .collect::<Vec<_>>()
            .join("&");
        url = format!("{url}?{params}");
    }
    url
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

/// Streams each image into a multipart `images` part. Reading a local
/// file can fail before any request is made; the caller reports that as
/// a transport problem.
async fn attach_images(mut form: Form, images: &[PathBuf]) -> Result<Form, String> {
    for path in images {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| format!("Unable to read {}: {err}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        form = form.part("images", Part::bytes(bytes).file_name(file_name));
    }
    Ok(form)
}
