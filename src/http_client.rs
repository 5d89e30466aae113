use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON client for REST document stores. When an API key is set it is sent
/// as the `key` query parameter on every request.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    api_key: Option<String>,
}

impl HttpClient {
    pub fn new(api_key: Option<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
        })
    }

    fn keyed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.query(&[("key", key)]),
            None => builder,
        }
    }

    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, reqwest::Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.keyed(self.client.post(url))
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn delete(&self, url: &str) -> Result<(), reqwest::Error> {
        self.keyed(self.client.delete(url))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
