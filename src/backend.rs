use crate::errors::FetchError;
use crate::models::{ActivityCatalog, ApiReply, Donation, DonationStats, ReplyBody};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// The REST backend the front end talks to.
pub trait Backend {
    fn activities(&self) -> impl Future<Output = Result<ActivityCatalog, FetchError>> + Send;

    fn signup(
        &self,
        activity: &str,
        email: &str,
    ) -> impl Future<Output = Result<ApiReply, FetchError>> + Send;

    fn unregister(
        &self,
        activity: &str,
        email: &str,
    ) -> impl Future<Output = Result<ApiReply, FetchError>> + Send;

    fn donate(
        &self,
        donation: &Donation,
    ) -> impl Future<Output = Result<ApiReply, FetchError>> + Send;

    fn donation_stats(&self) -> impl Future<Output = Result<DonationStats, FetchError>> + Send;
}

#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(format!("backend url {base_url} cannot carry a path").into());
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| transport(&url, err))?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        response.json::<T>().await.map_err(|err| decode(&url, err))
    }

    async fn reply(&self, url: &Url, request: RequestBuilder) -> Result<ApiReply, FetchError> {
        let response = request.send().await.map_err(|err| transport(url, err))?;
        let status = response.status().as_u16();
        let body = response
            .json::<ReplyBody>()
            .await
            .map_err(|err| decode(url, err))?;
        debug!(%url, status, "backend replied");
        Ok(ApiReply { status, body })
    }
}

impl Backend for HttpBackend {
    async fn activities(&self) -> Result<ActivityCatalog, FetchError> {
        self.fetch_json(self.endpoint(&["activities"])).await
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<ApiReply, FetchError> {
        let url = self.endpoint(&["activities", activity, "signup"]);
        debug!(%url, "POST");
        let request = self.client.post(url.clone()).query(&[("email", email)]);
        self.reply(&url, request).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<ApiReply, FetchError> {
        let url = self.endpoint(&["activities", activity, "unregister"]);
        debug!(%url, "DELETE");
        let request = self.client.delete(url.clone()).query(&[("email", email)]);
        self.reply(&url, request).await
    }

    async fn donate(&self, donation: &Donation) -> Result<ApiReply, FetchError> {
        let url = self.endpoint(&["donations"]);
        debug!(%url, amount = donation.amount, "POST");
        let amount = donation.amount.to_string();
        let request = self.client.post(url.clone()).query(&[
            ("amount", amount.as_str()),
            ("name", donation.name.as_str()),
            ("email", donation.email.as_str()),
            ("message", donation.message.as_str()),
        ]);
        self.reply(&url, request).await
    }

    async fn donation_stats(&self) -> Result<DonationStats, FetchError> {
        self.fetch_json(self.endpoint(&["donations", "stats"])).await
    }
}

fn transport(url: &Url, err: reqwest::Error) -> FetchError {
    FetchError::Transport {
        url: url.to_string(),
        msg: err.to_string(),
    }
}

fn decode(url: &Url, err: reqwest::Error) -> FetchError {
    FetchError::Decode {
        url: url.to_string(),
        msg: err.to_string(),
    }
}
