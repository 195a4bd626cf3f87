//! HTTP implementation of [`PriceApi`] over `gloo-net`.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use orderdesk_core::api::{PriceApi, price_list_path, unit_price_path};
use orderdesk_core::{Money, NetworkError, PriceListEntry, UnitPriceBody};
use serde::de::DeserializeOwned;

/// Talks to the sales backend below `base` (normally `/api`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpPriceApi {
    base: String,
}

impl HttpPriceApi {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }
}

async fn get_json<T: DeserializeOwned>(url: String) -> Result<T, NetworkError> {
    let resp: Response = Request::get(&url)
        .send()
        .await
        .map_err(|err| NetworkError::Transport {
            url: url.clone(),
            message: err.to_string(),
        })?;
    if !resp.ok() {
        return Err(NetworkError::Status {
            url,
            status: resp.status(),
        });
    }
    resp.json::<T>().await.map_err(|err| NetworkError::Decode {
        url,
        message: err.to_string(),
    })
}

#[async_trait(?Send)]
impl PriceApi for HttpPriceApi {
    async fn price_list(&self, customer_id: &str) -> Result<Vec<PriceListEntry>, NetworkError> {
        get_json(price_list_path(&self.base, customer_id)).await
    }

    async fn unit_price(
        &self,
        customer_id: &str,
        product_id: &str,
    ) -> Result<Option<Money>, NetworkError> {
        let body: UnitPriceBody =
            get_json(unit_price_path(&self.base, customer_id, product_id)).await?;
        Ok(body.price)
    }
}
