use crate::gateways::{CheckoutGateway, CheckoutStatus, GatewayError};

pub struct SumupGateway {
    pub base_url: String,
    pub api_key: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

#[async_trait::async_trait]
impl CheckoutGateway for SumupGateway {
    fn name(&self) -> &'static str {
        "sumup"
    }

    async fn get_checkout_status(&self, session_id: &str) -> Result<CheckoutStatus, GatewayError> {
        let url = format!("{}/v0.1/checkouts/{}", self.base_url, session_id);

        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await;

        match resp {
            Ok(r) if r.status().is_success() => {
                r.json::<CheckoutStatus>().await.map_err(|e| GatewayError::Parse(e.to_string()))
            }
            Ok(r) => {
                let status = r.status().as_u16();
                let body = r.text().await.unwrap_or_default();
                Err(GatewayError::Http {
                    status,
                    body: body.chars().take(200).collect(),
                })
            }
            Err(e) if e.is_timeout() => Err(GatewayError::Timeout),
            Err(e) => Err(GatewayError::Network(e.to_string())),
        }
    }
}
