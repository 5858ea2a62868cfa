use crate::gateways::{CheckoutGateway, CheckoutStatus, CheckoutTransaction, GatewayError};

pub struct MockGateway {
    pub behavior: String,
    pub transaction: Option<CheckoutTransaction>,
}

#[async_trait::async_trait]
impl CheckoutGateway for MockGateway {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get_checkout_status(&self, _session_id: &str) -> Result<CheckoutStatus, GatewayError> {
        match self.behavior.as_str() {
            "ALWAYS_TIMEOUT" => Err(GatewayError::Timeout),
            "ALWAYS_NETWORK_ERROR" => Err(GatewayError::Network("mock network failure".to_string())),
            "ALWAYS_PENDING" => Ok(CheckoutStatus {
                status: "PENDING".to_string(),
                transactions: vec![],
                amount: None,
                currency: None,
            }),
            "ALWAYS_FAILED" => Ok(CheckoutStatus {
                status: "FAILED".to_string(),
                transactions: vec![],
                amount: None,
                currency: None,
            }),
            "ALWAYS_PAID_UNSETTLED" => Ok(CheckoutStatus {
                status: "PAID".to_string(),
                transactions: vec![],
                amount: None,
                currency: None,
            }),
            _ => {
                let tx = self.transaction.clone().unwrap_or_else(|| CheckoutTransaction {
                    transaction_code: Some(format!("mock_txn_{}", uuid::Uuid::new_v4())),
                    id: None,
                    amount: Some(10.0),
                    currency: Some("EUR".to_string()),
                    payment_type: Some("CARD".to_string()),
                });
                Ok(CheckoutStatus {
                    status: "PAID".to_string(),
                    amount: tx.amount,
                    currency: tx.currency.clone(),
                    transactions: vec![tx],
                })
            }
        }
    }
}
