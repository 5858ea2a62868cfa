pub mod config;
pub mod domain {
    pub mod payment_request;
    pub mod verification;
}
pub mod gateways;
pub mod http {
    pub mod handlers {
        pub mod reconcile;
    }
}
pub mod repo {
    pub mod payment_requests_repo;
}
pub mod session;
pub mod service {
    pub mod reconciliation_service;
}
pub mod verify {
    pub mod amount;
    pub mod resolution;
}

#[derive(Clone)]
pub struct AppState {
    pub reconciliation: service::reconciliation_service::ReconciliationService,
}
