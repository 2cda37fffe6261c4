//! Payment Endpoints

use serde::Serialize;

use super::{ApiClient, ApiMessage};
use crate::error::AppResult;
use crate::models::{PaymentOrder, PaymentReceipt};

pub const PAYMENT_ORDERS: &str = "/payments/orders";
pub const PAYMENT_VERIFY: &str = "/payments/verify";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderRequest<'a> {
    material_id: &'a str,
}

impl ApiClient {
    /// Create the provider order a checkout is opened against
    pub async fn create_payment_order(&self, material_id: &str) -> AppResult<PaymentOrder> {
        self.post(PAYMENT_ORDERS, &OrderRequest { material_id }).await
    }

    /// Hand the provider's success payload to the server for signature checks
    pub async fn verify_payment(&self, receipt: &PaymentReceipt) -> AppResult<ApiMessage> {
        self.post(PAYMENT_VERIFY, receipt).await
    }
}
