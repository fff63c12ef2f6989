use serde::{Deserialize, Serialize};

use super::display_or_na;

/// Order summary as returned by the orders listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub reference_number: String,
    #[serde(default)]
    pub order_status: String,
    #[serde(default)]
    pub model_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default)]
    pub is_b2b: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_company_name: Option<String>,
    #[serde(default)]
    pub is_used: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mkt_options: Option<String>,
}

/// The listing endpoint wraps orders in a `response` field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrdersResponse {
    #[serde(default)]
    pub response: Vec<Order>,
}

impl Order {
    pub fn vin_display(&self) -> String {
        display_or_na(self.vin.as_deref())
    }

    pub fn status_display(&self) -> String {
        display_or_na(Some(&self.order_status))
    }

    pub fn options_display(&self) -> String {
        display_or_na(self.mkt_options.as_deref())
    }

    pub fn model_name(&self) -> String {
        match self.model_code.to_ascii_lowercase().as_str() {
            "ms" | "s" => "Model S".to_string(),
            "m3" | "3" => "Model 3".to_string(),
            "mx" | "x" => "Model X".to_string(),
            "my" | "y" => "Model Y".to_string(),
            "ct" | "cybertruck" => "Cybertruck".to_string(),
            _ => self.model_code.clone(),
        }
    }
}
