use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use orderwatch_core::{HistoricalSnapshot, Order, OrderDetails, OrderHistory, OrderSnapshot};
use serde_json::json;

use crate::source::OrderSource;
use crate::ApiError;

pub const DEMO_REFERENCE: &str = "RN123456789";
const DEMO_VIN: &str = "XP7YACEF9TB123456";
const DEMO_OPTIONS: &str = "APBS,IPB11,PPSW,SC04,MDLY,WY19P,MTY52,STY5S,CPF0,TW01";

fn demo_order(vin: Option<&str>) -> Order {
    Order {
        reference_number: DEMO_REFERENCE.to_string(),
        order_status: "BOOKED".to_string(),
        model_code: "my".to_string(),
        vin: vin.map(str::to_string),
        is_b2b: false,
        owner_company_name: None,
        is_used: false,
        mkt_options: Some(DEMO_OPTIONS.to_string()),
    }
}

fn demo_tasks_body() -> serde_json::Value {
    json!({
        "tasks": {
            "scheduling": {
                "id": "scheduling",
                "complete": true,
                "enabled": true,
                "required": true,
                "order": 1,
                "card": { "title": "Schedule Delivery", "subtitle": "Your delivery is scheduled" },
                "deliveryWindowDisplay": "May - Jun 2026",
                "apptDateTimeAddressStr": "June 15, 2026 at 10:00 AM",
                "deliveryType": "PICKUP_SERVICE_CENTER",
                "deliveryAddressTitle": "Utrecht - Eendrachtlaan"
            },
            "registration": {
                "id": "registration",
                "complete": true,
                "enabled": true,
                "required": true,
                "order": 2,
                "card": { "title": "Registration", "subtitle": "Registration complete" },
                "orderDetails": {
                    "vehicleRoutingLocation": "Tilburg Factory",
                    "vehicleOdometer": "50",
                    "vehicleOdometerType": "km",
                    "reservationDate": "2024-01-15",
                    "orderBookedDate": "2024-03-20",
                    "reservationAmountReceived": 250,
                    "currencyFormat": { "currencyCode": "EUR" }
                }
            },
            "finalPayment": {
                "id": "finalPayment",
                "complete": false,
                "enabled": true,
                "required": true,
                "order": 3,
                "card": { "title": "Final Payment", "subtitle": "Complete your payment before delivery" },
                "amountDue": 39120,
                "data": { "etaToDeliveryCenter": "June 10, 2026" }
            },
            "deliveryDetails": {
                "id": "deliveryDetails",
                "complete": true,
                "enabled": true,
                "required": false,
                "order": 4,
                "card": { "title": "Delivery Details", "subtitle": "Review your delivery information" },
                "regData": { "reggieLicensePlate": "AB-123-CD" }
            },
            "tradeIn": {
                "id": "tradeIn",
                "complete": true,
                "enabled": true,
                "required": false,
                "order": 5,
                "card": { "title": "Trade-In", "subtitle": "Trade-in vehicle submitted" },
                "tradeInVehicle": {
                    "make": "Volkswagen",
                    "model": "Golf",
                    "year": "2019",
                    "mileage": 69500,
                    "mileageUnitOfMeasure": "km",
                    "condition": "Fair"
                }
            },
            "insurance": {
                "id": "insurance",
                "complete": false,
                "enabled": true,
                "required": false,
                "order": 6,
                "card": { "title": "Insurance", "subtitle": "Add insurance before delivery" }
            },
            "financing": {
                "id": "financing",
                "complete": true,
                "enabled": true,
                "required": true,
                "order": 7,
                "card": {
                    "title": "Financing",
                    "subtitle": "Payment method selected",
                    "messageTitle": "Pay With",
                    "messageBody": "Cash"
                }
            }
        }
    })
}

/// Canned order data for running without an account.
#[derive(Debug, Clone)]
pub struct DemoSource {
    snapshot: OrderSnapshot,
}

impl DemoSource {
    pub fn new() -> Self {
        Self {
            snapshot: OrderSnapshot::new(
                demo_order(Some(DEMO_VIN)),
                OrderDetails::from_value(demo_tasks_body()),
            ),
        }
    }

    pub fn snapshot(&self) -> &OrderSnapshot {
        &self.snapshot
    }

    /// Two earlier observations of the demo order, so a fresh demo home has
    /// changes to show.
    pub fn seed_history(&self, now: DateTime<Utc>) -> OrderHistory {
        let earlier = |vin: Option<&str>, window: &str| {
            OrderSnapshot::new(
                demo_order(vin),
                OrderDetails::from_value(json!({
                    "scheduling": { "deliveryWindowDisplay": window }
                })),
            )
        };
        let mut history = OrderHistory::new(DEMO_REFERENCE);
        history.push(HistoricalSnapshot::new(
            now - Duration::hours(72),
            earlier(None, "Apr - May 2026"),
        ));
        history.push(HistoricalSnapshot::new(
            now - Duration::hours(24),
            earlier(Some(DEMO_VIN), "May - Jun 2026"),
        ));
        history
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderSource for DemoSource {
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        Ok(vec![self.snapshot.order.clone()])
    }

    async fn fetch_order_details(&self, reference: &str) -> Result<OrderDetails, ApiError> {
        if reference != self.snapshot.reference_number() {
            return Err(ApiError::UnknownOrder(reference.to_string()));
        }
        Ok(self.snapshot.details.clone())
    }
}
