use serde::{Deserialize, Serialize};

use super::NOT_AVAILABLE;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCard {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_body: Option<String>,
}

/// Fields every task in the tasks payload carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskState {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub complete: bool,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<TaskCard>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingTask {
    #[serde(flatten)]
    pub state: TaskState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_window_display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appt_date_time_address_str: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address_title: Option<String>,
    #[serde(default)]
    pub is_self_scheduling_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_scheduling_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationOrderDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_routing_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_odometer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_odometer_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_booked_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationTask {
    #[serde(flatten)]
    pub state: TaskState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_details: Option<RegistrationOrderDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalPaymentData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta_to_delivery_center: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalPaymentTask {
    #[serde(flatten)]
    pub state: TaskState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<FinalPaymentData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reggie_license_plate: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetailsTask {
    #[serde(flatten)]
    pub state: TaskState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reg_data: Option<RegData>,
}

/// The four tasks the dashboard models. Each is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTasks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduling: Option<SchedulingTask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<RegistrationTask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_payment: Option<FinalPaymentTask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_details: Option<DeliveryDetailsTask>,
}

/// Appointment text split into its parts.
///
/// The scheduling task reports appointments as
/// `"August 15, 2024 at 10:00 AM - Delivery Center, 123 Electric Ave"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Appointment {
    pub date: String,
    pub time: String,
    pub address: String,
}

impl Appointment {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw == NOT_AVAILABLE {
            return None;
        }

        let (date, rest) = match raw.split_once(" at ") {
            Some((date, rest)) => (date.trim(), rest),
            None => {
                return Some(Self {
                    date: raw.to_string(),
                    ..Self::default()
                })
            }
        };

        let (time, address) = match rest.split_once(" - ") {
            Some((time, address)) => (time.trim(), address.trim()),
            None => (rest.trim(), ""),
        };

        Some(Self {
            date: date.to_string(),
            time: time.to_string(),
            address: address.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_appointment() {
        let appt =
            Appointment::parse("August 15, 2024 at 10:00 AM - Delivery Center, 123 Electric Ave")
                .unwrap();
        assert_eq!(appt.date, "August 15, 2024");
        assert_eq!(appt.time, "10:00 AM");
        assert_eq!(appt.address, "Delivery Center, 123 Electric Ave");
    }

    #[test]
    fn parses_partial_appointments() {
        let date_only = Appointment::parse("August 15, 2024").unwrap();
        assert_eq!(date_only.date, "August 15, 2024");
        assert!(date_only.time.is_empty());

        let no_address = Appointment::parse("June 15, 2026 at 10:00 AM").unwrap();
        assert_eq!(no_address.time, "10:00 AM");
        assert!(no_address.address.is_empty());
    }

    #[test]
    fn sentinel_is_not_an_appointment() {
        assert!(Appointment::parse("").is_none());
        assert!(Appointment::parse("N/A").is_none());
    }

    #[test]
    fn scheduling_task_flattens_shared_fields() {
        let json = serde_json::json!({
            "id": "scheduling",
            "complete": true,
            "order": 1,
            "card": {"title": "Schedule Delivery", "subtitle": "Scheduled"},
            "deliveryWindowDisplay": "May - Jun 2026",
            "deliveryType": null,
        });
        let task: SchedulingTask = serde_json::from_value(json).unwrap();
        assert_eq!(task.state.id, "scheduling");
        assert!(task.state.complete);
        assert_eq!(task.state.order, 1);
        assert_eq!(task.delivery_window_display.as_deref(), Some("May - Jun 2026"));
        assert!(task.delivery_type.is_none());
    }
}
