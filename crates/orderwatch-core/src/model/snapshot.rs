use serde::{Deserialize, Serialize};

use super::details::OrderDetails;
use super::order::Order;
use super::tasks::{Appointment, RegistrationOrderDetails, SchedulingTask};
use super::{display_or_na, NOT_AVAILABLE};

/// One observation of an order: the listing entry plus its task details.
///
/// Every accessor yields a display string, with [`NOT_AVAILABLE`] standing in
/// for an absent sub-object or an empty field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub order: Order,
    #[serde(default)]
    pub details: OrderDetails,
}

impl OrderSnapshot {
    pub fn new(order: Order, details: OrderDetails) -> Self {
        Self { order, details }
    }

    pub fn reference_number(&self) -> &str {
        &self.order.reference_number
    }

    pub fn status(&self) -> String {
        self.order.status_display()
    }

    pub fn vin(&self) -> String {
        self.order.vin_display()
    }

    pub fn options(&self) -> String {
        self.order.options_display()
    }

    fn scheduling(&self) -> Option<&SchedulingTask> {
        self.details.tasks.scheduling.as_ref()
    }

    fn registration_details(&self) -> Option<&RegistrationOrderDetails> {
        self.details
            .tasks
            .registration
            .as_ref()
            .and_then(|r| r.order_details.as_ref())
    }

    pub fn delivery_window(&self) -> String {
        display_or_na(self.scheduling().and_then(|s| s.delivery_window_display.as_deref()))
    }

    pub fn delivery_appointment(&self) -> String {
        display_or_na(
            self.scheduling()
                .and_then(|s| s.appt_date_time_address_str.as_deref()),
        )
    }

    pub fn parsed_appointment(&self) -> Option<Appointment> {
        Appointment::parse(&self.delivery_appointment())
    }

    pub fn delivery_type(&self) -> String {
        display_or_na(self.scheduling().and_then(|s| s.delivery_type.as_deref()))
    }

    pub fn delivery_center(&self) -> String {
        display_or_na(
            self.scheduling()
                .and_then(|s| s.delivery_address_title.as_deref()),
        )
    }

    pub fn eta_to_delivery_center(&self) -> String {
        display_or_na(
            self.details
                .tasks
                .final_payment
                .as_ref()
                .and_then(|p| p.data.as_ref())
                .and_then(|d| d.eta_to_delivery_center.as_deref()),
        )
    }

    pub fn vehicle_location(&self) -> String {
        display_or_na(
            self.registration_details()
                .and_then(|d| d.vehicle_routing_location.as_deref()),
        )
    }

    /// Odometer reading with its unit when one is reported.
    pub fn odometer(&self) -> String {
        let Some(details) = self.registration_details() else {
            return NOT_AVAILABLE.to_string();
        };
        match (
            details.vehicle_odometer.as_deref().filter(|v| !v.is_empty()),
            details.vehicle_odometer_type.as_deref().filter(|u| !u.is_empty()),
        ) {
            (Some(value), Some(unit)) => format!("{value} {unit}"),
            (Some(value), None) => value.to_string(),
            (None, _) => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn license_plate(&self) -> String {
        display_or_na(
            self.details
                .tasks
                .delivery_details
                .as_ref()
                .and_then(|d| d.reg_data.as_ref())
                .and_then(|r| r.reggie_license_plate.as_deref()),
        )
    }

    pub fn reservation_date(&self) -> String {
        display_or_na(
            self.registration_details()
                .and_then(|d| d.reservation_date.as_deref()),
        )
    }

    pub fn order_booked_date(&self) -> String {
        display_or_na(
            self.registration_details()
                .and_then(|d| d.order_booked_date.as_deref()),
        )
    }
}
