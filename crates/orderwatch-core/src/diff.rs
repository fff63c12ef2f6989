use serde::{Deserialize, Serialize};

use crate::model::OrderSnapshot;

/// A single field whose display value differs between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDiff {
    pub field: String,
    pub old_value: String,
    pub new_value: String,
}

/// Fields compared by [`compare`], in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffField {
    OrderStatus,
    Vin,
    DeliveryWindow,
    DeliveryAppointment,
    EtaToDeliveryCenter,
    VehicleLocation,
    DeliveryMethod,
    DeliveryCenter,
    Odometer,
    LicensePlate,
    ReservationDate,
    OrderBookedDate,
    VehicleOptions,
}

impl DiffField {
    pub const ALL: [DiffField; 13] = [
        DiffField::OrderStatus,
        DiffField::Vin,
        DiffField::DeliveryWindow,
        DiffField::DeliveryAppointment,
        DiffField::EtaToDeliveryCenter,
        DiffField::VehicleLocation,
        DiffField::DeliveryMethod,
        DiffField::DeliveryCenter,
        DiffField::Odometer,
        DiffField::LicensePlate,
        DiffField::ReservationDate,
        DiffField::OrderBookedDate,
        DiffField::VehicleOptions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DiffField::OrderStatus => "Order Status",
            DiffField::Vin => "VIN",
            DiffField::DeliveryWindow => "Delivery Window",
            DiffField::DeliveryAppointment => "Delivery Appointment",
            DiffField::EtaToDeliveryCenter => "ETA to Delivery Center",
            DiffField::VehicleLocation => "Vehicle Location",
            DiffField::DeliveryMethod => "Delivery Method",
            DiffField::DeliveryCenter => "Delivery Center",
            DiffField::Odometer => "Odometer",
            DiffField::LicensePlate => "License Plate",
            DiffField::ReservationDate => "Reservation Date",
            DiffField::OrderBookedDate => "Order Booked Date",
            DiffField::VehicleOptions => "Vehicle Options",
        }
    }

    pub fn display_value(self, snapshot: &OrderSnapshot) -> String {
        match self {
            DiffField::OrderStatus => snapshot.status(),
            DiffField::Vin => snapshot.vin(),
            DiffField::DeliveryWindow => snapshot.delivery_window(),
            DiffField::DeliveryAppointment => snapshot.delivery_appointment(),
            DiffField::EtaToDeliveryCenter => snapshot.eta_to_delivery_center(),
            DiffField::VehicleLocation => snapshot.vehicle_location(),
            DiffField::DeliveryMethod => snapshot.delivery_type(),
            DiffField::DeliveryCenter => snapshot.delivery_center(),
            DiffField::Odometer => snapshot.odometer(),
            DiffField::LicensePlate => snapshot.license_plate(),
            DiffField::ReservationDate => snapshot.reservation_date(),
            DiffField::OrderBookedDate => snapshot.order_booked_date(),
            DiffField::VehicleOptions => snapshot.options(),
        }
    }
}

/// Compare two snapshots field by field on their display values.
///
/// Diffs come back in [`DiffField::ALL`] order. Identical inputs give an
/// empty vec.
pub fn compare(old: &OrderSnapshot, new: &OrderSnapshot) -> Vec<OrderDiff> {
    DiffField::ALL
        .into_iter()
        .filter_map(|field| {
            let old_value = field.display_value(old);
            let new_value = field.display_value(new);
            (old_value != new_value).then(|| OrderDiff {
                field: field.label().to_string(),
                old_value,
                new_value,
            })
        })
        .collect()
}
