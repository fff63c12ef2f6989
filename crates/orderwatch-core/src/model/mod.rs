pub mod details;
pub mod order;
pub mod snapshot;
pub mod tasks;

pub use details::{KnownTask, OrderDetails, RawTask, TaskEntry};
pub use order::{Order, OrdersResponse};
pub use snapshot::OrderSnapshot;
pub use tasks::{
    Appointment, DeliveryDetailsTask, FinalPaymentData, FinalPaymentTask, OrderTasks, RegData,
    RegistrationOrderDetails, RegistrationTask, SchedulingTask, TaskCard, TaskState,
};

/// Display value standing in for any absent or empty field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Absent and empty values both collapse to [`NOT_AVAILABLE`].
pub fn display_or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
