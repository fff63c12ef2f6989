pub mod diff;
pub mod error;
pub mod history;
pub mod model;
pub mod options;
pub mod vin;

pub use diff::{compare, DiffField, OrderDiff};
pub use error::CoreError;
pub use history::{HistoricalSnapshot, OrderHistory, RETENTION_LIMIT};
pub use model::{Order, OrderDetails, OrderSnapshot, NOT_AVAILABLE};
