//! The guarded document delivery path.

pub mod outcome;
pub mod pipeline;
pub mod request;

pub use outcome::{Delivery, DeliveryFailure, Disposition};
pub use pipeline::{DeliveryComponents, DeliveryPipeline};
pub use request::{ClientInfo, DeliveryRequest};
