pub mod pricing;
pub mod template;

pub use pricing::{PricingEngine, PricingError};
pub use template::{RoomTemplate, RowTemplate, TemplateError};
