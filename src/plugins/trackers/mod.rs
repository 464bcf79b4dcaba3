pub mod price;

pub use price::{PriceTracker, PriceWindow};
