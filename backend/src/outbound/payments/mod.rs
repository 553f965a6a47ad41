//! Payment gateway adapters.

mod razorpay;

pub use razorpay::{RazorpayConfig, RazorpayGateway};
