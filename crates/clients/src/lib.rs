mod consts;
mod razorpay;

pub use consts::*;
pub use razorpay::{RazorpayClient, RazorpayEnv};
