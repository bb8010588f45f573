pub mod inventory;
pub mod otp;
