pub mod document;
pub mod movement;
pub mod otp;
pub mod product;
pub mod user;
pub mod warehouse;
