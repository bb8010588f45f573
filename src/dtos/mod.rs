pub mod adjustment;
pub mod dashboard;
pub mod delivery;
pub mod document;
pub mod movement;
pub mod otp;
pub mod product;
pub mod receipt;
pub mod stock;
pub mod transfer;
pub mod user;
pub mod warehouse;
