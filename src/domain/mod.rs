pub mod fees;
pub mod ports;
pub mod transaction;
