pub mod history;
pub mod point;
pub mod ports;
