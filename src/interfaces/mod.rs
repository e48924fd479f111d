pub mod csv;
pub mod runner;
