//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the calculation core and the history repository.

pub mod bmi;

pub use bmi::BmiService;
