pub mod construction;
pub mod hvac;
pub mod materials;
pub mod schedule;
pub mod settings;
