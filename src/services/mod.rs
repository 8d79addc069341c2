pub mod availability;
pub mod catalog;
pub mod geo;
pub mod recurrence;
pub mod remote;
pub mod scheduling;
pub mod search;
