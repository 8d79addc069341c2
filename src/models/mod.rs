pub mod booking;
pub mod filters;
pub mod review;
pub mod space;
pub mod user;

pub use booking::{Booking, BookingDraft, BookingSummary, Recurrence, RecurrenceType};
pub use filters::FiltersState;
pub use review::Review;
pub use space::{AvailabilityMap, Location, Space, SpaceType};
pub use user::User;
