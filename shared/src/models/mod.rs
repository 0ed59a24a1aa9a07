//! Domain models
//!
//! Plain data types shared between the server and its tests. Lifecycle
//! rules live on the entities themselves ([`Reservation::accept`] and
//! friends) so legality is enforced in one place.

pub mod reservation;
pub mod restaurant;
pub mod serde_helpers;
pub mod settings;
pub mod user;

pub use reservation::{Reservation, ReservationCreate, ReservationStatus};
pub use restaurant::{Restaurant, RestaurantCreate};
pub use settings::{AcceptanceMode, OpeningHours, Settings, SettingsUpdate, Shift, TimeSlotInterval};
pub use user::{User, UserRole};
