pub mod car;
pub mod parking_lot;
pub mod parking_session;
pub mod user;

pub use car::{normalize_plate, Car, NewCar};
pub use parking_lot::{NewParkingLot, ParkingLot};
pub use parking_session::ParkingSession;
pub use user::User;
