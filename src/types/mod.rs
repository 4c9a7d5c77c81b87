pub mod country;
pub mod session;
pub mod view;

pub use country::Country;
pub use session::FlatSession;
