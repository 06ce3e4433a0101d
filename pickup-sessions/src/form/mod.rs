pub mod signup;
pub mod export;

pub use signup::{SignupRequest, validate_signup};
pub use export::{export_roster_to_csv, write_roster};
