pub mod course;
pub mod user;

pub use course::{Course, ToggleCourseRequest};
pub use user::{LoginRequest, LoginResponse, User};
