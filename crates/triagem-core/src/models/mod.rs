pub mod response;
pub mod result;
pub mod risk;
pub mod session;
pub mod severity;
