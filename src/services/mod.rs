pub mod fees;
pub mod session_service;
