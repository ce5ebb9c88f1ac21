// handlers/public/mod.rs - endpoints reachable without a bearer token

pub mod auth;
