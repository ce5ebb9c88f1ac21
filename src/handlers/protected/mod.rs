// handlers/protected/mod.rs - endpoints requiring a valid bearer token
//
// Route prefix: /api/*. The JWT middleware runs before every handler here and
// injects the decoded AuthUser; report routes add the admin middleware on top.

pub mod auth;
pub mod cars;
pub mod lots;
pub mod reports;
pub mod sessions;
