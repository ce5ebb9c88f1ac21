pub mod auth;
pub mod response;
pub mod validate_query;

pub use auth::{jwt_auth_middleware, require_admin, require_admin_middleware, AuthUser};
pub use response::{ApiResponse, ApiResult};
pub use validate_query::{validate_date_range, validate_revenue_query, DateRange, RevenueParams};
