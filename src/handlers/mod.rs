// handlers/mod.rs - Handler tiers
//
// Public (no auth) → Protected (JWT auth)
//
// Public handlers describe the service and report health. Protected handlers
// run behind `jwt_auth_middleware` and receive an `AuthUser` extension; every
// query they issue is scoped to that user.
pub mod protected; // JWT authentication required (/api/*)
pub mod public; // No authentication required
