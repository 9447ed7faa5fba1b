// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Route Prefix: /api/*
// Middleware: jwt_auth_middleware (injects AuthUser)
//
// Handlers here trust AuthUser.user_id as the caller and never accept an
// author id from the request itself.
pub mod posts; // Owner-scoped post search
