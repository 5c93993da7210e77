//! HTTP header name constants.
//!
//! Header names are lowercase, which is how `reqwest::header::HeaderMap`
//! stores them and how `HeaderSet` looks them up.

/// Content Security Policy header
pub const HEADER_CONTENT_SECURITY_POLICY: &str = "content-security-policy";
/// X-Frame-Options header
pub const HEADER_X_FRAME_OPTIONS: &str = "x-frame-options";
/// X-XSS-Protection header
pub const HEADER_X_XSS_PROTECTION: &str = "x-xss-protection";
/// HTTP Strict Transport Security header
pub const HEADER_STRICT_TRANSPORT_SECURITY: &str = "strict-transport-security";
/// Referrer-Policy header
pub const HEADER_REFERRER_POLICY: &str = "referrer-policy";
/// Permissions-Policy header
pub const HEADER_PERMISSIONS_POLICY: &str = "permissions-policy";
/// Cross-Origin-Resource-Policy header
pub const HEADER_CROSS_ORIGIN_RESOURCE_POLICY: &str = "cross-origin-resource-policy";
/// Cross-Origin-Opener-Policy header
pub const HEADER_CROSS_ORIGIN_OPENER_POLICY: &str = "cross-origin-opener-policy";
/// Cross-Origin-Embedder-Policy header
pub const HEADER_CROSS_ORIGIN_EMBEDDER_POLICY: &str = "cross-origin-embedder-policy";
/// Expect-CT header
pub const HEADER_EXPECT_CT: &str = "expect-ct";
/// X-Content-Type-Options header
pub const HEADER_X_CONTENT_TYPE_OPTIONS: &str = "x-content-type-options";
/// Cache-Control header
pub const HEADER_CACHE_CONTROL: &str = "cache-control";
/// Access-Control-Allow-Origin header (CORS policy)
pub const HEADER_ACCESS_CONTROL_ALLOW_ORIGIN: &str = "access-control-allow-origin";
/// Server header (identifies server software)
pub const HEADER_SERVER: &str = "server";
/// Set-Cookie header
pub const HEADER_SET_COOKIE: &str = "set-cookie";
