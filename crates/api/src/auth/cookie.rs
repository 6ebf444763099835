//! The `auth_token` identity cookie.
//!
//! The cookie is the only place the signed token lives: `HttpOnly` so script
//! cannot read it, `SameSite=Strict` so it is never sent cross-site, and
//! `Secure` in production. Logout clears it with `Max-Age=0`.

/// Cookie name carrying the signed identity token.
pub const AUTH_COOKIE: &str = "auth_token";

/// Build the `Set-Cookie` value for a fresh login.
pub fn build_auth_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie =
        format!("{AUTH_COOKIE}={token}; Path=/; Max-Age={max_age_secs}; HttpOnly; SameSite=Strict");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the `Set-Cookie` value that clears the identity cookie.
pub fn clear_auth_cookie(secure: bool) -> String {
    build_auth_cookie("", 0, secure)
}

/// Pull the token out of a request `Cookie` header, if present.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| {
            pair.strip_prefix(AUTH_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .filter(|token| !token.is_empty())
}
