//! Refresh-token cookie construction.
//!
//! Contract: `HttpOnly`, `SameSite=Lax`, `Secure` in production, path `/`,
//! max-age equal to the refresh token validity window. The cookie is
//! rewritten on every successful refresh, not just at login.

use actix_web::cookie::{time::Duration, Cookie, SameSite};

use bh_shared::config::auth::CookieConfig;

/// Build the refresh-token cookie for a newly issued token
pub fn refresh_cookie(config: &CookieConfig, token: &str) -> Cookie<'static> {
    Cookie::build(config.name.clone(), token.to_owned())
        .path(config.path.clone())
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(parse_same_site(&config.same_site))
        .max_age(Duration::seconds(config.max_age))
        .finish()
}

/// Build an immediately-expiring cookie that clears the refresh token
pub fn clear_refresh_cookie(config: &CookieConfig) -> Cookie<'static> {
    Cookie::build(config.name.clone(), "")
        .path(config.path.clone())
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(parse_same_site(&config.same_site))
        .max_age(Duration::ZERO)
        .finish()
}

fn parse_same_site(value: &str) -> SameSite {
    match value.to_ascii_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_cookie_attributes() {
        let config = CookieConfig::default();
        let cookie = refresh_cookie(&config, "token-value");

        assert_eq!(cookie.name(), "refreshToken");
        assert_eq!(cookie.value(), "token-value");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(604800)));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let config = CookieConfig::default();
        let cookie = clear_refresh_cookie(&config);

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }

    #[test]
    fn test_same_site_parsing() {
        assert_eq!(parse_same_site("Strict"), SameSite::Strict);
        assert_eq!(parse_same_site("none"), SameSite::None);
        assert_eq!(parse_same_site("Lax"), SameSite::Lax);
        assert_eq!(parse_same_site("unknown"), SameSite::Lax);
    }
}
