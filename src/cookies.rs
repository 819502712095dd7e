// Set-Cookie translation between the engine response and the host cookie jar.
//
// Multiple Set-Cookie headers cannot be folded into one string: cookie
// values and Expires attributes may themselves contain commas. The header
// must be consumed as a multi-value list and each entry parsed on its own.

use axum::http::header::SET_COOKIE;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use cookie::Cookie;

use crate::error::AuthError;

/// Move every `Set-Cookie` value from `response` into the jar, one cookie at
/// a time, preserving all attributes. Once applied, the raw header is
/// removed from the response so cookies are only ever set through the jar.
///
/// A response without `Set-Cookie` headers is returned untouched.
pub(crate) fn apply_set_cookies(
    mut jar: CookieJar,
    response: &mut Response,
) -> Result<CookieJar, AuthError> {
    let mut cookies = Vec::new();
    for value in response.headers().get_all(SET_COOKIE) {
        let raw = value.to_str().map_err(|_| AuthError::HeaderEncoding)?;
        cookies.push(Cookie::parse(raw.to_owned())?);
    }

    if cookies.is_empty() {
        return Ok(jar);
    }

    for cookie in cookies {
        jar = jar.add(cookie);
    }
    response.headers_mut().remove(SET_COOKIE);

    Ok(jar)
}
