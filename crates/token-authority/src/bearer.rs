//! Bearer credential extraction from an `Authorization` header value.

use crate::error::AuthError;

/// Scheme tag expected before the token. Matched case-sensitively.
pub const BEARER_SCHEME: &str = "Bearer";

/// Extract the token from a `Bearer <token>` header value.
///
/// The value is split on its first space into exactly two parts. The token
/// part is returned unchanged; checking it is left to
/// [`crate::TokenAuthority::verify`].
///
/// # Errors
///
/// - `MissingCredentials` if `header_value` is `None`
/// - `MalformedHeader` if there is no space, the scheme is not `Bearer`,
///   or the remainder contains a further space
pub fn extract_bearer(header_value: Option<&str>) -> Result<&str, AuthError> {
    let value = header_value.ok_or(AuthError::MissingCredentials)?;

    let (scheme, token) = value.split_once(' ').ok_or_else(|| {
        tracing::debug!(target: "token_authority", "Authorization header has no scheme separator");
        AuthError::MalformedHeader
    })?;

    if scheme != BEARER_SCHEME || token.contains(' ') {
        tracing::debug!(target: "token_authority", "Authorization header is not a single bearer credential");
        return Err(AuthError::MalformedHeader);
    }

    Ok(token)
}
