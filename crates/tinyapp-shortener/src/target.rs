use crate::error::{Result, ShortenerError};

const DEFAULT_SCHEME: &str = "http://";
const KNOWN_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Turns user input into the URL that gets stored.
///
/// Input is trimmed. Anything that does not start with `http://` or
/// `https://` (scheme compared case-insensitively) gets `http://` prepended,
/// so `www.example.com` becomes `http://www.example.com`. Applying the
/// function to its own output is a no-op.
///
/// Targets containing control characters are rejected: they can never be
/// sent back in a `Location` header.
pub fn normalize_target(raw: &str) -> Result<String> {
    let target = raw.trim();
    if target.is_empty() || target.chars().any(char::is_control) {
        return Err(ShortenerError::InvalidTarget);
    }

    if has_known_scheme(target) {
        Ok(target.to_owned())
    } else {
        Ok(format!("{DEFAULT_SCHEME}{target}"))
    }
}

fn has_known_scheme(url: &str) -> bool {
    KNOWN_SCHEMES.iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
