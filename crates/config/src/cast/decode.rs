//! Optional base64 decoding for secret-bearing values.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use super::CastError;
use crate::constants::BASE64_PREFIX;

/// Standard alphabet, padding optional.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode a value that may carry a `base64:` prefix.
///
/// - `None` stays `None`.
/// - `base64:<payload>` decodes the payload (whitespace inside it is ignored,
///   padding is optional), then trims the decoded text.
/// - Anything else is trimmed as plain text.
///
/// An empty result becomes `None`. A payload that is not base64 or does not
/// decode to UTF-8 fails with `InvalidEncoding`.
pub fn optionally_decode(raw: Option<&str>) -> Result<Option<String>, CastError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let text = match raw.strip_prefix(BASE64_PREFIX) {
        Some(payload) => {
            let compact: String = payload
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            let bytes = LENIENT_BASE64
                .decode(compact.as_bytes())
                .map_err(|_| CastError::InvalidEncoding)?;
            String::from_utf8(bytes).map_err(|_| CastError::InvalidEncoding)?
        }
        None => raw.to_string(),
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}
