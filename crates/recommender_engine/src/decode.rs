use encoding_rs::{Encoding, UTF_8};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode bytes with {encoding}")]
    Charset { encoding: String },
    #[error("response body is not valid json: {message}")]
    Json { message: String },
}

/// Decode a response body into JSON using: BOM -> Content-Type charset -> UTF-8.
pub fn decode_json(
    bytes: &[u8],
    content_type: Option<&str>,
) -> Result<serde_json::Value, DecodeError> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| {
            content_type
                .and_then(extract_charset)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or(UTF_8);

    // `decode` strips a matching BOM itself.
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::Charset {
            encoding: encoding.name().to_string(),
        });
    }

    serde_json::from_str(&text).map_err(|err| DecodeError::Json {
        message: err.to_string(),
    })
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim_matches([' ', '"', '\''].as_ref()).to_string())
        })
        .next()
}
