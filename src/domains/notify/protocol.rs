//! Download URL construction and frame encoding.

use bytes::{BufMut, Bytes, BytesMut};

use super::error::NotifyError;

/// HTTP path the device fetches packages from.
pub const DOWNLOAD_PATH: &str = "/api/download";

/// Size of the big-endian length prefix.
const LENGTH_PREFIX_SIZE: usize = 4;

/// Pick the base URL announced to devices.
///
/// A configured public base URL wins over the `Host` header of the request
/// that triggered the notification, so a server behind NAT or a proxy can
/// advertise an address the device can reach. `None` when neither is known.
pub fn effective_base_url<'a>(
    public_base_url: Option<&'a str>,
    request_host: Option<&'a str>,
) -> Option<&'a str> {
    match public_base_url {
        Some(base) if !base.is_empty() => Some(base),
        _ => request_host.filter(|host| !host.is_empty()),
    }
}

/// Build the URL a device uses to download `name`.
///
/// `base` may be a bare `host[:port]` or a full `http(s)://` URL.
pub fn build_download_url(base: &str, name: &str) -> Result<String, NotifyError> {
    let base = base.trim_end_matches('/');
    let query = serde_urlencoded::to_string([("name", name)])?;

    if base.starts_with("http://") || base.starts_with("https://") {
        Ok(format!("{base}{DOWNLOAD_PATH}?{query}"))
    } else {
        Ok(format!("http://{base}{DOWNLOAD_PATH}?{query}"))
    }
}

/// Encode `url` as a single length-prefixed frame.
pub fn encode_frame(url: &str) -> Result<Bytes, NotifyError> {
    let payload = url.as_bytes();
    let len = u32::try_from(payload.len()).map_err(|_| NotifyError::PayloadTooLarge(payload.len()))?;

    let mut frame = BytesMut::with_capacity(LENGTH_PREFIX_SIZE + payload.len());
    frame.put_u32(len);
    frame.put_slice(payload);

    Ok(frame.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_base_url_prefers_public() {
        assert_eq!(
            effective_base_url(Some("files.example:9000"), Some("10.0.0.2:8080")),
            Some("files.example:9000")
        );
        assert_eq!(
            effective_base_url(Some(""), Some("10.0.0.2:8080")),
            Some("10.0.0.2:8080")
        );
        assert_eq!(
            effective_base_url(None, Some("10.0.0.2:8080")),
            Some("10.0.0.2:8080")
        );
    }

    #[test]
    fn test_effective_base_url_without_host() {
        assert_eq!(effective_base_url(None, None), None);
        assert_eq!(effective_base_url(Some(""), Some("")), None);
        assert_eq!(
            effective_base_url(Some("files.example:9000"), None),
            Some("files.example:9000")
        );
    }

    #[test]
    fn test_build_download_url_from_host() {
        let url = build_download_url("192.168.1.10:8080", "game.cia").unwrap();

        assert_eq!(url, "http://192.168.1.10:8080/api/download?name=game.cia");
    }

    #[test]
    fn test_build_download_url_escapes_name() {
        let url = build_download_url("host", "My Game & DLC.cia").unwrap();

        assert_eq!(url, "http://host/api/download?name=My+Game+%26+DLC.cia");
    }

    #[test]
    fn test_build_download_url_keeps_scheme() {
        let url = build_download_url("https://files.example/", "x.cia").unwrap();

        assert_eq!(url, "https://files.example/api/download?name=x.cia");
    }

    #[test]
    fn test_encode_frame_layout() {
        let url = "http://h/api/download?name=x.cia";

        let frame = encode_frame(url).unwrap();

        assert_eq!(frame.len(), 4 + url.len());
        assert_eq!(&frame[..4], &(url.len() as u32).to_be_bytes());
        assert_eq!(&frame[4..], url.as_bytes());
    }

    #[test]
    fn test_encode_frame_counts_utf8_bytes() {
        let url = "http://h/é";

        let frame = encode_frame(url).unwrap();

        assert_eq!(&frame[..4], &[0, 0, 0, 11]);
    }
}
