//! What came back from the service.

use std::time::Duration;

use serde::de::DeserializeOwned;

/// Status, body and timing of one completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: u16,
    /// Body decoded as UTF-8, invalid sequences replaced.
    pub body: String,
    /// From sending the request until the body was fully read.
    pub duration: Duration,
}

impl ResponseSpec {
    /// Builds a response from the raw body bytes.
    #[must_use]
    pub fn new(status: u16, body: &[u8], duration: Duration) -> Self {
        Self {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
            duration,
        }
    }

    /// Decodes the body as a `T` payload.
    ///
    /// # Errors
    ///
    /// Returns the decoder error when the body is not a `T`.
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Elapsed time in seconds with two decimals, e.g. `0.12s`.
    #[must_use]
    pub fn elapsed_display(&self) -> String {
        format!("{:.2}s", self.duration.as_secs_f64())
    }

    /// The body cut to `max` characters for failure messages.
    #[must_use]
    pub fn excerpt(&self, max: usize) -> String {
        match self.body.char_indices().nth(max) {
            Some((cut, _)) => format!("{}...", &self.body[..cut]),
            None => self.body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Flag {
        success: bool,
    }

    #[test]
    fn test_payload_decodes_typed_body() {
        let response = ResponseSpec::new(400, br#"{"success":false,"extra":1}"#, Duration::ZERO);
        assert_eq!(response.payload::<Flag>().ok(), Some(Flag { success: false }));

        let html = ResponseSpec::new(502, b"<html>Bad Gateway</html>", Duration::ZERO);
        assert!(html.payload::<Flag>().is_err());
    }

    #[test]
    fn test_elapsed_display() {
        let response = ResponseSpec::new(200, b"", Duration::from_millis(1234));
        assert_eq!(response.elapsed_display(), "1.23s");
    }

    #[test]
    fn test_excerpt() {
        let response = ResponseSpec::new(500, "héllo wörld".as_bytes(), Duration::ZERO);
        assert_eq!(response.excerpt(5), "héllo...");
        assert_eq!(response.excerpt(50), "héllo wörld");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let response = ResponseSpec::new(200, &[0xff, b'a'], Duration::ZERO);
        assert_eq!(response.body, "\u{fffd}a");
    }
}
