//! Access log format module
//!
//! Supported formats:
//! - `combined` (Apache/Nginx combined format, the default)
//! - `common` (Common Log Format - CLF)
//! - `json` (one JSON object per request)

use chrono::{DateTime, Local};
use serde::Serialize;

const CLF_TIME: &str = "%d/%b/%Y:%H:%M:%S %z";

/// One served request, as written to the access log
#[derive(Debug, Clone, Serialize)]
pub struct AccessLogEntry {
    /// Client address
    pub remote_addr: String,
    /// Request timestamp
    #[serde(serialize_with = "serialize_rfc3339")]
    pub time: DateTime<Local>,
    pub method: String,
    /// Request path, not decoded
    pub path: String,
    /// Query string without the leading `?`
    pub query: Option<String>,
    pub http_version: String,
    pub status: u16,
    pub body_bytes: usize,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    /// Handling time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry stamped with the current time
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            referer: None,
            user_agent: None,
            request_time_us: 0,
        }
    }

    /// Render the entry; unknown format names fall back to `combined`
    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "json" => self.format_json(),
            _ => self.format_combined(),
        }
    }

    fn request_line(&self) -> String {
        let query = self
            .query
            .as_ref()
            .map(|q| format!("?{q}"))
            .unwrap_or_default();
        format!(
            "{} {}{} HTTP/{}",
            self.method, self.path, query, self.http_version
        )
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time.format(CLF_TIME),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    /// Common format followed by `"$http_referer" "$http_user_agent"`
    fn format_combined(&self) -> String {
        format!(
            "{} \"{}\" \"{}\"",
            self.format_common(),
            self.referer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.format_combined())
    }
}

fn serialize_rfc3339<S: serde::Serializer>(
    time: &DateTime<Local>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&time.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "192.168.1.20".to_string(),
            "GET".to_string(),
            "/content".to_string(),
        );
        entry.query = Some("id=image_content_1&content_type=imageContent".to_string());
        entry.status = 200;
        entry.body_bytes = 321;
        entry.referer = Some("http://192.168.1.10:4004/".to_string());
        entry.user_agent = Some("DisplayClient/2.1".to_string());
        entry.request_time_us = 850;
        entry
    }

    #[test]
    fn test_format_combined() {
        let log = create_test_entry().format("combined");
        assert!(log.starts_with("192.168.1.20 - - ["));
        assert!(log.contains(
            "\"GET /content?id=image_content_1&content_type=imageContent HTTP/1.1\" 200 321"
        ));
        assert!(log.ends_with("\"http://192.168.1.10:4004/\" \"DisplayClient/2.1\""));
    }

    #[test]
    fn test_format_common() {
        let log = create_test_entry().format("common");
        assert!(log.ends_with("200 321"));
        assert!(!log.contains("DisplayClient"));
    }

    #[test]
    fn test_format_json() {
        let log = create_test_entry().format("json");
        let value: serde_json::Value = serde_json::from_str(&log).unwrap();
        assert_eq!(value["remote_addr"], "192.168.1.20");
        assert_eq!(value["status"], 200);
        assert_eq!(value["body_bytes"], 321);
        assert_eq!(value["referer"], "http://192.168.1.10:4004/");
        assert!(value["time"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_unknown_format_is_combined() {
        let entry = create_test_entry();
        assert_eq!(entry.format("$remote_addr"), entry.format("combined"));
    }

    #[test]
    fn test_missing_headers_render_dash() {
        let entry = AccessLogEntry::new("::1".to_string(), "HEAD".to_string(), "/".to_string());
        assert!(entry.format("combined").ends_with("\"-\" \"-\""));
    }
}
