//! Who is calling: IP address and User-Agent

use std::net::IpAddr;

use axum::http::{HeaderMap, header};

/// Recorded on every session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientInfo {
    pub ip: Option<IpAddr>,
    /// Empty when the header is absent
    pub user_agent: String,
}

impl ClientInfo {
    /// Column value; empty when unknown
    pub fn ip_string(&self) -> String {
        self.ip.map(|ip| ip.to_string()).unwrap_or_default()
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

pub fn extract_client_info(headers: &HeaderMap, peer_ip: Option<IpAddr>) -> ClientInfo {
    ClientInfo {
        ip: extract_client_ip(headers, peer_ip),
        user_agent: header_str(headers, header::USER_AGENT.as_str())
            .unwrap_or_default()
            .to_string(),
    }
}

/// `X-Real-IP`, else the left-most `X-Forwarded-For` hop, else the socket peer
///
/// Unparseable header values are skipped.
pub fn extract_client_ip(headers: &HeaderMap, peer_ip: Option<IpAddr>) -> Option<IpAddr> {
    let real_ip = header_str(headers, "x-real-ip").and_then(|v| v.trim().parse::<IpAddr>().ok());
    let forwarded_for = || {
        header_str(headers, "x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .and_then(|hop| hop.trim().parse::<IpAddr>().ok())
    };

    real_ip.or_else(forwarded_for).or(peer_ip)
}
