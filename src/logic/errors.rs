//! Classification of connection failures into user guidance
//!
//! A failed request only tells us what the socket saw, not why. These
//! heuristics map the failure text plus the target host onto the most
//! likely explanation so the UI can suggest a next step. The hint must
//! read as a suggestion, not a diagnosis: a refused connection on a LAN
//! address can just as well be a firewall or a wrong port.

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkHint {
    /// TLS-level failure, usually an http server addressed as https
    SchemeMismatch,
    /// Private or loopback host that did not answer
    LocalUnreachable,
    /// Anything else: DNS, routing, remote host down
    Unreachable,
}

/// Classify a transport-level failure based on its message and target
pub fn classify_network_failure(message: &str, base: &Url) -> NetworkHint {
    let msg = message.to_lowercase();

    if msg.contains("certificate")
        || msg.contains("tls")
        || msg.contains("ssl")
        || msg.contains("handshake")
        || msg.contains("wrong version number")
    {
        return NetworkHint::SchemeMismatch;
    }

    if let Some(host) = base.host_str() {
        if is_private_host(host) {
            return NetworkHint::LocalUnreachable;
        }
    }

    NetworkHint::Unreachable
}

/// One-line suggestion to show next to the raw error
pub fn guidance(hint: NetworkHint) -> &'static str {
    match hint {
        NetworkHint::SchemeMismatch => {
            "Secure handshake failed. Check whether the server expects http:// or https://."
        }
        NetworkHint::LocalUnreachable => {
            "Server not reachable on the local network. Check that it is running and the port is right."
        }
        NetworkHint::Unreachable => "Server unreachable. Check the address and your connection.",
    }
}

/// Loopback, RFC 1918, link-local and mDNS hosts
pub fn is_private_host(host: &str) -> bool {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host == "localhost" || host == "::1" || host.ends_with(".local") {
        return true;
    }
    let octets: Vec<u8> = host
        .split('.')
        .map(str::parse)
        .collect::<Result<_, _>>()
        .unwrap_or_default();
    if octets.len() != 4 {
        return false;
    }
    match (octets[0], octets[1]) {
        (10, _) | (127, _) => true,
        (192, 168) => true,
        (169, 254) => true,
        (172, second) => (16..=31).contains(&second),
        _ => false,
    }
}
