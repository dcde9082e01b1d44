//! Client address extraction.

use std::net::{IpAddr, SocketAddr};

use super::types::MeasurementRequest;

/// Determines the client's address.
///
/// Uses the first `X-Forwarded-For` hop that is an IP address (each proxy
/// appends, so the first entry is the original client) and falls back to the
/// connection's peer address. Hops such as `unknown` or obfuscated identifiers
/// are skipped; `ip:port` and bracketed IPv6 hops are reduced to the address.
/// IPv4-mapped IPv6 addresses are reported in their IPv4 form.
pub fn client_ip(request: &MeasurementRequest) -> Option<String> {
    let forwarded = request
        .forwarded_for
        .as_deref()
        .and_then(|header| header.split(',').find_map(parse_hop));

    forwarded
        .or(request.remote_addr)
        .map(|addr| addr.to_canonical().to_string())
}

fn parse_hop(hop: &str) -> Option<IpAddr> {
    let hop = hop.trim();
    if hop.is_empty() {
        return None;
    }
    if let Ok(ip) = hop.parse::<IpAddr>() {
        return Some(ip);
    }
    if let Ok(socket) = hop.parse::<SocketAddr>() {
        return Some(socket.ip());
    }
    let parsed = hop
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .and_then(|h| h.parse::<IpAddr>().ok());
    if parsed.is_none() {
        log::debug!("Ignoring forwarded-for hop {:?}", hop);
    }
    parsed
}

/// Address to send to the geolocation provider, if any.
///
/// Only publicly routable addresses are sent. For loopback, private,
/// link-local or unparseable values the parameter is omitted and the provider
/// geolocates the caller (this server) instead.
pub fn lookup_address(client: &str) -> Option<&str> {
    match client.parse::<IpAddr>() {
        Ok(ip) if is_public(ip) => Some(client),
        Ok(ip) => {
            log::debug!("Client address {} is not public; provider will resolve its caller", ip);
            None
        }
        Err(_) => {
            log::debug!("Client address {:?} is not an IP address", client);
            None
        }
    }
}

fn is_public(ip: IpAddr) -> bool {
    match ip.to_canonical() {
        IpAddr::V4(v4) => {
            let [a, b, ..] = v4.octets();
            // 0/8 this network, 100.64/10 shared CGNAT space, 240/4 reserved
            !(v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
                || v4.is_documentation()
                || v4.is_multicast()
                || a == 0
                || (a == 100 && (b & 0xc0) == 64)
                || a >= 240)
        }
        IpAddr::V6(v6) => {
            let [first, second, ..] = v6.segments();
            // fc00::/7 unique local, fe80::/10 link local, 2001:db8::/32 documentation
            !(v6.is_loopback()
                || v6.is_unspecified()
                || v6.is_multicast()
                || (first & 0xfe00) == 0xfc00
                || (first & 0xffc0) == 0xfe80
                || (first == 0x2001 && second == 0x0db8))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(forwarded_for: Option<&str>, remote: Option<&str>) -> MeasurementRequest {
        MeasurementRequest {
            forwarded_for: forwarded_for.map(str::to_string),
            remote_addr: remote.map(|r| r.parse().unwrap()),
        }
    }

    #[test]
    fn test_client_ip_takes_first_forwarded_hop() {
        let req = request(Some("10.0.0.1, 192.168.1.1"), Some("127.0.0.1"));
        assert_eq!(client_ip(&req).as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_client_ip_skips_empty_hops() {
        let req = request(Some(" , 203.0.113.9"), None);
        assert_eq!(client_ip(&req).as_deref(), Some("203.0.113.9"));
    }

    #[test]
    fn test_client_ip_falls_back_to_remote_addr() {
        let req = request(None, Some("198.51.100.7"));
        assert_eq!(client_ip(&req).as_deref(), Some("198.51.100.7"));

        let blank_header = request(Some("  "), Some("198.51.100.7"));
        assert_eq!(client_ip(&blank_header).as_deref(), Some("198.51.100.7"));
    }

    #[test]
    fn test_client_ip_unmaps_ipv4_mapped_remote() {
        let req = request(None, Some("::ffff:8.8.8.8"));
        assert_eq!(client_ip(&req).as_deref(), Some("8.8.8.8"));
    }

    #[test]
    fn test_client_ip_skips_non_address_hops() {
        let req = request(Some("unknown, 8.8.4.4"), Some("9.9.9.9"));
        assert_eq!(client_ip(&req).as_deref(), Some("8.8.4.4"));

        let only_garbage = request(Some("unknown, _hidden"), Some("9.9.9.9"));
        assert_eq!(client_ip(&only_garbage).as_deref(), Some("9.9.9.9"));
    }

    #[test]
    fn test_client_ip_strips_ports_and_brackets() {
        let v4_port = request(Some("8.8.4.4:41234, 10.0.0.1"), Some("9.9.9.9"));
        assert_eq!(client_ip(&v4_port).as_deref(), Some("8.8.4.4"));

        let v6_port = request(Some("[2606:4700::1111]:443"), None);
        assert_eq!(client_ip(&v6_port).as_deref(), Some("2606:4700::1111"));

        let v6_bracketed = request(Some("[2606:4700::1111]"), None);
        assert_eq!(client_ip(&v6_bracketed).as_deref(), Some("2606:4700::1111"));

        let mapped = request(Some("::ffff:8.8.8.8"), None);
        assert_eq!(client_ip(&mapped).as_deref(), Some("8.8.8.8"));
    }

    #[test]
    fn test_client_ip_none_without_metadata() {
        assert_eq!(client_ip(&MeasurementRequest::default()), None);
    }

    #[test]
    fn test_lookup_address_public_only() {
        assert_eq!(lookup_address("8.8.8.8"), Some("8.8.8.8"));
        assert_eq!(lookup_address("2606:4700::1111"), Some("2606:4700::1111"));
        assert_eq!(lookup_address("10.0.0.1"), None);
        assert_eq!(lookup_address("127.0.0.1"), None);
        assert_eq!(lookup_address("::1"), None);
        assert_eq!(lookup_address("fd00::1"), None);
        assert_eq!(lookup_address("fe80::1"), None);
        assert_eq!(lookup_address("224.0.0.251"), None);
        assert_eq!(lookup_address("239.255.255.250"), None);
        assert_eq!(lookup_address("100.64.0.1"), None);
        assert_eq!(lookup_address("100.127.255.254"), None);
        assert_eq!(lookup_address("240.0.0.1"), None);
        assert_eq!(lookup_address("0.1.2.3"), None);
        assert_eq!(lookup_address("2001:db8::1"), None);
        assert_eq!(lookup_address("100.128.0.1"), Some("100.128.0.1"));
        assert_eq!(lookup_address("2001:4860::8888"), Some("2001:4860::8888"));
        assert_eq!(lookup_address("not-an-ip"), None);
    }
}
