//! # Endpoint Validation
//!
//! Splits and checks `host:port` nameserver endpoints. IPv6 hosts must be
//! bracketed (`[2001:4860:4860::8888]:53`).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EndpointError {
    #[error("missing port in address")]
    MissingPort,

    #[error("too many colons in address")]
    TooManyColons,

    #[error("missing ']' in address")]
    MissingBracket,

    #[error("unexpected '[' or ']' in address")]
    UnexpectedBracket,

    #[error("missing host in address")]
    EmptyHost,

    #[error("invalid port {0:?}: must be a number between 1 and 65535 or a service name")]
    InvalidPort(String),
}

/// Split `host:port` into its parts, rejecting empty hosts and bad ports.
pub fn split_host_port(value: &str) -> Result<(&str, &str), EndpointError> {
    let (host, port) = if let Some(rest) = value.strip_prefix('[') {
        let end = rest.find(']').ok_or(EndpointError::MissingBracket)?;
        let host = &rest[..end];
        let port = rest[end + 1..]
            .strip_prefix(':')
            .ok_or(EndpointError::MissingPort)?;
        if host.contains('[') || port.contains('[') || port.contains(']') {
            return Err(EndpointError::UnexpectedBracket);
        }
        if port.contains(':') {
            return Err(EndpointError::TooManyColons);
        }
        (host, port)
    } else {
        let colon = value.rfind(':').ok_or(EndpointError::MissingPort)?;
        let host = &value[..colon];
        let port = &value[colon + 1..];
        if host.contains(':') {
            return Err(EndpointError::TooManyColons);
        }
        if host.contains('[') || host.contains(']') || port.contains(']') {
            return Err(EndpointError::UnexpectedBracket);
        }
        (host, port)
    };

    if host.trim().is_empty() {
        return Err(EndpointError::EmptyHost);
    }
    validate_port(port)?;

    Ok((host, port))
}

/// A port is either a number in 1..=65535 or an RFC 6335 service name
fn validate_port(port: &str) -> Result<(), EndpointError> {
    let invalid = || EndpointError::InvalidPort(port.to_string());

    if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) {
        return match port.parse::<u16>() {
            Ok(number) if number > 0 => Ok(()),
            _ => Err(invalid()),
        };
    }

    let is_service_name = (1..=15).contains(&port.len())
        && port.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        && port.bytes().any(|b| b.is_ascii_alphabetic())
        && !port.starts_with('-')
        && !port.ends_with('-')
        && !port.contains("--");

    if is_service_name {
        Ok(())
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_valid_endpoints() {
        assert_eq!(split_host_port("8.8.8.8:53").unwrap(), ("8.8.8.8", "53"));
        assert_eq!(
            split_host_port("dns.internal:domain").unwrap(),
            ("dns.internal", "domain")
        );
        assert_eq!(
            split_host_port("[2001:4860:4860::8888]:53").unwrap(),
            ("2001:4860:4860::8888", "53")
        );
        assert_eq!(split_host_port("localhost:65535").unwrap(), ("localhost", "65535"));
    }

    #[test]
    fn test_missing_port() {
        assert_eq!(split_host_port("8.8.8.8"), Err(EndpointError::MissingPort));
        assert_eq!(split_host_port("bad-entry"), Err(EndpointError::MissingPort));
        assert_eq!(split_host_port("[::1]"), Err(EndpointError::MissingPort));
        assert_eq!(split_host_port(""), Err(EndpointError::MissingPort));
    }

    #[test]
    fn test_unbracketed_ipv6() {
        assert_eq!(
            split_host_port("2001:db8::1"),
            Err(EndpointError::TooManyColons)
        );
        assert_eq!(
            split_host_port("[::1]:53:54"),
            Err(EndpointError::TooManyColons)
        );
    }

    #[test]
    fn test_brackets() {
        assert_eq!(split_host_port("[::1:53"), Err(EndpointError::MissingBracket));
        assert_eq!(
            split_host_port("host]:53"),
            Err(EndpointError::UnexpectedBracket)
        );
    }

    #[test]
    fn test_empty_host() {
        assert_eq!(split_host_port(":53"), Err(EndpointError::EmptyHost));
        assert_eq!(split_host_port("[]:53"), Err(EndpointError::EmptyHost));
    }

    #[test]
    fn test_invalid_ports() {
        for value in [
            "8.8.8.8:",
            "8.8.8.8:0",
            "8.8.8.8:65536",
            "8.8.8.8:-53",
            "8.8.8.8:dns--x",
            "8.8.8.8:domain_",
            "8.8.8.8:averyveryverylongservice",
        ] {
            assert!(
                matches!(split_host_port(value), Err(EndpointError::InvalidPort(_))),
                "Endpoint '{value}' should have an invalid port"
            );
        }
    }
}
