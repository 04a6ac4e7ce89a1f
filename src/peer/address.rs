const LOOPBACK_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// The address points at this node; the query runs in-process.
    Local,
    Remote,
}

/// Decides whether `peer_address` refers to the node listening on
/// `local_host:local_port`.
///
/// An exact match with `http://host:port` (or bare `host:port`) is local.
/// Otherwise a loopback host is local only if the trailing `:port` token
/// parses and equals `local_port`. Anything unparsable is remote, so a
/// foreign query is never executed locally by accident.
pub fn classify(peer_address: &str, local_host: &str, local_port: u16) -> AddressKind {
    let bare = format!("{local_host}:{local_port}");
    if peer_address == format!("http://{bare}") || peer_address == bare {
        return AddressKind::Local;
    }

    let loopback = host_of(peer_address)
        .is_some_and(|host| LOOPBACK_HOSTS.iter().any(|h| host.eq_ignore_ascii_case(h)));
    if loopback && trailing_port(peer_address) == Some(local_port) {
        return AddressKind::Local;
    }

    AddressKind::Remote
}

pub fn is_self(peer_address: &str, local_host: &str, local_port: u16) -> bool {
    classify(peer_address, local_host, local_port) == AddressKind::Local
}

fn host_of(address: &str) -> Option<&str> {
    let rest = address
        .split_once("://")
        .map_or(address, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next()?;
    let authority = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host_port)| host_port);
    let host = authority
        .rsplit_once(':')
        .map_or(authority, |(host, _)| host);
    (!host.is_empty()).then_some(host)
}

fn trailing_port(address: &str) -> Option<u16> {
    address
        .rsplit_once(':')
        .and_then(|(_, port)| port.parse::<u16>().ok())
}
