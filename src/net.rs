use std::io;
use std::net::{IpAddr, Ipv4Addr, UdpSocket};

/// Discovers the local IPv4 addresses worth binding a listener to.
///
/// Connecting a UDP socket toward a public address makes the OS pick the
/// outbound interface without sending a single packet; its local address is
/// the one peers on the network can reach.
pub fn local_ipv4_addrs() -> io::Result<Vec<Ipv4Addr>> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect(("8.8.8.8", 80))?;
    match socket.local_addr()?.ip() {
        IpAddr::V4(ip) if !ip.is_unspecified() => Ok(vec![ip]),
        _ => Ok(Vec::new()),
    }
}
