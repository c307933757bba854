use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct ReverbConfiguration {
    address: IpAddr,
    port: u16,
    max_body_size: Option<usize>,
}

impl ReverbConfiguration {
    pub fn new() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_body_size: None,
        }
    }

    pub fn set_address(&mut self, address: IpAddr) {
        self.address = address;
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Bodies larger than this are rejected at ingestion. `None` accepts any size.
    pub fn set_max_body_size(&mut self, max_body_size: Option<usize>) {
        self.max_body_size = max_body_size;
    }

    pub fn max_body_size(&self) -> Option<usize> {
        self.max_body_size
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

impl Default for ReverbConfiguration {
    fn default() -> Self {
        Self::new()
    }
}
