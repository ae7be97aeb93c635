//! Link-layer and transport-layer frame decoding.
//!
//! Strips Ethernet II, IPv4, and UDP headers from one captured frame,
//! validating each layer before handing the remainder up. The IPv4 header
//! length field is parsed for information only; a fixed 20-byte header is
//! assumed, so captures carrying IP options will misparse. All multi-byte
//! fields are network byte order.

use std::net::Ipv4Addr;

use crate::constants::{
    ETHERNET_HEADER_LENGTH_BYTES, ETHERTYPE_IPV4, IP_PROTOCOL_UDP, IPV4_HEADER_LENGTH_BYTES,
    UDP_HEADER_LENGTH_BYTES,
};
use crate::error::{FrameError, NetworkLayer};

/// Parsed Ethernet II header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetFrameInfo {
    pub dst_mac: [u8; 6],
    pub src_mac: [u8; 6],
    pub ether_type: u16,
}

impl EthernetFrameInfo {
    /// Whether the frame carries an IPv4 payload.
    #[inline]
    pub fn is_ip(&self) -> bool {
        self.ether_type == ETHERTYPE_IPV4
    }
}

/// Parsed IPv4 fixed-header fields (RFC 791).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4HeaderInfo {
    /// IP version nibble. Informational only; not enforced.
    pub version: u8,
    /// Header length in 32-bit words. Parsed but not used for stripping.
    pub header_length_words: u8,
    pub type_of_service: u8,
    pub total_length: u16,
    pub identification: u16,
    /// The three flag bits (reserved, DF, MF).
    pub flags: u8,
    pub fragment_offset: u16,
    pub ttl: u8,
    pub protocol: u8,
    pub checksum: u16,
    pub src_addr: Ipv4Addr,
    pub dst_addr: Ipv4Addr,
}

impl Ipv4HeaderInfo {
    /// Whether the datagram carries UDP.
    #[inline]
    pub fn is_udp(&self) -> bool {
        self.protocol == IP_PROTOCOL_UDP
    }
}

/// Parsed UDP header fields (RFC 768).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UdpHeaderInfo {
    pub src_port: u16,
    pub dst_port: u16,
    pub length: u16,
    pub checksum: u16,
}

/// Parses the 14-byte Ethernet II header and returns it with the payload.
pub fn parse_ethernet(data: &[u8]) -> Result<(EthernetFrameInfo, &[u8]), FrameError> {
    if data.len() < ETHERNET_HEADER_LENGTH_BYTES {
        return Err(FrameError::NotEnoughData {
            needed: ETHERNET_HEADER_LENGTH_BYTES,
            got: data.len(),
            layer: NetworkLayer::Ethernet,
        });
    }

    let mut dst_mac = [0u8; 6];
    dst_mac.copy_from_slice(&data[0..6]);
    let mut src_mac = [0u8; 6];
    src_mac.copy_from_slice(&data[6..12]);
    let ether_type = u16::from_be_bytes([data[12], data[13]]);

    let info = EthernetFrameInfo {
        dst_mac,
        src_mac,
        ether_type,
    };
    Ok((info, &data[ETHERNET_HEADER_LENGTH_BYTES..]))
}

/// Parses the IPv4 fixed header and returns it with the payload.
///
/// Strips exactly 20 bytes regardless of the header length field; IP
/// options are out of scope for capture streams this pipeline handles.
pub fn parse_ipv4(data: &[u8]) -> Result<(Ipv4HeaderInfo, &[u8]), FrameError> {
    if data.len() < IPV4_HEADER_LENGTH_BYTES {
        return Err(FrameError::NotEnoughData {
            needed: IPV4_HEADER_LENGTH_BYTES,
            got: data.len(),
            layer: NetworkLayer::Ipv4,
        });
    }

    let version = data[0] >> 4;
    let header_length_words = data[0] & 0x0F;
    let type_of_service = data[1];
    let total_length = u16::from_be_bytes([data[2], data[3]]);
    let identification = u16::from_be_bytes([data[4], data[5]]);
    let flags_and_fragment_offset = u16::from_be_bytes([data[6], data[7]]);
    let flags = (flags_and_fragment_offset >> 13) as u8;
    let fragment_offset = flags_and_fragment_offset & 0x1FFF;
    let ttl = data[8];
    let protocol = data[9];
    let checksum = u16::from_be_bytes([data[10], data[11]]);
    let src_addr = Ipv4Addr::new(data[12], data[13], data[14], data[15]);
    let dst_addr = Ipv4Addr::new(data[16], data[17], data[18], data[19]);

    let info = Ipv4HeaderInfo {
        version,
        header_length_words,
        type_of_service,
        total_length,
        identification,
        flags,
        fragment_offset,
        ttl,
        protocol,
        checksum,
        src_addr,
        dst_addr,
    };
    Ok((info, &data[IPV4_HEADER_LENGTH_BYTES..]))
}

/// Parses the 8-byte UDP header and returns it with the payload.
pub fn parse_udp(data: &[u8]) -> Result<(UdpHeaderInfo, &[u8]), FrameError> {
    if data.len() < UDP_HEADER_LENGTH_BYTES {
        return Err(FrameError::NotEnoughData {
            needed: UDP_HEADER_LENGTH_BYTES,
            got: data.len(),
            layer: NetworkLayer::Udp,
        });
    }

    let info = UdpHeaderInfo {
        src_port: u16::from_be_bytes([data[0], data[1]]),
        dst_port: u16::from_be_bytes([data[2], data[3]]),
        length: u16::from_be_bytes([data[4], data[5]]),
        checksum: u16::from_be_bytes([data[6], data[7]]),
    };
    Ok((info, &data[UDP_HEADER_LENGTH_BYTES..]))
}

/// Strips Ethernet, IPv4, and UDP framing from one raw frame and returns
/// the RTP candidate payload.
///
/// Non-IP and non-UDP frames fail with [`FrameError::NotIpFrame`] and
/// [`FrameError::NotUdpFrame`] respectively; callers treat those as skips,
/// not damage.
pub fn strip_frame_layers(data: &[u8]) -> Result<&[u8], FrameError> {
    let (eth, ip_data) = parse_ethernet(data)?;
    if !eth.is_ip() {
        return Err(FrameError::NotIpFrame {
            ether_type: eth.ether_type,
        });
    }

    let (ip, udp_data) = parse_ipv4(ip_data)?;
    if !ip.is_udp() {
        return Err(FrameError::NotUdpFrame {
            protocol: ip.protocol,
        });
    }

    let (_udp, rtp_candidate) = parse_udp(udp_data)?;
    Ok(rtp_candidate)
}
