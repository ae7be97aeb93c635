//! RTP fixed-header parsing (RFC 3550).
//!
//! Parses the 12-byte fixed header out of a UDP payload and returns the
//! media payload slice. Extended headers (non-zero CSRC count) are refused
//! outright: the true header length is unknown without decoding the CSRC
//! list, and guessing would corrupt the audio stream.

use crate::constants::{RTP_HEADER_LENGTH_BYTES, RTP_VERSION};
use crate::error::{FrameError, NetworkLayer};
use crate::types::{PayloadType, SequenceNumber, Ssrc, Timestamp};

/// Parsed RTP fixed-header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtpHeader {
    /// Protocol version, always 2 for parsed headers.
    pub version: u8,
    pub padding: bool,
    pub extension: bool,
    /// Contributing source count, always 0 for parsed headers.
    pub csrc_count: u8,
    pub marker: bool,
    pub payload_type: PayloadType,
    pub sequence_number: SequenceNumber,
    pub timestamp: Timestamp,
    pub ssrc: Ssrc,
}

impl RtpHeader {
    /// Re-serializes the canonical 12-byte fixed header.
    ///
    /// For any header parsed by [`parse_rtp`] this reproduces the original
    /// input bytes exactly.
    pub fn to_bytes(&self) -> [u8; RTP_HEADER_LENGTH_BYTES] {
        let mut bytes = [0u8; RTP_HEADER_LENGTH_BYTES];
        bytes[0] = (self.version << 6)
            | ((self.padding as u8) << 5)
            | ((self.extension as u8) << 4)
            | (self.csrc_count & 0x0F);
        bytes[1] = ((self.marker as u8) << 7) | (self.payload_type.value() & 0x7F);
        bytes[2..4].copy_from_slice(&self.sequence_number.to_be_bytes());
        bytes[4..8].copy_from_slice(&self.timestamp.to_be_bytes());
        bytes[8..12].copy_from_slice(&self.ssrc.to_be_bytes());
        bytes
    }
}

/// One successfully parsed RTP packet, tagged with the originating frame's
/// position in the capture order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtpPacket<'a> {
    pub header: RtpHeader,
    pub payload: &'a [u8],
    pub capture_index: usize,
}

/// Parses the RTP fixed header and returns it with the payload slice.
///
/// Fails with [`FrameError::ExtendedHeaderUnsupported`] when the CSRC count
/// is non-zero; the caller records that as a skip, never as a silently
/// empty payload.
pub fn parse_rtp(data: &[u8]) -> Result<(RtpHeader, &[u8]), FrameError> {
    if data.len() < RTP_HEADER_LENGTH_BYTES {
        return Err(FrameError::NotEnoughData {
            needed: RTP_HEADER_LENGTH_BYTES,
            got: data.len(),
            layer: NetworkLayer::Rtp,
        });
    }

    let version = data[0] >> 6;
    if version != RTP_VERSION {
        return Err(FrameError::InvalidRtpVersion {
            expected: RTP_VERSION,
            got: version,
        });
    }
    let padding = (data[0] >> 5) & 0x01 == 1;
    let extension = (data[0] >> 4) & 0x01 == 1;
    let csrc_count = data[0] & 0x0F;
    if csrc_count != 0 {
        return Err(FrameError::ExtendedHeaderUnsupported { csrc_count });
    }

    let marker = (data[1] >> 7) & 0x01 == 1;
    let payload_type = PayloadType::new(data[1] & 0x7F);
    let sequence_number = SequenceNumber::new(u16::from_be_bytes([data[2], data[3]]));
    let timestamp = Timestamp::new(u32::from_be_bytes([data[4], data[5], data[6], data[7]]));
    let ssrc = Ssrc::new(u32::from_be_bytes([data[8], data[9], data[10], data[11]]));

    let header = RtpHeader {
        version,
        padding,
        extension,
        csrc_count,
        marker,
        payload_type,
        sequence_number,
        timestamp,
        ssrc,
    };
    Ok((header, &data[RTP_HEADER_LENGTH_BYTES..]))
}
