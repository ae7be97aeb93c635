//! Error types for the call-audio reconstruction pipeline.
//!
//! Two severities exist. [`FrameError`] conditions are scoped to a single
//! captured frame: the assembler records them in the stream's skip log and
//! moves on. [`CodecError`] and [`CallDecodeError`] abort the whole call
//! decode and are surfaced to the caller; no partial output buffer is ever
//! produced alongside them. The `thiserror` crate is used for ergonomic
//! error definitions.

use std::fmt;

use thiserror::Error;

use crate::codecs::CodecId;
use crate::types::PayloadType;

/// Network layer at which frame parsing stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkLayer {
    /// Link layer (Ethernet II).
    Ethernet,
    /// Internet layer (IPv4).
    Ipv4,
    /// Transport layer (UDP).
    Udp,
    /// Media layer (RTP).
    Rtp,
}

impl fmt::Display for NetworkLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NetworkLayer::Ethernet => "Ethernet",
            NetworkLayer::Ipv4 => "IPv4",
            NetworkLayer::Udp => "UDP",
            NetworkLayer::Rtp => "RTP",
        };
        f.write_str(name)
    }
}

/// Conditions that terminate processing of one captured frame.
///
/// None of these abort the stream: the assembler records the reason against
/// the frame's capture index and continues with the next frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// A header was truncated at the named layer.
    #[error("malformed frame: truncated {layer} header, needed {needed} bytes, got {got}")]
    NotEnoughData {
        needed: usize,
        got: usize,
        layer: NetworkLayer,
    },

    /// EtherType was not IPv4; the frame carries no IP traffic.
    #[error("not an IP frame (EtherType 0x{ether_type:04X})")]
    NotIpFrame { ether_type: u16 },

    /// IP protocol number was not UDP; the frame carries no RTP candidate.
    #[error("not a UDP frame (IP protocol {protocol})")]
    NotUdpFrame { protocol: u8 },

    /// The RTP header advertises contributing sources. The true header
    /// length is unknown to this parser, so the frame is rejected rather
    /// than guessed at.
    #[error("unsupported extended RTP header: {csrc_count} contributing sources")]
    ExtendedHeaderUnsupported { csrc_count: u8 },

    /// The RTP version field did not match the supported version.
    #[error("invalid RTP version: expected {expected}, got {got}")]
    InvalidRtpVersion { expected: u8, got: u8 },
}

impl FrameError {
    /// Whether this condition is an expected layer mismatch (non-IP or
    /// non-UDP traffic) rather than a damaged or unsupported frame.
    pub fn is_expected_skip(&self) -> bool {
        matches!(
            self,
            FrameError::NotIpFrame { .. } | FrameError::NotUdpFrame { .. }
        )
    }
}

/// Errors raised at codec resolution or decode time. Fatal for the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The payload type maps to no known codec identity.
    #[error(
        "unsupported codec for payload type {payload_type}; supported codecs are: {supported}"
    )]
    UnsupportedPayloadType {
        payload_type: u16,
        supported: &'static str,
    },

    /// The codec is recognized by the registry but has no decode path.
    #[error("{codec} is recognized but its decoder is not implemented")]
    DecodeNotImplemented { codec: CodecId },

    /// The concatenated payload length is not a whole number of codec frames.
    #[error(
        "misaligned {codec} payload: {got} bytes is not a multiple of the \
         {frame_bytes}-byte frame size"
    )]
    MisalignedPayload {
        codec: CodecId,
        frame_bytes: usize,
        got: usize,
    },
}

/// Top-level error for one call-decode invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallDecodeError {
    /// A packet's payload type differed from the one the stream resolved to.
    /// One codec per call is assumed; mid-call codec changes are not
    /// supported.
    #[error(
        "inconsistent payload type at capture index {capture_index}: \
         stream resolved to {expected}, packet carries {got}"
    )]
    InconsistentPayloadType {
        expected: PayloadType,
        got: PayloadType,
        capture_index: usize,
    },

    /// The stream contained zero usable RTP packets.
    #[error("stream contains no decodable audio data")]
    NoAudioData,

    /// Codec resolution or decoding failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}
