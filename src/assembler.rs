//! Call audio stream assembly.
//!
//! Walks the captured frames of one call in order, strips the network
//! framing, parses the RTP headers, and concatenates the media payloads
//! into a single buffer. Frames that fail at any layer are recorded in a
//! skip log against their capture index and never abort the stream; a
//! payload-type change mid-stream does, since one codec per call is
//! assumed.

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace, warn};

use crate::codecs::CodecId;
use crate::error::{CallDecodeError, FrameError};
use crate::frame::strip_frame_layers;
use crate::pipeline::{DecodeConfig, PayloadOrder};
use crate::rtp::{RtpPacket, parse_rtp};
use crate::types::PayloadType;

/// One captured link-layer frame, tagged with its position in the capture.
#[derive(Debug, Clone, Copy)]
pub struct RawFrame<'a> {
    pub bytes: &'a [u8],
    pub capture_index: usize,
}

impl<'a> RawFrame<'a> {
    pub fn new(bytes: &'a [u8], capture_index: usize) -> Self {
        Self {
            bytes,
            capture_index,
        }
    }
}

/// Skip-log entry: a frame that contributed no audio, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFrame {
    pub capture_index: usize,
    pub reason: FrameError,
}

/// The reassembled media stream of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallAudioStream {
    /// Concatenated RTP payload bytes, still codec-encoded.
    pub payload: Bytes,
    /// Payload type resolved from the first parsed packet; `None` when the
    /// capture held no parseable RTP.
    pub payload_type: Option<PayloadType>,
    /// Number of RTP packets that contributed payload.
    pub packet_count: usize,
    /// Frames discarded during assembly, in capture order.
    pub skipped: Vec<SkippedFrame>,
}

impl CallAudioStream {
    /// Resolves the stream's codec identity from its payload type.
    pub fn resolve_codec(&self) -> Result<CodecId, CallDecodeError> {
        let payload_type = self.payload_type.ok_or(CallDecodeError::NoAudioData)?;
        let codec = CodecId::from_payload_type(u16::from(payload_type.value()))?;
        Ok(codec)
    }
}

/// Assembles the captured frames of one call into a [`CallAudioStream`].
///
/// The first parsed packet's payload type becomes the stream's; any later
/// packet carrying a different one fails the whole stream with
/// [`CallDecodeError::InconsistentPayloadType`]. Payloads are concatenated
/// in capture order, or reordered by sequence number when the
/// configuration asks for it.
pub fn assemble<'a, I>(frames: I, config: &DecodeConfig) -> Result<CallAudioStream, CallDecodeError>
where
    I: IntoIterator<Item = RawFrame<'a>>,
{
    let mut skipped = Vec::new();
    let mut payload_type: Option<PayloadType> = None;
    let mut packets: Vec<RtpPacket<'a>> = Vec::new();

    for frame in frames {
        let parsed = strip_frame_layers(frame.bytes).and_then(parse_rtp);
        let (header, payload) = match parsed {
            Ok(parts) => parts,
            Err(reason) => {
                if reason.is_expected_skip() {
                    trace!(
                        capture_index = frame.capture_index,
                        %reason,
                        "skipping non-RTP frame"
                    );
                } else {
                    warn!(capture_index = frame.capture_index, %reason, "skipping frame");
                }
                skipped.push(SkippedFrame {
                    capture_index: frame.capture_index,
                    reason,
                });
                continue;
            }
        };

        match payload_type {
            None => payload_type = Some(header.payload_type),
            Some(expected) if expected != header.payload_type => {
                return Err(CallDecodeError::InconsistentPayloadType {
                    expected,
                    got: header.payload_type,
                    capture_index: frame.capture_index,
                });
            }
            Some(_) => {}
        }

        packets.push(RtpPacket {
            header,
            payload,
            capture_index: frame.capture_index,
        });
    }

    if config.payload_order == PayloadOrder::SequenceNumber
        && let Some(first) = packets.first().map(|p| p.header.sequence_number)
    {
        // Wrap-aware: order by distance from the first packet's sequence
        // number, so a stream crossing 65535 stays contiguous. The sort is
        // stable, so duplicates keep their capture order.
        packets.sort_by_key(|p| p.header.sequence_number.wrapping_sub(first));
    }

    let total: usize = packets.iter().map(|p| p.payload.len()).sum();
    let mut payload = BytesMut::with_capacity(total);
    for packet in &packets {
        payload.extend_from_slice(packet.payload);
    }

    debug!(
        packets = packets.len(),
        skipped = skipped.len(),
        payload_bytes = payload.len(),
        payload_type = ?payload_type,
        "assembled call audio stream"
    );

    Ok(CallAudioStream {
        payload: payload.freeze(),
        payload_type,
        packet_count: packets.len(),
        skipped,
    })
}
