//! `rtpwav`: VoIP call-audio reconstruction from captured network frames.
//!
//! This library rebuilds the decoded audio of a single VoIP call from a
//! sequence of captured link-layer frames: it strips the Ethernet/IPv4/UDP
//! framing, parses RTP headers, resolves the codec from the RTP payload
//! type, reassembles the payload stream, decodes it to linear PCM, and
//! emits a RIFF/WAVE container. The primary entry point is
//! [`reconstruct_call_audio`].
//!
//! ## Core Concepts
//!
//! - **[`reconstruct_call_audio`]**: The end-to-end pipeline, frames in,
//!   WAVE file image out. The intermediate stages ([`assemble`],
//!   [`decode_stream`], [`write_wav`]) are public for callers that need
//!   them separately.
//! - **[`CallAudioStream`]**: The reassembled media stream of one call,
//!   with a machine-readable skip log of the frames that contributed no
//!   audio.
//! - **[`CodecId`]**: The closed registry of codec identities reachable
//!   from RTP payload-type values; PCMU, PCMA, and G.729 decode, the rest
//!   resolve but fail explicitly.
//!
//! ## Quick Start
//!
//! ```rust
//! use rtpwav::{DecodeConfig, RawFrame, reconstruct_call_audio};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // One captured Ethernet frame carrying a PCMU RTP packet.
//!     let mut frame = Vec::new();
//!     frame.extend_from_slice(&[0x02, 0, 0, 0, 0, 1, 0x02, 0, 0, 0, 0, 2, 0x08, 0x00]);
//!     frame.extend_from_slice(&[
//!         0x45, 0x00, 0x00, 0xc8, 0x00, 0x01, 0x40, 0x00, 0x40, 0x11, 0x00, 0x00, 10, 0, 2,
//!         15, 10, 0, 2, 20,
//!     ]);
//!     frame.extend_from_slice(&[0x6d, 0x26, 0x17, 0x70, 0x00, 0xb4, 0x00, 0x00]);
//!     frame.extend_from_slice(&[
//!         0x80, 0x00, 0x92, 0xdb, 0x00, 0x00, 0x00, 0xa0, 0x34, 0x3d, 0xa9, 0x9b,
//!     ]);
//!     frame.extend_from_slice(&[0xff; 160]); // u-law silence
//!
//!     let frames = [RawFrame::new(&frame, 0)];
//!     let wav = reconstruct_call_audio(frames, &DecodeConfig::default())?;
//!     assert_eq!(&wav[0..4], b"RIFF");
//!     Ok(())
//! }
//! ```

pub mod assembler;
pub mod codecs;
pub mod constants;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod rtp;
pub mod types;
pub mod wav;

pub use assembler::{CallAudioStream, RawFrame, SkippedFrame, assemble};
pub use codecs::{CodecId, CodecSpec, KNOWN_CODEC_NAMES};
pub use error::{CallDecodeError, CodecError, FrameError, NetworkLayer};
pub use pipeline::{
    DecodeConfig, DecodedAudio, PayloadOrder, decode_stream, reconstruct_call_audio,
};
pub use rtp::{RtpHeader, RtpPacket, parse_rtp};
pub use types::{PayloadType, SequenceNumber, Ssrc, Timestamp};
pub use wav::write_wav;
