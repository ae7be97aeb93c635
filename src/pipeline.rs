//! End-to-end call reconstruction pipeline.
//!
//! Composes the stages: assemble captured frames into a
//! [`CallAudioStream`], resolve and run the codec decoder, and serialize
//! the result as a RIFF/WAVE image. Each invocation is synchronous and
//! self-contained; decoder state lives on the stack for the duration of
//! one call.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assembler::{CallAudioStream, RawFrame, assemble};
use crate::codecs::{self, CodecSpec};
use crate::error::CallDecodeError;
use crate::wav::write_wav;

/// Ordering applied to RTP payloads during assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadOrder {
    /// Concatenate in capture order, trusting the capture to be in
    /// transmission order.
    #[default]
    Capture,
    /// Reorder by RTP sequence number relative to the first packet,
    /// wrap-aware. Duplicates keep their capture order.
    SequenceNumber,
}

/// Decode-time configuration for one call reconstruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    pub payload_order: PayloadOrder,
}

/// Decoded linear PCM with the format parameters needed to contain it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAudio {
    /// Little-endian PCM bytes.
    pub pcm: Vec<u8>,
    pub spec: CodecSpec,
}

/// Decodes an assembled stream's payload to PCM.
///
/// A stream with zero parsed packets fails with
/// [`CallDecodeError::NoAudioData`]; codec resolution and decode failures
/// propagate as [`CallDecodeError::Codec`].
pub fn decode_stream(stream: &CallAudioStream) -> Result<DecodedAudio, CallDecodeError> {
    if stream.packet_count == 0 {
        return Err(CallDecodeError::NoAudioData);
    }
    let codec = stream.resolve_codec()?;
    let pcm = codecs::decode(codec, &stream.payload)?;
    debug!(%codec, pcm_bytes = pcm.len(), "decoded call audio");
    Ok(DecodedAudio {
        pcm,
        spec: codec.spec(),
    })
}

/// Reconstructs one call's audio from captured frames to a complete
/// RIFF/WAVE file image.
pub fn reconstruct_call_audio<'a, I>(
    frames: I,
    config: &DecodeConfig,
) -> Result<Vec<u8>, CallDecodeError>
where
    I: IntoIterator<Item = RawFrame<'a>>,
{
    let stream = assemble(frames, config)?;
    let audio = decode_stream(&stream)?;
    Ok(write_wav(&audio.pcm, &audio.spec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_capture_order() {
        assert_eq!(
            DecodeConfig::default().payload_order,
            PayloadOrder::Capture
        );
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = DecodeConfig {
            payload_order: PayloadOrder::SequenceNumber,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"payload_order":"sequence_number"}"#);
        let back: DecodeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn missing_config_fields_fall_back_to_defaults() {
        let config: DecodeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DecodeConfig::default());
    }

    #[test]
    fn empty_stream_has_no_audio_data() {
        let stream = assemble(std::iter::empty(), &DecodeConfig::default()).unwrap();
        assert_eq!(decode_stream(&stream), Err(CallDecodeError::NoAudioData));
    }
}
