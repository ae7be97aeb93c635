//! Codec registry and decode dispatch.
//!
//! Maps RTP payload-type values to codec identities and their format
//! parameters, and dispatches the decode of a concatenated payload buffer
//! to the per-codec algorithm. The payload-type table follows RFC 3551
//! table 4 for the static audio assignments plus the vendor-assigned
//! dynamic values (320, 321, 400) used by the sniffer ecosystem this
//! pipeline interoperates with. Everything else resolves to an
//! unsupported-codec error.

pub mod g711;
pub mod g729;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Closed enumeration of the codec identities the registry knows about.
///
/// Only [`CodecId::Pcmu`], [`CodecId::Pcma`], and [`CodecId::G729`] have a
/// working decode path; the rest resolve to a [`CodecSpec`] but fail with
/// [`CodecError::DecodeNotImplemented`] when decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodecId {
    /// ITU-T G.711 u-law.
    Pcmu,
    /// ITU-T G.723.1.
    G723,
    /// ITU-T G.711 A-law.
    Pcma,
    /// ITU-T G.722 wideband.
    G722,
    /// ITU-T G.729 (CS-ACELP).
    G729,
    /// Adaptive Multi-Rate narrowband.
    Amr,
    /// Adaptive Multi-Rate wideband.
    AmrWb,
    /// RFC 4733 DTMF events.
    TelephoneEvent,
}

/// Comma-separated list of every codec identity the registry resolves.
/// Embedded in unsupported-codec error messages.
pub const KNOWN_CODEC_NAMES: &str =
    "PCMU, G723, PCMA, G722, G729, AMR, AMR-WB, Telephone-event";

impl CodecId {
    /// Every identity in the registry, in payload-type order.
    pub const ALL: [CodecId; 8] = [
        CodecId::Pcmu,
        CodecId::G723,
        CodecId::Pcma,
        CodecId::G722,
        CodecId::G729,
        CodecId::Amr,
        CodecId::AmrWb,
        CodecId::TelephoneEvent,
    ];

    /// Resolves a payload-type value to a codec identity.
    ///
    /// Takes a `u16` rather than the 7-bit header field so that the
    /// vendor-assigned dynamic values (320, 321, 400) supplied by external
    /// call metadata resolve through the same table. Total and
    /// deterministic: every unknown value yields
    /// [`CodecError::UnsupportedPayloadType`].
    pub fn from_payload_type(payload_type: u16) -> Result<Self, CodecError> {
        match payload_type {
            0 => Ok(CodecId::Pcmu),
            4 => Ok(CodecId::G723),
            8 => Ok(CodecId::Pcma),
            9 => Ok(CodecId::G722),
            18 => Ok(CodecId::G729),
            320 => Ok(CodecId::Amr),
            321 => Ok(CodecId::AmrWb),
            400 => Ok(CodecId::TelephoneEvent),
            other => Err(CodecError::UnsupportedPayloadType {
                payload_type: other,
                supported: KNOWN_CODEC_NAMES,
            }),
        }
    }

    /// Canonical display name of the codec identity.
    pub fn name(self) -> &'static str {
        match self {
            CodecId::Pcmu => "PCMU",
            CodecId::G723 => "G723",
            CodecId::Pcma => "PCMA",
            CodecId::G722 => "G722",
            CodecId::G729 => "G729",
            CodecId::Amr => "AMR",
            CodecId::AmrWb => "AMR-WB",
            CodecId::TelephoneEvent => "Telephone-event",
        }
    }

    /// Whether a decode algorithm exists for this codec.
    pub fn is_decodable(self) -> bool {
        matches!(self, CodecId::Pcmu | CodecId::Pcma | CodecId::G729)
    }

    /// Format parameters for container generation, per the respective
    /// ITU-T/3GPP recommendations.
    pub fn spec(self) -> CodecSpec {
        let (sample_rate_hz, sample_width_bits) = match self {
            CodecId::Pcmu | CodecId::Pcma => (8000, 8),
            CodecId::G722 => (16000, 14),
            CodecId::G729 | CodecId::G723 | CodecId::Amr => (8000, 16),
            CodecId::AmrWb => (16000, 16),
            CodecId::TelephoneEvent => (8000, 16),
        };
        CodecSpec {
            codec: self,
            sample_rate_hz,
            channels: 1,
            sample_width_bits,
        }
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-codec format parameters used for waveform container generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecSpec {
    pub codec: CodecId,
    /// Sampling frequency in Hz.
    pub sample_rate_hz: u32,
    /// Channel count; every registry codec is mono.
    pub channels: u16,
    /// Native sample width in bits, before byte rounding.
    pub sample_width_bits: u16,
}

impl CodecSpec {
    /// Container sample width in whole bytes, rounded up. G.722's 14-bit
    /// samples occupy 2 bytes each.
    #[inline]
    pub fn container_bytes_per_sample(&self) -> u16 {
        self.sample_width_bits.div_ceil(8)
    }

    /// Container sample width in bits, rounded up to a byte boundary.
    #[inline]
    pub fn container_bits_per_sample(&self) -> u16 {
        self.container_bytes_per_sample() * 8
    }
}

/// Decodes a concatenated payload buffer into little-endian linear PCM
/// bytes using the codec's algorithm.
pub fn decode(codec: CodecId, payload: &[u8]) -> Result<Vec<u8>, CodecError> {
    match codec {
        CodecId::Pcmu => Ok(pcm_to_le_bytes(&g711::decode_ulaw(payload))),
        CodecId::Pcma => Ok(pcm_to_le_bytes(&g711::decode_alaw(payload))),
        CodecId::G729 => {
            let samples = g729::decode(payload)?;
            Ok(pcm_to_le_bytes(&samples))
        }
        other => Err(CodecError::DecodeNotImplemented { codec: other }),
    }
}

/// Serializes 16-bit linear PCM samples as little-endian bytes.
fn pcm_to_le_bytes(samples: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_payload_types_resolve() {
        assert_eq!(CodecId::from_payload_type(0).unwrap(), CodecId::Pcmu);
        assert_eq!(CodecId::from_payload_type(4).unwrap(), CodecId::G723);
        assert_eq!(CodecId::from_payload_type(8).unwrap(), CodecId::Pcma);
        assert_eq!(CodecId::from_payload_type(9).unwrap(), CodecId::G722);
        assert_eq!(CodecId::from_payload_type(18).unwrap(), CodecId::G729);
    }

    #[test]
    fn vendor_dynamic_payload_types_resolve() {
        assert_eq!(CodecId::from_payload_type(320).unwrap(), CodecId::Amr);
        assert_eq!(CodecId::from_payload_type(321).unwrap(), CodecId::AmrWb);
        assert_eq!(
            CodecId::from_payload_type(400).unwrap(),
            CodecId::TelephoneEvent
        );
    }

    #[test]
    fn reserved_static_values_are_unsupported() {
        // GSM (3) and CN (13) are assigned in RFC 3551 but not decodable
        // here; they must resolve to the unsupported-codec error.
        for pt in [3u16, 5, 10, 13, 16, 96, 127] {
            let err = CodecId::from_payload_type(pt).unwrap_err();
            match err {
                CodecError::UnsupportedPayloadType {
                    payload_type,
                    supported,
                } => {
                    assert_eq!(payload_type, pt);
                    assert_eq!(supported, KNOWN_CODEC_NAMES);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn unsupported_error_lists_known_identities() {
        let message = CodecId::from_payload_type(42).unwrap_err().to_string();
        for id in CodecId::ALL {
            assert!(
                message.contains(id.name()),
                "error message missing {}: {message}",
                id.name()
            );
        }
    }

    #[test]
    fn codec_specs_match_recommendations() {
        let pcmu = CodecId::Pcmu.spec();
        assert_eq!(pcmu.sample_rate_hz, 8000);
        assert_eq!(pcmu.channels, 1);
        assert_eq!(pcmu.sample_width_bits, 8);
        assert_eq!(pcmu.container_bits_per_sample(), 8);

        let g722 = CodecId::G722.spec();
        assert_eq!(g722.sample_rate_hz, 16000);
        assert_eq!(g722.sample_width_bits, 14);
        // 14 bits stored as two container bytes
        assert_eq!(g722.container_bytes_per_sample(), 2);
        assert_eq!(g722.container_bits_per_sample(), 16);

        let g729 = CodecId::G729.spec();
        assert_eq!(g729.sample_rate_hz, 8000);
        assert_eq!(g729.sample_width_bits, 16);
    }

    #[test]
    fn recognized_codecs_without_decoder_fail_explicitly() {
        for codec in [CodecId::G723, CodecId::G722, CodecId::Amr, CodecId::AmrWb] {
            assert!(!codec.is_decodable());
            assert_eq!(
                decode(codec, &[0u8; 20]),
                Err(CodecError::DecodeNotImplemented { codec })
            );
        }
    }

    #[test]
    fn pcm_serialization_is_little_endian() {
        assert_eq!(
            pcm_to_le_bytes(&[0x0102, -2]),
            vec![0x02, 0x01, 0xfe, 0xff]
        );
    }
}
