//! RIFF/WAVE container serialization.
//!
//! Pure serializer: wraps already-decoded PCM bytes in a RIFF header with a
//! single "fmt " and "data" chunk, little-endian throughout. The format
//! fields come from the codec's [`CodecSpec`]; the writer performs no
//! resampling or sample-width conversion.

use bytes::{BufMut, BytesMut};

use crate::codecs::CodecSpec;
use crate::constants::{WAVE_FMT_CHUNK_LENGTH, WAVE_FORMAT_PCM};

/// Size of everything before the PCM data: RIFF header, "WAVE" tag, "fmt "
/// chunk, and the "data" chunk header.
const WAV_HEADER_LENGTH: usize = 44;

/// Serializes PCM bytes into a complete RIFF/WAVE file image.
///
/// The bits-per-sample field is the codec's native sample width rounded up
/// to a whole byte, matching how the samples are actually stored.
pub fn write_wav(pcm: &[u8], spec: &CodecSpec) -> Vec<u8> {
    let bytes_per_sample = spec.container_bytes_per_sample();
    let block_align = spec.channels * bytes_per_sample;
    let byte_rate = spec.sample_rate_hz * u32::from(block_align);
    let data_length = pcm.len() as u32;

    let mut out = BytesMut::with_capacity(WAV_HEADER_LENGTH + pcm.len());
    out.put_slice(b"RIFF");
    out.put_u32_le(WAV_HEADER_LENGTH as u32 - 8 + data_length);
    out.put_slice(b"WAVE");

    out.put_slice(b"fmt ");
    out.put_u32_le(WAVE_FMT_CHUNK_LENGTH);
    out.put_u16_le(WAVE_FORMAT_PCM);
    out.put_u16_le(spec.channels);
    out.put_u32_le(spec.sample_rate_hz);
    out.put_u32_le(byte_rate);
    out.put_u16_le(block_align);
    out.put_u16_le(spec.container_bits_per_sample());

    out.put_slice(b"data");
    out.put_u32_le(data_length);
    out.put_slice(pcm);
    out.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::CodecId;

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
    }

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    }

    #[test]
    fn pcmu_header_fields() {
        let pcm = vec![0u8; 160];
        let wav = write_wav(&pcm, &CodecId::Pcmu.spec());

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_at(&wav, 4), 36 + 160);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u32_at(&wav, 16), 16);
        assert_eq!(u16_at(&wav, 20), 1); // PCM
        assert_eq!(u16_at(&wav, 22), 1); // mono
        assert_eq!(u32_at(&wav, 24), 8000);
        assert_eq!(u32_at(&wav, 28), 8000); // byte rate
        assert_eq!(u16_at(&wav, 32), 1); // block align
        assert_eq!(u16_at(&wav, 34), 8); // bits per sample
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(&wav, 40), 160);
        assert_eq!(&wav[44..], &pcm[..]);
    }

    #[test]
    fn g722_native_width_rounds_up_to_sixteen_bits() {
        let wav = write_wav(&[], &CodecId::G722.spec());
        assert_eq!(u32_at(&wav, 24), 16000);
        assert_eq!(u32_at(&wav, 28), 32000);
        assert_eq!(u16_at(&wav, 32), 2);
        assert_eq!(u16_at(&wav, 34), 16);
    }

    #[test]
    fn empty_pcm_still_yields_full_header() {
        let wav = write_wav(&[], &CodecId::G729.spec());
        assert_eq!(wav.len(), 44);
        assert_eq!(u32_at(&wav, 4), 36);
        assert_eq!(u32_at(&wav, 40), 0);
    }

    #[test]
    fn total_length_is_header_plus_data() {
        let pcm = vec![0x55u8; 1234];
        let wav = write_wav(&pcm, &CodecId::Pcma.spec());
        assert_eq!(wav.len(), 44 + 1234);
        assert_eq!(u32_at(&wav, 4) as usize, wav.len() - 8);
    }
}
