//! ITU-T G.711 u-law and A-law expansion.
//!
//! Implements the piecewise-linear logarithmic companding expansion from
//! ITU-T Recommendation G.711 (8-bit companded sample to 16-bit linear
//! PCM), following the ITU-T Software Tools Library reference arithmetic
//! bit-exactly. Compression (the encode direction) is out of scope for
//! this pipeline.

/// Expands one u-law companded sample to linear PCM.
///
/// The u-law code for digital silence is 0xFF, which expands to exactly 0.
pub fn ulaw_expand(compressed: u8) -> i16 {
    let sign = if compressed < 0x0080 { -1 } else { 1 };
    let mantissa = (!compressed) as i16;
    let exponent = (mantissa >> 4) & 0x0007;
    let segment = exponent + 1;
    let mantissa = mantissa & 0x000F;

    let step = 4 << segment;

    sign * ((0x0080 << exponent) + step * mantissa + step / 2 - 4 * 33)
}

/// Expands one A-law companded sample to linear PCM.
pub fn alaw_expand(compressed: u8) -> i16 {
    let mut ix = (compressed ^ 0x0055) as i16;

    ix &= 0x007F;
    let iexp = ix >> 4;
    let mut mant = ix & 0x000F;

    if iexp > 0 {
        mant += 16;
    }

    mant = (mant << 4) + 0x0008;

    if iexp > 1 {
        mant <<= iexp - 1;
    }

    if compressed > 127 { mant } else { -mant }
}

/// Expands a u-law payload buffer to linear PCM samples.
pub fn decode_ulaw(payload: &[u8]) -> Vec<i16> {
    payload.iter().map(|&byte| ulaw_expand(byte)).collect()
}

/// Expands an A-law payload buffer to linear PCM samples.
pub fn decode_alaw(payload: &[u8]) -> Vec<i16> {
    payload.iter().map(|&byte| alaw_expand(byte)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ulaw_known_values() {
        // Reference values from the ITU-T STL implementation.
        assert_eq!(ulaw_expand(0xff), 0);
        assert_eq!(ulaw_expand(0xef), 132);
        assert_eq!(ulaw_expand(0xcd), 1052);
        assert_eq!(ulaw_expand(0x6f), -132);
        assert_eq!(ulaw_expand(0x4d), -1052);
    }

    #[test]
    fn alaw_known_values() {
        assert_eq!(alaw_expand(0xd5), 8);
        assert_eq!(alaw_expand(0xdd), 136);
        assert_eq!(alaw_expand(0xe5), 1056);
        assert_eq!(alaw_expand(0x52), -120);
        assert_eq!(alaw_expand(0x7a), -1008);
    }

    #[test]
    fn ulaw_silence_run_expands_to_zero_samples() {
        let silence = vec![0xffu8; 160];
        let samples = decode_ulaw(&silence);
        assert_eq!(samples.len(), 160);
        assert!(samples.iter().all(|&s| s == 0));
    }

    #[test]
    fn expansion_output_count_matches_input() {
        let payload: Vec<u8> = (0..=255).collect();
        assert_eq!(decode_ulaw(&payload).len(), 256);
        assert_eq!(decode_alaw(&payload).len(), 256);
    }

    #[test]
    fn ulaw_sign_symmetry() {
        // Codes differing only in the sign bit expand to negated samples.
        for code in 0x80..=0xffu8 {
            let positive = ulaw_expand(code);
            let negative = ulaw_expand(code & 0x7f);
            assert_eq!(positive, -negative, "code 0x{code:02x}");
        }
    }

    #[test]
    fn alaw_sign_symmetry() {
        for code in 0x80..=0xffu8 {
            let positive = alaw_expand(code);
            let negative = alaw_expand(code & 0x7f);
            assert_eq!(positive, -negative, "code 0x{code:02x}");
        }
    }
}
