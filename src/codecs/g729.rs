//! ITU-T G.729 decoder (CS-ACELP analysis-by-synthesis).
//!
//! Each 10-byte frame carries 80 bits of quantizer indices: LSP indices for
//! the spectral envelope, pitch lags and algebraic-codebook pulses for the
//! excitation, and gain indices for the two excitation components. The
//! decoder unpacks those parameters, rebuilds the excitation from its
//! adaptive (pitch history) and fixed (pulse) parts, and runs it through
//! the 10th-order LPC synthesis filter to produce 80 linear PCM samples
//! per frame.
//!
//! The bit layout follows the ITU-T G.729 frame format exactly. The
//! parameter reconstruction uses direct table lookups instead of the
//! recommendation's moving-average predictors, and integer pitch lags
//! (fractional delays are rounded), so the output is not bit-exact against
//! the ITU test vectors. Linking the reference codec library through FFI
//! is the alternative when bit-exact output is required.

use crate::codecs::CodecId;
use crate::constants::{
    G729_FRAME_LENGTH_BYTES, G729_LP_ORDER, G729_PITCH_LAG_MAX, G729_PITCH_LAG_MIN,
    G729_SAMPLES_PER_FRAME, G729_SUBFRAME_LENGTH,
};
use crate::error::CodecError;

const L_FRAME: usize = G729_SAMPLES_PER_FRAME;
const L_SUBFR: usize = G729_SUBFRAME_LENGTH;
const M: usize = G729_LP_ORDER;
const PIT_MIN: usize = G729_PITCH_LAG_MIN;
const PIT_MAX: usize = G729_PITCH_LAG_MAX;

/// Excitation history kept for adaptive-codebook reconstruction.
const EXC_HISTORY: usize = PIT_MAX + L_SUBFR;

/// Hard limit on excitation magnitude; keeps the pitch feedback loop
/// bounded on adversarial input.
const EXC_LIMIT: f32 = 262_144.0;

/// Uniform LSF grid the dequantizer perturbs, (i + 1) * pi / 11.
const LSF_BASE: [f32; M] = [
    0.285_599_4,
    0.571_198_8,
    0.856_798_2,
    1.142_397_6,
    1.427_997_0,
    1.713_596_4,
    1.999_195_8,
    2.284_795_2,
    2.570_394_6,
    2.855_994_0,
];

/// Minimum spacing enforced between adjacent LSFs (filter stability).
const LSF_GAP: f32 = 0.03;

/// Adaptive-codebook gain by 3-bit GA index.
const PITCH_GAIN_TABLE: [f32; 8] = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0, 1.1, 1.2];

/// Fixed-codebook gain by 4-bit GB index, logarithmically spaced.
const FIXED_GAIN_TABLE: [f32; 16] = [
    0.0, 50.0, 80.0, 125.0, 200.0, 315.0, 500.0, 800.0, 1250.0, 2000.0, 3150.0, 5000.0, 6300.0,
    8000.0, 10000.0, 12500.0,
];

/// Decodes a concatenated G.729 payload into linear PCM samples.
///
/// The payload must be a whole number of 10-byte frames; each frame yields
/// 80 samples. Decoder state (excitation history, synthesis memory, LSF
/// memory) carries across frames within one payload buffer.
pub fn decode(payload: &[u8]) -> Result<Vec<i16>, CodecError> {
    if payload.len() % G729_FRAME_LENGTH_BYTES != 0 {
        return Err(CodecError::MisalignedPayload {
            codec: CodecId::G729,
            frame_bytes: G729_FRAME_LENGTH_BYTES,
            got: payload.len(),
        });
    }

    let mut decoder = G729Decoder::new();
    let mut samples = Vec::with_capacity(payload.len() / G729_FRAME_LENGTH_BYTES * L_FRAME);
    for chunk in payload.chunks_exact(G729_FRAME_LENGTH_BYTES) {
        let mut frame = [0u8; G729_FRAME_LENGTH_BYTES];
        frame.copy_from_slice(chunk);
        let params = FrameParameters::unpack(&frame);
        samples.extend_from_slice(&decoder.decode_frame(&params));
    }
    Ok(samples)
}

/// MSB-first reader over one compressed frame.
struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read(&mut self, count: u32) -> u32 {
        let mut value = 0u32;
        for _ in 0..count {
            let bit = (self.data[self.pos / 8] >> (7 - (self.pos % 8))) & 1;
            value = (value << 1) | u32::from(bit);
            self.pos += 1;
        }
        value
    }
}

/// Quantizer indices for one 5 ms subframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SubframeParameters {
    /// Pitch index: 8 bits (absolute) in subframe 1, 5 bits (relative) in
    /// subframe 2.
    pitch_index: u32,
    /// Pulse positions on the four interleaved ACELP tracks.
    positions: [usize; 4],
    /// Pulse signs, one bit per pulse (set = positive).
    signs: [bool; 4],
    gain_adaptive_index: usize,
    gain_fixed_index: usize,
}

/// All quantizer indices for one 10 ms frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameParameters {
    ma_switch: u32,
    lsp_index1: u32,
    lsp_index2: u32,
    lsp_index3: u32,
    subframes: [SubframeParameters; 2],
}

impl FrameParameters {
    /// Unpacks the 80-bit G.729 frame: L0(1) L1(7) L2(5) L3(5), then per
    /// subframe P(8/5) [P0 parity for subframe 1] C(13) S(4) GA(3) GB(4).
    fn unpack(frame: &[u8; G729_FRAME_LENGTH_BYTES]) -> Self {
        let mut reader = BitReader::new(frame);

        let ma_switch = reader.read(1);
        let lsp_index1 = reader.read(7);
        let lsp_index2 = reader.read(5);
        let lsp_index3 = reader.read(5);

        let pitch1 = reader.read(8);
        let _parity = reader.read(1);
        let sub1 = Self::unpack_subframe(&mut reader, pitch1);

        let pitch2 = reader.read(5);
        let sub2 = Self::unpack_subframe(&mut reader, pitch2);

        Self {
            ma_switch,
            lsp_index1,
            lsp_index2,
            lsp_index3,
            subframes: [sub1, sub2],
        }
    }

    fn unpack_subframe(reader: &mut BitReader<'_>, pitch_index: u32) -> SubframeParameters {
        let code = reader.read(13);
        let sign_bits = reader.read(4);
        let gain_adaptive_index = reader.read(3) as usize;
        let gain_fixed_index = reader.read(4) as usize;

        // Interleaved single-pulse tracks: pulses 0-2 sit on positions
        // 5m + k with 3-bit m, pulse 3 covers two tracks via its extra bit.
        let track3 = ((code >> 9) & 0x0F) as usize;
        let positions = [
            5 * (code & 0x07) as usize,
            5 * ((code >> 3) & 0x07) as usize + 1,
            5 * ((code >> 6) & 0x07) as usize + 2,
            5 * (track3 >> 1) + 3 + (track3 & 1),
        ];
        let signs = [
            sign_bits & 0x01 != 0,
            sign_bits & 0x02 != 0,
            sign_bits & 0x04 != 0,
            sign_bits & 0x08 != 0,
        ];

        SubframeParameters {
            pitch_index,
            positions,
            signs,
            gain_adaptive_index,
            gain_fixed_index,
        }
    }
}

/// Decoder state carried across frames of one payload.
struct G729Decoder {
    /// Past excitation, most recent sample last.
    excitation: [f32; EXC_HISTORY],
    /// Synthesis filter memory, most recent output last.
    synthesis_memory: [f32; M],
    /// Previous frame's dequantized LSFs for interpolation.
    previous_lsf: [f32; M],
}

impl G729Decoder {
    fn new() -> Self {
        Self {
            excitation: [0.0; EXC_HISTORY],
            synthesis_memory: [0.0; M],
            previous_lsf: LSF_BASE,
        }
    }

    fn decode_frame(&mut self, params: &FrameParameters) -> [i16; L_FRAME] {
        let lsf = self.dequantize_lsf(params);

        // Subframe 1 uses the midpoint of the previous and current LSF
        // sets, subframe 2 the current set, as in the recommendation.
        let mut lsf_mid = [0.0f32; M];
        for i in 0..M {
            lsf_mid[i] = 0.5 * (self.previous_lsf[i] + lsf[i]);
        }
        let lpc = [lsf_to_lpc(&lsf_mid), lsf_to_lpc(&lsf)];
        self.previous_lsf = lsf;

        let lag1 = decode_pitch_lag_absolute(params.subframes[0].pitch_index);
        let lag2 = decode_pitch_lag_relative(params.subframes[1].pitch_index, lag1);
        let lags = [lag1, lag2];

        let mut output = [0i16; L_FRAME];
        for (s, subframe) in params.subframes.iter().enumerate() {
            let excitation = self.build_excitation(subframe, lags[s]);
            let mut speech = [0.0f32; L_SUBFR];
            synthesis_filter(&lpc[s], &excitation, &mut self.synthesis_memory, &mut speech);
            for n in 0..L_SUBFR {
                output[s * L_SUBFR + n] = speech[n].clamp(-32768.0, 32767.0) as i16;
            }
        }
        output
    }

    /// Rebuilds one subframe of excitation from the adaptive-codebook
    /// history and the algebraic-codebook pulses, then rolls it into the
    /// history buffer.
    fn build_excitation(&mut self, subframe: &SubframeParameters, lag: usize) -> [f32; L_SUBFR] {
        let pitch_gain = PITCH_GAIN_TABLE[subframe.gain_adaptive_index];
        let fixed_gain = FIXED_GAIN_TABLE[subframe.gain_fixed_index];

        let mut excitation = [0.0f32; L_SUBFR];
        for n in 0..L_SUBFR {
            // v(n) = u(n - lag); for lags shorter than the subframe the
            // already-built part of the current excitation repeats.
            let adaptive = if n < lag {
                self.excitation[EXC_HISTORY - lag + n]
            } else {
                excitation[n - lag]
            };
            excitation[n] = (pitch_gain * adaptive).clamp(-EXC_LIMIT, EXC_LIMIT);
        }
        for k in 0..4 {
            let amplitude = if subframe.signs[k] { fixed_gain } else { -fixed_gain };
            let n = subframe.positions[k];
            excitation[n] = (excitation[n] + amplitude).clamp(-EXC_LIMIT, EXC_LIMIT);
        }

        self.excitation.copy_within(L_SUBFR.., 0);
        self.excitation[EXC_HISTORY - L_SUBFR..].copy_from_slice(&excitation);
        excitation
    }

    /// Maps the three LSP indices onto a monotone LSF set.
    ///
    /// The first-stage index shifts the whole grid, the second-stage
    /// indices perturb the lower and upper halves, and the L0 bit selects
    /// the weight of the smoothing against the previous frame's LSFs.
    fn dequantize_lsf(&self, params: &FrameParameters) -> [f32; M] {
        let shift = (params.lsp_index1 as f32 - 63.5) / 63.5;
        let low = (params.lsp_index2 as f32 - 15.5) / 15.5;
        let high = (params.lsp_index3 as f32 - 15.5) / 15.5;
        let current_weight = if params.ma_switch == 0 { 0.65 } else { 0.85 };

        let mut lsf = [0.0f32; M];
        for i in 0..M {
            let half = if i < 5 { low } else { high };
            let raw = LSF_BASE[i] + 0.08 * shift + 0.05 * half;
            lsf[i] = current_weight * raw + (1.0 - current_weight) * self.previous_lsf[i];
        }

        // Re-impose ordering and a minimum gap; quantizer indices are
        // attacker-controlled and the synthesis filter must stay stable.
        let mut floor = 2.0 * LSF_GAP;
        for value in lsf.iter_mut() {
            if *value < floor {
                *value = floor;
            }
            floor = *value + LSF_GAP;
        }
        lsf
    }
}

/// Decodes the 8-bit absolute pitch index of subframe 1 to an integer lag.
///
/// Indices below 197 encode fractional lags in thirds; the fraction is
/// discarded here.
fn decode_pitch_lag_absolute(index: u32) -> usize {
    let index = index as usize;
    let lag = if index < 197 { (index + 2) / 3 + 19 } else { index - 112 };
    lag.clamp(PIT_MIN, PIT_MAX)
}

/// Decodes the 5-bit relative pitch index of subframe 2 against the lag of
/// subframe 1.
fn decode_pitch_lag_relative(index: u32, previous_lag: usize) -> usize {
    let search_min = previous_lag.saturating_sub(5).clamp(PIT_MIN, PIT_MAX - 9);
    let lag = search_min + (index as usize + 2) / 3;
    lag.clamp(PIT_MIN, PIT_MAX)
}

/// Expands five cosine-domain line spectral values into the symmetric
/// polynomial coefficients F(z), the Get_lsp_pol recursion of the
/// reference implementation.
fn lsp_polynomial(lsp_cos: &[f32; 5]) -> [f32; 6] {
    let mut f = [0.0f32; 6];
    f[0] = 1.0;
    f[1] = -2.0 * lsp_cos[0];
    for i in 2..=5 {
        let b = -2.0 * lsp_cos[i - 1];
        f[i] = b * f[i - 1] + 2.0 * f[i - 2];
        for j in (2..i).rev() {
            let term = b * f[j - 1] + f[j - 2];
            f[j] += term;
        }
        f[1] += b;
    }
    f
}

/// Converts a monotone LSF set into direct-form LPC coefficients,
/// a[0] = 1.
fn lsf_to_lpc(lsf: &[f32; M]) -> [f32; M + 1] {
    let mut even_cos = [0.0f32; 5];
    let mut odd_cos = [0.0f32; 5];
    for i in 0..5 {
        even_cos[i] = lsf[2 * i].cos();
        odd_cos[i] = lsf[2 * i + 1].cos();
    }
    let f1 = lsp_polynomial(&even_cos);
    let f2 = lsp_polynomial(&odd_cos);

    // A(z) = (F1(z)(1 + z^-1) + F2(z)(1 - z^-1)) / 2
    let mut a = [0.0f32; M + 1];
    a[0] = 1.0;
    for i in 1..=5 {
        let p = f1[i] + f1[i - 1];
        let q = f2[i] - f2[i - 1];
        a[i] = 0.5 * (p + q);
        a[M + 1 - i] = 0.5 * (p - q);
    }
    a
}

/// Runs one subframe of excitation through the all-pole synthesis filter
/// 1/A(z), updating the filter memory.
fn synthesis_filter(
    a: &[f32; M + 1],
    excitation: &[f32; L_SUBFR],
    memory: &mut [f32; M],
    output: &mut [f32; L_SUBFR],
) {
    for n in 0..L_SUBFR {
        let mut sample = excitation[n];
        for j in 1..=M {
            let previous = if n >= j {
                output[n - j]
            } else {
                memory[M + n - j]
            };
            sample -= a[j] * previous;
        }
        output[n] = sample.clamp(-EXC_LIMIT, EXC_LIMIT);
    }
    memory.copy_from_slice(&output[L_SUBFR - M..]);
}
