//! G.711 companding primitives
//!
//! Segment-based μ-law and A-law conversion between 16-bit linear PCM and
//! 8-bit code words, bit-compatible with the classic reference coder.

/// μ-law bias added before segment search
const ULAW_BIAS: i32 = 0x84;
/// Largest magnitude representable before the bias is added
const ULAW_CLIP: i32 = 32635;

/// Upper bounds of the eight A-law segments, in 13-bit magnitude
const ALAW_SEG_END: [i32; 8] = [0x1F, 0x3F, 0x7F, 0xFF, 0x1FF, 0x3FF, 0x7FF, 0xFFF];

/// Compress one linear sample to μ-law
pub fn linear_to_ulaw(sample: i16) -> u8 {
    let mut pcm = sample as i32;
    let sign = if pcm < 0 {
        pcm = -pcm;
        0x80
    } else {
        0x00
    };

    pcm = pcm.min(ULAW_CLIP) + ULAW_BIAS;

    // pcm is at least 0x84, so its top bit sits between bit 7 and bit 14
    let exponent = 24 - (pcm as u32).leading_zeros() as i32;
    let mantissa = (pcm >> (exponent + 3)) & 0x0F;

    !(sign | (exponent << 4) | mantissa) as u8
}

/// Expand one μ-law code word to linear
pub fn ulaw_to_linear(code: u8) -> i16 {
    let code = !code;
    let exponent = ((code >> 4) & 0x07) as i32;
    let mantissa = (code & 0x0F) as i32;

    let magnitude = (((mantissa << 3) + ULAW_BIAS) << exponent) - ULAW_BIAS;

    if code & 0x80 != 0 {
        -magnitude as i16
    } else {
        magnitude as i16
    }
}

/// Compress one linear sample to A-law
pub fn linear_to_alaw(sample: i16) -> u8 {
    let mut pcm = (sample as i32) >> 3;
    let mask = if pcm >= 0 {
        0xD5
    } else {
        pcm = -pcm - 1;
        0x55
    };

    let Some(segment) = ALAW_SEG_END.iter().position(|&end| pcm <= end) else {
        return (0x7F ^ mask) as u8;
    };

    let mut code = (segment as i32) << 4;
    if segment < 2 {
        code |= (pcm >> 1) & 0x0F;
    } else {
        code |= (pcm >> segment) & 0x0F;
    }

    (code ^ mask) as u8
}

/// Expand one A-law code word to linear
pub fn alaw_to_linear(code: u8) -> i16 {
    let code = (code ^ 0x55) as i32;
    let segment = (code & 0x70) >> 4;
    let mut magnitude = (code & 0x0F) << 4;

    match segment {
        0 => magnitude += 8,
        1 => magnitude += 0x108,
        _ => {
            magnitude += 0x108;
            magnitude <<= segment - 1;
        }
    }

    if code & 0x80 != 0 {
        magnitude as i16
    } else {
        -magnitude as i16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ulaw_silence() {
        assert_eq!(linear_to_ulaw(0), 0xFF);
        assert_eq!(ulaw_to_linear(0xFF), 0);
        assert_eq!(ulaw_to_linear(0x7F), 0);
    }

    #[test]
    fn test_alaw_silence() {
        assert_eq!(linear_to_alaw(0), 0xD5);
        assert_eq!(alaw_to_linear(0xD5), 8);
        assert_eq!(alaw_to_linear(0x55), -8);
    }

    #[test]
    fn test_extremes_saturate() {
        assert_eq!(linear_to_ulaw(i16::MAX), 0x80);
        assert_eq!(linear_to_ulaw(i16::MIN), 0x00);
        assert_eq!(linear_to_alaw(i16::MAX), 0xAA);
        assert_eq!(linear_to_alaw(i16::MIN), 0x2A);
        assert_eq!(ulaw_to_linear(0x80), 32124);
        assert_eq!(alaw_to_linear(0xAA), 32256);
    }

    #[test]
    fn test_code_words_are_stable() {
        // expanding and re-compressing any code word yields the same word
        for code in 0..=255u8 {
            if code != 0x7F {
                assert_eq!(linear_to_ulaw(ulaw_to_linear(code)), code);
            }
            assert_eq!(linear_to_alaw(alaw_to_linear(code)), code);
        }
    }
}
