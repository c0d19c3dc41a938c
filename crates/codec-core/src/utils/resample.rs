//! Linear-interpolation resampler
//!
//! Used when a transcode path connects codecs running at different sample
//! rates. Quality is adequate for telephony; anything better belongs in a
//! dedicated DSP stage.

/// Resample mono PCM from `from_rate` to `to_rate`
///
/// Returns the input unchanged when the rates match or either rate is zero.
pub fn resample_linear(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate || from_rate == 0 || to_rate == 0 || samples.is_empty() {
        return samples.to_vec();
    }

    let out_len = (samples.len() as u64 * to_rate as u64 / from_rate as u64) as usize;
    let step = from_rate as f64 / to_rate as f64;
    let last = samples.len() - 1;

    (0..out_len)
        .map(|i| {
            let pos = i as f64 * step;
            let idx = pos as usize;
            if idx >= last {
                return samples[last];
            }
            let frac = pos - idx as f64;
            let a = samples[idx] as f64;
            let b = samples[idx + 1] as f64;
            (a + (b - a) * frac).round() as i16
        })
        .collect()
}
