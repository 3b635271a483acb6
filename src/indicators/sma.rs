//! Rolling simple moving average.

/// Compute the rolling arithmetic mean over `window` entries, aligned 1:1
/// with the input.
///
/// Entry *i* averages `values[i - window + 1 ..= i]`; the first
/// `window - 1` entries are `None` because no full window exists yet. A
/// zero window yields all `None`.
pub fn rolling_sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, &value) in values.iter().enumerate() {
        sum += value;
        if i >= window {
            sum -= values[i - window];
        }
        if i + 1 >= window {
            out.push(Some(sum / window as f64));
        } else {
            out.push(None);
        }
    }
    out
}
