use crate::log;
use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;

/// Accuracies reported as percentages are moved to the unit interval.
pub fn normalize(value: f64) -> f64 {
    if value > 1.0 {
        value / 100.0
    } else {
        value
    }
}

/// Extracts the value of `key` from every line of `contents` that contains
/// it.
pub fn extract(contents: &str, key: &str) -> Result<Vec<f64>, Report> {
    let mut values = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        if !line.contains(key) {
            continue;
        }
        let value = log::value_after_key(line, key)
            .wrap_err_with(|| format!("line {}: {:?}", index + 1, line))?;
        values.push(normalize(value));
    }
    Ok(values)
}

/// Stride used to bring a series of length `len` close to `min_len`
/// elements. Ties are rounded to even.
pub fn stride(len: usize, min_len: usize) -> usize {
    let ratio = len as f64 / min_len as f64;
    (ratio.round_ties_even() as usize).max(1)
}

/// Keeps every `stride`-th element, starting with the first.
pub fn downsample(values: &[f64], stride: usize) -> Vec<f64> {
    values.iter().step_by(stride).copied().collect()
}

/// Downsamples all series so that they have approximately the length of the
/// shortest one.
pub fn align(series: Vec<Vec<f64>>) -> Result<Vec<Vec<f64>>, Report> {
    let min_len = match series.iter().map(Vec::len).min() {
        Some(min_len) => min_len,
        None => eyre::bail!("there should be at least one series to align"),
    };
    if min_len == 0 {
        eyre::bail!("cannot align series: at least one of them is empty");
    }

    let aligned = series
        .into_iter()
        .map(|values| {
            let stride = stride(values.len(), min_len);
            tracing::debug!(
                "downsampling series of length {} with stride {}",
                values.len(),
                stride
            );
            downsample(&values, stride)
        })
        .collect();
    Ok(aligned)
}

/// Moving average over `window` samples. The front of the series is padded
/// with its own first `window` values so that the output has the same length
/// as the input; output `i` averages the `window` padded samples ending at
/// input sample `i`.
pub fn smooth(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window > 0, "smoothing window should be at least 1");
    let padded: Vec<_> = values
        .iter()
        .take(window)
        .chain(values.iter())
        .copied()
        .collect();

    (0..values.len())
        .map(|index| {
            let start = index + 1;
            let end = (start + window).min(padded.len());
            let samples = &padded[start..end];
            samples.iter().sum::<f64>() / samples.len() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_values() {
        assert_eq!(normalize(75.5), 0.755);
        assert_eq!(normalize(1.0), 1.0);
        assert_eq!(normalize(0.7564), 0.7564);
        assert_eq!(normalize(100.0), 1.0);
    }

    #[test]
    fn extract_series() {
        let contents = "\
[config] caching various config files
Step 100 Acc1 = 50.0 loss 2.1
Step 200 Acc1: 0.62 loss 1.8
unrelated line
Step 300 Acc1 70
";
        let values = extract(contents, "Acc1").unwrap();
        assert_eq!(values, vec![0.5, 0.62, 0.7]);

        // unparsable value
        assert!(extract("Step 100 Acc1 = nan? x", "Acc1").is_err());
        // key with nothing after it
        assert!(extract("Step 100 Acc1", "Acc1").is_err());
        // no matching lines
        assert!(extract("loss 1.2", "Acc1").unwrap().is_empty());
    }

    #[test]
    fn stride_rounding() {
        assert_eq!(stride(100, 50), 2);
        assert_eq!(stride(50, 50), 1);
        assert_eq!(stride(74, 50), 1);
        assert_eq!(stride(76, 50), 2);
        // ties go to the even stride
        assert_eq!(stride(25, 10), 2);
        assert_eq!(stride(35, 10), 4);
    }

    #[test]
    fn align_series() {
        let long: Vec<_> = (0..100).map(|x| x as f64).collect();
        let short: Vec<_> = (0..50).map(|x| x as f64).collect();
        let aligned = align(vec![long, short.clone()]).unwrap();
        assert_eq!(aligned[0].len(), 50);
        assert_eq!(aligned[0][..3], [0.0, 2.0, 4.0]);
        assert_eq!(aligned[0][49], 98.0);
        assert_eq!(aligned[1], short);

        assert!(align(vec![vec![1.0], vec![]]).is_err());
        assert!(align(vec![]).is_err());
    }

    #[test]
    fn smooth_window() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(smooth(&values, 1), values);
        // padded: [1, 2, 1, 2, 3, 4]
        assert_eq!(smooth(&values, 2), vec![1.5, 1.5, 2.5, 3.5]);
        // window longer than the series: padded [1, 2, 1, 2]
        assert_eq!(smooth(&[1.0, 2.0], 3), vec![5.0 / 3.0, 1.5]);
        assert!(smooth(&[], 5).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn finite(values: Vec<f64>) -> Vec<f64> {
        values.into_iter().filter(|value| value.is_finite()).collect()
    }

    #[quickcheck]
    fn smooth_with_unit_window_is_identity(values: Vec<f64>) -> bool {
        let values = finite(values);
        smooth(&values, 1) == values
    }

    #[quickcheck]
    fn smooth_keeps_length(values: Vec<f64>, window: usize) -> bool {
        let values = finite(values);
        let window = window % 64 + 1;
        smooth(&values, window).len() == values.len()
    }

    #[quickcheck]
    fn align_keeps_shortest(lens: Vec<u8>) -> bool {
        let series: Vec<Vec<f64>> = lens
            .into_iter()
            .map(|len| (0..=len).map(|x| x as f64).collect())
            .collect();
        if series.is_empty() {
            return true;
        }
        let min_len = series.iter().map(Vec::len).min().unwrap();
        let aligned = align(series.clone()).unwrap();
        series.iter().zip(aligned.iter()).all(|(original, aligned)| {
            let stride = stride(original.len(), min_len);
            aligned.len() == (original.len() + stride - 1) / stride
                && (original.len() != min_len || aligned == original)
        })
    }
}
