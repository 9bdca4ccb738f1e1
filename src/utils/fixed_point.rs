// src/utils/fixed_point.rs

/// Converts an output row to scaled int16 samples. Nodata cells map to
/// `nodata_value`; numeric cells clamp to the representable range, with the
/// low end held one code above `nodata_value` so data never collides with
/// the marker.
pub fn to_fixed_point(values: &[Option<f64>], scale_factor: i32, nodata_value: i16) -> Vec<i16> {
    let scale = f64::from(scale_factor);
    let lo = f64::from(nodata_value + 1) / scale;
    let hi = f64::from(i16::MAX) / scale;
    values
        .iter()
        .map(|value| match value {
            None => nodata_value,
            Some(v) => (v.clamp(lo, hi) * scale).round() as i16,
        })
        .collect()
}
