// src/processing/indices/soil.rs
//! Soil-line corrected indices over red and nir.

use super::ratio;

/// Bare-soil line nir = a*red + b, Richardson and Wiegand (1977).
pub const SOIL_LINE_SLOPE: f64 = 1.22;
pub const SOIL_LINE_INTERCEPT: f64 = 0.03;

/// Canopy background adjustment for SAVI, Huete (1988).
pub const SAVI_L: f64 = 0.5;

/// Perpendicular Vegetation Index: signed distance from the soil line.
pub fn pvi(red: f64, nir: f64) -> f64 {
    (nir - SOIL_LINE_SLOPE * red - SOIL_LINE_INTERCEPT)
        / (1.0 + SOIL_LINE_SLOPE * SOIL_LINE_SLOPE).sqrt()
}

/// Weighted Difference Vegetation Index (Clevers 1989), using the soil-line slope.
pub fn wdvi(red: f64, nir: f64) -> f64 {
    nir - SOIL_LINE_SLOPE * red
}

/// Soil Adjusted Vegetation Index: ((nir - red) / (nir + red + L)) * (1 + L).
pub fn savi(red: f64, nir: f64) -> f64 {
    ((nir - red) / (nir + red + SAVI_L)) * (1.0 + SAVI_L)
}

/// Modified SAVI (Qi et al. 1994): SAVI with a self-adjusting L.
///
/// L = 1 - 2*a*NDVI*WDVI, a the soil-line slope.
pub fn msavi(red: f64, nir: f64) -> f64 {
    let l = 1.0 - 2.0 * SOIL_LINE_SLOPE * ratio::ndvi(red, nir) * wdvi(red, nir);
    ((nir - red) / (nir + red + l)) * (1.0 + l)
}

/// Closed-form MSAVI2 (Qi et al. 1994).
///
/// The discriminant equals (2*nir - 1)^2 + 8*red, so it is never negative
/// for non-negative reflectance.
pub fn msavi2(red: f64, nir: f64) -> f64 {
    let s = 2.0 * nir + 1.0;
    0.5 * (s - (s * s - 8.0 * (nir - red)).sqrt())
}
