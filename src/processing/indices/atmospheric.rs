// src/processing/indices/atmospheric.rs
//! Indices with atmospheric resistance terms.

/// Self-correction factor for the red-blue difference in ARVI and GARI
/// (Kaufman and Tanre 1992).
pub const GAMMA: f64 = 1.0;

/// Enhanced Vegetation Index (MODIS formulation):
/// 2.5 * (nir - red) / (nir + 6*red - 7.5*blue + 1).
pub fn evi(blue: f64, red: f64, nir: f64) -> f64 {
    2.5 * (nir - red) / (nir + 6.0 * red - 7.5 * blue + 1.0)
}

/// Atmospherically Resistant Vegetation Index: NDVI with red replaced by
/// rb = red - gamma*(blue - red).
pub fn arvi(red: f64, nir: f64, blue: f64) -> f64 {
    let rb = red - GAMMA * (blue - red);
    (nir - rb) / (nir + rb)
}

/// Green Atmospherically Resistant Vegetation Index (Gitelson et al. 1996).
pub fn gari(red: f64, nir: f64, blue: f64, green: f64) -> f64 {
    let g = green - GAMMA * (blue - red);
    (nir - g) / (nir + g)
}

/// Global Environmental Monitoring Index (Pinty and Verstraete 1992).
pub fn gemi(red: f64, nir: f64) -> f64 {
    let eta = (2.0 * (nir * nir - red * red) + 1.5 * nir + 0.5 * red) / (nir + red + 0.5);
    eta * (1.0 - 0.25 * eta) - (red - 0.125) / (1.0 - red)
}
