// tests/unit_tests.rs
use vi_calc::batch::BatchConfig;
use vi_calc::io::color::{grey_ramp, ramp_rules};
use vi_calc::processing::engine::{IndexEngine, PixelBands, RowBundle};
use vi_calc::processing::indices::{atmospheric, ratio, soil, tasseled_cap, BandSet, IndexKind};
use vi_calc::utils::fixed_point::to_fixed_point;

/// Helper to build a two-band pixel; optional bands read as nodata.
fn px(red: f64, nir: f64) -> PixelBands {
    PixelBands {
        red: Some(red),
        nir: Some(nir),
        ..Default::default()
    }
}

/// Helper to build an engine; six-band runs supply every optional band.
fn engine(kind: IndexKind) -> IndexEngine {
    let supplied = BandSet {
        green: true,
        blue: true,
        chan5: true,
        chan7: true,
    };
    IndexEngine::new(kind, supplied).expect("engine configuration")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "Expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_simple_ratio_known_value() {
    // sr = nir / red, exact for these inputs
    assert_eq!(ratio::sr(0.2, 0.5), 2.5);
}

#[test]
fn test_dvi_zero_when_bands_equal() {
    assert_eq!(ratio::dvi(0.3, 0.3), 0.0);
}

#[test]
fn test_ratio_formula_values() {
    assert_close(ratio::ndvi(0.1, 0.5), 0.4 / 0.6);
    assert_close(ratio::ipvi(0.1, 0.5), 0.5 / 0.6);
}

#[test]
fn test_soil_formula_values() {
    // pvi: (nir - a*red - b) / sqrt(1 + a^2), a = 1.22, b = 0.03
    assert_close(soil::pvi(0.2, 0.4), 0.079875);
    // wdvi: nir - a*red
    assert_close(soil::wdvi(0.2, 0.4), 0.156);
    // savi with L = 0.5
    assert_close(soil::savi(0.1, 0.5), (0.4 / 1.1) * 1.5);
    // closed-form msavi2
    assert_close(soil::msavi2(0.1, 0.5), 0.5 * (2.0 - 0.8f64.sqrt()));
}

#[test]
fn test_msavi_self_adjusting_l() {
    // ndvi = 0 makes L = 1 and the numerator 0
    assert_close(soil::msavi(0.3, 0.3), 0.0);
    // red = 0: ndvi = 1, wdvi = nir, L = 1 - 2*1.22*0.5 = -0.22
    assert_close(soil::msavi(0.0, 0.5), (0.5 / 0.28) * 0.78);
}

#[test]
fn test_atmospheric_formula_values() {
    // evi = 2.5*(nir - red) / (nir + 6*red - 7.5*blue + 1)
    assert_close(atmospheric::evi(0.05, 0.1, 0.5), 1.0 / 1.725);
    // arvi: rb = red - (blue - red) = 0.15
    assert_close(atmospheric::arvi(0.1, 0.5, 0.05), 0.35 / 0.65);
    // gari: g = green - (blue - red) = 0.25
    assert_close(atmospheric::gari(0.1, 0.5, 0.05, 0.2), 0.25 / 0.75);
    // gemi at red = 0.1, nir = 0.5: eta = 1.28/1.1
    assert_close(atmospheric::gemi(0.1, 0.5), 0.8529018);
}

#[test]
fn test_gvi_weighted_sum() {
    let value = tasseled_cap::gvi(0.05, 0.2, 0.1, 0.5, 0.3, 0.2);
    assert_close(value, 0.23405);
}

#[test]
fn test_ndvi_range_and_guard() {
    let ndvi = engine(IndexKind::Ndvi);

    // Valid reflectance pairs stay inside [-1, 1]
    for (red, nir) in [(0.0, 1.0), (1.0, 0.0), (0.1, 0.5), (0.7, 0.2), (0.001, 0.0)] {
        let value = ndvi.evaluate(&px(red, nir)).expect("computed value");
        assert!(
            (-1.0..=1.0).contains(&value),
            "ndvi({}, {}) = {} out of range",
            red,
            nir,
            value
        );
    }

    // Near-zero denominator masks the pixel regardless of the values
    assert_eq!(ndvi.evaluate(&px(0.0004, 0.0003)), None);
    assert_eq!(ndvi.evaluate(&px(0.0, 0.0)), None);
}

#[test]
fn test_nodata_propagates_from_required_bands() {
    let nodata_red = PixelBands {
        red: None,
        nir: Some(0.5),
        ..Default::default()
    };
    let nodata_nir = PixelBands {
        red: Some(0.1),
        nir: None,
        ..Default::default()
    };
    for kind in [IndexKind::Sr, IndexKind::Savi, IndexKind::Gvi] {
        assert_eq!(engine(kind).evaluate(&nodata_red), None);
        assert_eq!(engine(kind).evaluate(&nodata_nir), None);
    }
}

#[test]
fn test_unrequired_band_nodata_is_ignored() {
    // sr only consumes red and nir; a nodata blue must not mask the pixel
    let bundle = PixelBands {
        red: Some(0.2),
        nir: Some(0.5),
        blue: None,
        green: None,
        ..Default::default()
    };
    assert_eq!(engine(IndexKind::Sr).evaluate(&bundle), Some(2.5));
}

#[test]
fn test_optional_band_nodata_masks_pixel() {
    // blue is supplied for the run but nodata at this pixel
    let bundle = PixelBands {
        red: Some(0.1),
        nir: Some(0.5),
        blue: None,
        ..Default::default()
    };
    assert_eq!(engine(IndexKind::Evi).evaluate(&bundle), None);
    assert_eq!(engine(IndexKind::Arvi).evaluate(&bundle), None);
}

#[test]
fn test_missing_band_rejected_at_configuration() {
    // evi needs blue
    let err = IndexEngine::new(IndexKind::Evi, BandSet::NONE).unwrap_err();
    assert!(err.to_string().contains("blue"), "got: {}", err);

    // gari needs blue and green; only blue supplied
    let blue_only = BandSet {
        blue: true,
        ..BandSet::NONE
    };
    let err = IndexEngine::new(IndexKind::Gari, blue_only).unwrap_err();
    assert!(err.to_string().contains("green"), "got: {}", err);

    // gvi needs all four optional bands
    let err = IndexEngine::new(IndexKind::Gvi, blue_only).unwrap_err();
    let message = err.to_string();
    for band in ["green", "chan5", "chan7"] {
        assert!(message.contains(band), "missing {} in: {}", band, message);
    }

    // two-band indexes run without any optional band
    for kind in [
        IndexKind::Sr,
        IndexKind::Ndvi,
        IndexKind::Pvi,
        IndexKind::Msavi2,
        IndexKind::Gemi,
    ] {
        assert!(IndexEngine::new(kind, BandSet::NONE).is_ok());
    }
}

#[test]
fn test_row_evaluation_preserves_order() {
    let ndvi = engine(IndexKind::Ndvi);
    let rows = RowBundle {
        red: vec![Some(0.1), Some(0.0004), None, Some(0.3)],
        nir: vec![Some(0.5), Some(0.0003), Some(0.5), Some(0.3)],
        ..Default::default()
    };

    let mut out = vec![None; 4];
    ndvi.evaluate_row(&rows, &mut out);

    assert_close(out[0].expect("col 0"), 0.4 / 0.6);
    assert_eq!(out[1], None); // denominator guard
    assert_eq!(out[2], None); // nodata red
    assert_close(out[3].expect("col 3"), 0.0);

    // Same inputs, same outputs
    let mut again = vec![None; 4];
    ndvi.evaluate_row(&rows, &mut again);
    assert_eq!(out, again);
}

#[test]
fn test_fixed_point_conversion() {
    let values = [Some(0.5), None, Some(2.5), Some(-1.5), Some(5.0)];
    let fixed = to_fixed_point(&values, 10000, -10000);

    assert_eq!(fixed[0], 5000);
    assert_eq!(fixed[1], -10000); // nodata marker
    assert_eq!(fixed[2], 25000); // sr-like values still representable
    assert_eq!(fixed[3], -9999); // clamped just above the marker
    assert_eq!(fixed[4], i16::MAX); // saturates instead of wrapping
}

#[test]
fn test_grey_ramp_rules() {
    let rules = ramp_rules(&grey_ramp(-1.0, 1.0));
    assert_eq!(rules, "-1 0:0:0\n1 255:255:255\n");

    // fixed-point output scales the stops with the data
    let scaled = ramp_rules(&grey_ramp(-10000.0, 10000.0));
    assert_eq!(scaled, "-10000 0:0:0\n10000 255:255:255\n");
}

#[test]
fn test_batch_config_parsing() {
    let json = r#"{
        "global": { "float": true },
        "operations": [
            {
                "index": "ndvi",
                "bands": { "red": "red.tif", "nir": "nir.tif" },
                "output": "ndvi.tif"
            },
            {
                "index": "gvi",
                "bands": {
                    "red": "red.tif",
                    "nir": "nir.tif",
                    "green": "green.tif",
                    "blue": "blue.tif",
                    "chan5": "b5.tif",
                    "chan7": "b7.tif"
                },
                "output": "gvi.tif",
                "float": false,
                "scale_factor": 1000
            }
        ]
    }"#;

    let config: BatchConfig = serde_json::from_str(json).expect("valid config");
    assert!(config.global.float);
    assert_eq!(config.global.compress, "DEFLATE"); // default survives partial global
    assert_eq!(config.operations.len(), 2);

    assert_eq!(config.operations[0].index, IndexKind::Ndvi);
    assert!(config.operations[0].bands.green.is_none());

    let gvi = &config.operations[1];
    assert_eq!(gvi.index, IndexKind::Gvi);
    assert_eq!(gvi.float, Some(false));
    assert_eq!(gvi.scale_factor, Some(1000));
    assert!(gvi.bands.to_paths().supplied().chan5);
}
