use fair_core::timeseries::FloatValue;

/// Mass of the atmosphere
/// unit: kg
pub const ATMOSPHERE_MASS: FloatValue = 5.1352e18;

/// Molecular weight of carbon
/// unit: g / mol
pub const MOLWT_C: FloatValue = 12.01;

/// Mean molecular weight of dry air
/// unit: g / mol
pub const MOLWT_AIR: FloatValue = 28.97;

/// Mass of carbon in one ppm of atmospheric CO2
/// unit: GtC / ppm
pub const GTC_PER_PPM: FloatValue = ATMOSPHERE_MASS / 1.0e18 * MOLWT_C / MOLWT_AIR;
