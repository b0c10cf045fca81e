use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Full model
// ---------------------------------------------------------------------------

#[napi]
pub fn run_investment_model(input_json: String) -> NapiResult<String> {
    let input: str_invest_core::model::run::InvestmentModelInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        str_invest_core::model::run::run_investment_model(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Single apartment
// ---------------------------------------------------------------------------

#[napi]
pub fn base_model(input_json: String) -> NapiResult<String> {
    let input: str_invest_core::assumptions::ApartmentModelInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        str_invest_core::base_model::base::calculate_base_model(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn season_breakdown(input_json: String) -> NapiResult<String> {
    let input: str_invest_core::assumptions::ApartmentModelInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = str_invest_core::seasonal::breakdown::calculate_season_breakdown(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn sensitivity_grid(input_json: String) -> NapiResult<String> {
    let input: str_invest_core::assumptions::ApartmentModelInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = str_invest_core::sensitivity::grid::calculate_sensitivity(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Seasonal revenue
// ---------------------------------------------------------------------------

#[napi]
pub fn seasonal_revenue(input_json: String) -> NapiResult<String> {
    let input: str_invest_core::seasonal::revenue::SeasonalRevenueInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = str_invest_core::seasonal::revenue::calculate_seasonal_revenue(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
