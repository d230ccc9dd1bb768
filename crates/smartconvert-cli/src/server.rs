//! JSON-RPC 2.0 server mode for smartconvert
//!
//! Lets other tools use smartconvert as a calculation backend.
//! Reads one JSON-RPC request per line from stdin and writes one response
//! per line to stdout.

use std::io::{self, BufRead, Write};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use smartconvert_core::chem::{self, PhInput};
use smartconvert_core::electrical::OhmsLaw;
use smartconvert_core::fetch::ErApiProvider;
use smartconvert_core::finance;
use smartconvert_core::rates::cache;
use smartconvert_core::{
    parse_query, CalcError, Converter, Dimension, NoHistory, Preferences, RateBook, RateStatus,
};

/// Long-lived server state
pub struct State {
    prefs: Preferences,
    rates: RateBook,
    offline: bool,
}

impl State {
    pub fn new(prefs: Preferences, rates: RateBook, offline: bool) -> Self {
        Self {
            prefs,
            rates,
            offline,
        }
    }
}

/// JSON-RPC 2.0 request
#[derive(Deserialize)]
struct Request {
    jsonrpc: String,
    method: String,
    #[serde(default)]
    params: Option<serde_json::Value>,
    id: serde_json::Value,
}

/// JSON-RPC 2.0 response
#[derive(Serialize)]
struct Response {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
    id: serde_json::Value,
}

/// JSON-RPC error object
#[derive(Serialize)]
struct RpcError {
    code: i32,
    message: String,
}

// JSON-RPC error codes
const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
/// Calculation rejected its input
const CALC_ERROR: i32 = -32001;
/// Exchange rates could not be loaded
const RATES_ERROR: i32 = -32002;

impl Response {
    fn success(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            result: Some(result),
            error: None,
            id,
        }
    }

    fn error(id: serde_json::Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
            id,
        }
    }

    fn from_result<T: Serialize>(id: serde_json::Value, result: Result<T, CalcError>) -> Self {
        match result {
            Ok(value) => match serde_json::to_value(value) {
                Ok(json) => Response::success(id, json),
                Err(e) => Response::error(id, CALC_ERROR, e.to_string()),
            },
            Err(e) => {
                let code = if e.is_upstream() { RATES_ERROR } else { CALC_ERROR };
                Response::error(id, code, e.to_string())
            }
        }
    }
}

#[derive(Deserialize)]
struct ConvertParams {
    dimension: Dimension,
    value: String,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    to: Option<String>,
}

#[derive(Deserialize)]
struct QueryParams {
    text: String,
}

#[derive(Deserialize)]
struct FormulaParams {
    formula: String,
}

#[derive(Deserialize)]
struct PhParams {
    input: String,
    value: f64,
}

#[derive(Deserialize)]
struct LoanParams {
    principal: f64,
    rate: f64,
    years: u32,
}

#[derive(Deserialize)]
struct InvestParams {
    initial: f64,
    monthly: f64,
    years: f64,
    rate: f64,
}

#[derive(Deserialize)]
struct RetireParams {
    current_age: u32,
    retirement_age: u32,
    savings: f64,
    monthly: f64,
    rate: f64,
}

#[derive(Deserialize)]
struct SavingsParams {
    target: f64,
    initial: f64,
    years: f64,
    rate: f64,
}

#[derive(Deserialize)]
struct DimensionParams {
    dimension: Dimension,
}

/// Structured conversion result
#[derive(Serialize)]
struct ConvertResult<'a> {
    dimension: Dimension,
    from_unit: &'a str,
    to_unit: &'a str,
    #[serde(flatten)]
    output: &'a smartconvert_core::Output,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rate_info: Option<String>,
}

fn parse_params<T: DeserializeOwned>(
    id: &serde_json::Value,
    params: Option<serde_json::Value>,
) -> Result<T, Response> {
    let Some(params) = params else {
        return Err(Response::error(id.clone(), INVALID_PARAMS, "Missing params"));
    };
    serde_json::from_value(params)
        .map_err(|e| Response::error(id.clone(), INVALID_PARAMS, format!("Invalid params: {e}")))
}

/// Handle a single JSON-RPC request
fn handle_request(state: &mut State, input: &str) -> Response {
    let request: Request = match serde_json::from_str(input) {
        Ok(r) => r,
        Err(e) => {
            return Response::error(
                serde_json::Value::Null,
                PARSE_ERROR,
                format!("Parse error: {e}"),
            );
        }
    };

    if request.jsonrpc != "2.0" {
        return Response::error(request.id, INVALID_REQUEST, "Invalid JSON-RPC version");
    }

    let Request { method, params, id, .. } = request;
    let handled = match method.as_str() {
        "convert" => handle_convert(state, &id, params),
        "query" => handle_query(state, &id, params),
        "molar_mass" => parse_params::<FormulaParams>(&id, params)
            .map(|p| Response::from_result(id.clone(), chem::molar_mass(&p.formula).map_err(CalcError::from))),
        "ph" => parse_params::<PhParams>(&id, params).map(|p| {
            let result = PhInput::parse(&p.input)
                .ok_or_else(|| CalcError::InvalidInput(format!("unknown pH input '{}'", p.input)))
                .and_then(|input| chem::ph::solve(input, p.value));
            Response::from_result(id.clone(), result)
        }),
        "ohms_law" => parse_params::<OhmsLaw>(&id, params)
            .map(|law| Response::from_result(id.clone(), law.solve())),
        "loan" => parse_params::<LoanParams>(&id, params)
            .map(|p| Response::from_result(id.clone(), finance::amortize(p.principal, p.rate, p.years))),
        "invest" => parse_params::<InvestParams>(&id, params).map(|p| {
            Response::from_result(
                id.clone(),
                finance::project_growth(p.initial, p.monthly, p.years, p.rate),
            )
        }),
        "retire" => parse_params::<RetireParams>(&id, params).map(|p| {
            Response::from_result(
                id.clone(),
                finance::project_retirement(p.current_age, p.retirement_age, p.savings, p.monthly, p.rate),
            )
        }),
        "savings" => parse_params::<SavingsParams>(&id, params).map(|p| {
            Response::from_result(
                id.clone(),
                finance::plan_savings(p.target, p.initial, p.years, p.rate),
            )
        }),
        "units" => parse_params::<DimensionParams>(&id, params)
            .map(|p| Response::from_result(id.clone(), Ok(p.dimension.units()))),
        "examples" => parse_params::<DimensionParams>(&id, params)
            .map(|p| Response::from_result(id.clone(), Ok(p.dimension.examples()))),
        "dimensions" => Ok(handle_dimensions(&id)),
        "reload_rates" => Ok(handle_reload_rates(state, &id)),
        _ => Ok(Response::error(
            id.clone(),
            METHOD_NOT_FOUND,
            format!("Method not found: {method}"),
        )),
    };
    handled.unwrap_or_else(|response| response)
}

fn convert(
    state: &State,
    dimension: Dimension,
    value: &str,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<serde_json::Value, CalcError> {
    let mut converter = Converter::new(dimension, &state.prefs, &state.rates, &NoHistory);
    if let Some(from) = from {
        converter.set_from_unit(from)?;
    }
    if let Some(to) = to {
        converter.set_to_unit(to)?;
    }
    converter.set_input(value);
    converter.preview()?;

    let result = ConvertResult {
        dimension,
        from_unit: converter.from_unit(),
        to_unit: converter.to_unit(),
        output: converter.output(),
        hint: converter.hint(),
        rate_info: converter.rate_info(),
    };
    serde_json::to_value(&result).map_err(|e| CalcError::InvalidInput(e.to_string()))
}

/// Handle convert method. History is never recorded in server mode.
fn handle_convert(
    state: &State,
    id: &serde_json::Value,
    params: Option<serde_json::Value>,
) -> Result<Response, Response> {
    let p: ConvertParams = parse_params(id, params)?;
    let result = convert(state, p.dimension, &p.value, p.from.as_deref(), p.to.as_deref());
    Ok(Response::from_result(id.clone(), result))
}

fn handle_query(
    state: &State,
    id: &serde_json::Value,
    params: Option<serde_json::Value>,
) -> Result<Response, Response> {
    let p: QueryParams = parse_params(id, params)?;
    let result = parse_query(&p.text).and_then(|q| {
        convert(
            state,
            q.dimension,
            &q.value.to_string(),
            Some(q.from_unit),
            Some(q.to_unit),
        )
    });
    Ok(Response::from_result(id.clone(), result))
}

fn handle_dimensions(id: &serde_json::Value) -> Response {
    let dimensions: Vec<serde_json::Value> = Dimension::all()
        .map(|d| serde_json::json!({"key": d.key(), "name": d.name()}))
        .collect();
    Response::success(id.clone(), serde_json::Value::Array(dimensions))
}

/// Handle reload_rates method - fetch fresh exchange rates
fn handle_reload_rates(state: &mut State, id: &serde_json::Value) -> Response {
    if state.offline {
        return Response::error(id.clone(), RATES_ERROR, "Rates cannot be reloaded in offline mode");
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => return Response::error(id.clone(), RATES_ERROR, format!("Failed to create runtime: {e}")),
    };
    rt.block_on(state.rates.refresh(&ErApiProvider));

    match state.rates.status() {
        RateStatus::Ready => {
            if let Some(path) = cache::default_path() {
                cache::save(&path, &state.rates);
            }
            Response::success(id.clone(), serde_json::json!({"message": "Rates reloaded"}))
        }
        RateStatus::Failed(message) => Response::error(id.clone(), RATES_ERROR, message),
        RateStatus::Pending => Response::error(id.clone(), RATES_ERROR, "Rates still loading"),
    }
}

/// Run the JSON-RPC server loop
pub fn run_server(state: &mut State) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_request(state, &line);
        let json = serde_json::to_string(&response)?;
        writeln!(stdout, "{json}")?;
        stdout.flush()?;
    }

    Ok(())
}
