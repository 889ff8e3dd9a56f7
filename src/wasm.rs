//! WASM bindings for Mech Solver
//!
//! JSON string in, JSON string out, so the solvers can run in a browser
//! Web Worker without a round trip to the HTTP service.

use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::prelude::*;

use crate::cantilever::CantileverInput;
use crate::diagrams::SimplySupportedBeam;
use crate::error::MechResult;

// Use wee_alloc for smaller WASM binary
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[derive(Debug, Serialize)]
struct WasmResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<T>,
}

/// Parse a request, run it and wrap the outcome in the response envelope
fn handle<I, T, F>(request_json: &str, run: F) -> String
where
    I: DeserializeOwned,
    T: Serialize,
    F: FnOnce(I) -> MechResult<T>,
{
    let response = match serde_json::from_str::<I>(request_json) {
        Ok(input) => match run(input) {
            Ok(results) => WasmResponse {
                success: true,
                error: None,
                results: Some(results),
            },
            Err(e) => WasmResponse {
                success: false,
                error: Some(e.to_string()),
                results: None,
            },
        },
        Err(e) => WasmResponse {
            success: false,
            error: Some(format!("Failed to parse request: {}", e)),
            results: None,
        },
    };

    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(r#"{{"success":false,"error":"Serialization failed: {}"}}"#, e)
    })
}

/// Solve a cantilever beam described by a `CantileverInput` JSON object
#[wasm_bindgen]
pub fn analyze_cantilever(request_json: &str) -> String {
    handle(request_json, |input: CantileverInput| input.analyze())
}

/// Shear force and bending moment diagrams for a simply supported beam
#[wasm_bindgen]
pub fn beam_diagrams(request_json: &str) -> String {
    handle(request_json, |beam: SimplySupportedBeam| beam.diagrams())
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cantilever_envelope() {
        let out = analyze_cantilever(r#"{"num_elements": 4}"#);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["results"]["nodes"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_errors_are_reported() {
        let out = beam_diagrams(r#"{"length": 2.0, "load": 1.0, "position": 5.0}"#);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["success"], false);
        assert!(value["error"].as_str().unwrap().contains("outside the span"));

        let out = beam_diagrams("not json");
        assert!(out.contains("Failed to parse request"));
    }
}
