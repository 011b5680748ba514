//! WebAssembly bindings for the calculator.
//!
//! This module exposes the engine interface to JavaScript: create, press a
//! key, read the display and the per-button reasons, format a value.

use wasm_bindgen::prelude::*;
use crate::{Calculator, InputAction, TernaryBuf};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WebAssembly-friendly calculator wrapper.
#[wasm_bindgen]
pub struct WasmCalculator {
    calc: Calculator,
}

#[wasm_bindgen]
impl WasmCalculator {
    /// Create a new calculator instance.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            calc: Calculator::new(),
        }
    }

    /// Press the button bound to `key` (`0-2 + - * / ( ) = C A U R`).
    ///
    /// Returns the display value; rejected presses leave it unchanged.
    #[wasm_bindgen]
    pub fn press(&mut self, key: char) -> Result<i64, JsError> {
        let action = InputAction::from_key(key)
            .ok_or_else(|| JsError::new(&format!("unknown key: '{}'", key)))?;
        Ok(self.calc.press(action))
    }

    /// Press a key and fail with the reason if it was rejected.
    #[wasm_bindgen]
    pub fn feed(&mut self, key: char) -> Result<i64, JsError> {
        let action = InputAction::from_key(key)
            .ok_or_else(|| JsError::new(&format!("unknown key: '{}'", key)))?;
        self.calc.feed(action)
            .map_err(|e| JsError::new(&format!("{}", e)))
    }

    /// Current display value.
    #[wasm_bindgen]
    pub fn display(&self) -> i64 {
        self.calc.display()
    }

    /// Current display value as ternary text.
    #[wasm_bindgen]
    pub fn display_ternary(&self) -> String {
        self.calc.display_ternary().to_string()
    }

    /// Expression typed so far.
    #[wasm_bindgen]
    pub fn expression(&self) -> String {
        self.calc.expression()
    }

    /// 14 entries in keypad order: `null` if enabled, else the reason.
    #[wasm_bindgen]
    pub fn enabled_reasons(&self) -> js_sys::Array {
        self.calc
            .enabled()
            .iter()
            .map(|(_, reason)| match reason {
                Some(text) => JsValue::from_str(text),
                None => JsValue::NULL,
            })
            .collect()
    }

    /// Key characters in the same order as [`enabled_reasons`](Self::enabled_reasons).
    #[wasm_bindgen]
    pub fn keys(&self) -> String {
        InputAction::ALL.iter().map(|a| a.key()).collect()
    }
}

impl Default for WasmCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a value as ternary text.
#[wasm_bindgen]
pub fn wasm_format_ternary(value: i64) -> String {
    TernaryBuf::new(value).to_string()
}
