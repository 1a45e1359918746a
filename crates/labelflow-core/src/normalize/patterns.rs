//! Regex patterns shared by the value normalizers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // First integer or decimal in a price ("costo: 12.5 dolares" -> 12.5)
    pub static ref PRICE_NUMBER: Regex = Regex::new(
        r"\d+\.?\d*"
    ).unwrap();

    // Number followed by unit letters ("5 kg", "2.5LB")
    pub static ref QUANTITY_WITH_UNIT: Regex = Regex::new(
        r"(\d+\.?\d*)\s*([a-zA-Z]+)"
    ).unwrap();

    // Markdown code fences wrapped around structured OCR output
    pub static ref CODE_FENCE: Regex = Regex::new(
        r"```(?:json|JSON)?"
    ).unwrap();
}
