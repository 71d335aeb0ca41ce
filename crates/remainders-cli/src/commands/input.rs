//! Parsing of user-entered values.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use remainders_core::device::DeviceProfile;
use remainders_core::profile::ViewMode;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepts an ISO `YYYY-MM-DD` calendar date, or an empty string to clear.
///
/// The literal input is returned; it is what ends up in the URL.
pub fn parse_birth_date(input: &str) -> Result<String, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(String::new());
    }

    // chrono tolerates unpadded fields, the URL format does not.
    if input.len() != 10 {
        return Err(format!("'{}' is not a YYYY-MM-DD date", input));
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map(|_| input.to_string())
        .map_err(|e| format!("'{}' is not a valid date: {}", input, e))
}

pub fn parse_view_mode(input: &str) -> Result<ViewMode> {
    input
        .trim()
        .to_lowercase()
        .parse()
        .with_context(|| format!("Unknown view mode '{}' (expected year or life)", input.trim()))
}

/// Parses `<width> <height> <brand|-> <model...>`, or `none` to clear.
pub fn parse_device(args: &[&str]) -> Result<Option<DeviceProfile>> {
    if let [only] = args {
        if only.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
    }

    let [width, height, brand, model @ ..] = args else {
        bail!("Usage: device <width> <height> <brand|-> <model name>");
    };
    if model.is_empty() {
        bail!("Usage: device <width> <height> <brand|-> <model name>");
    }

    let width: u32 = width
        .parse()
        .with_context(|| format!("Invalid width '{}'", width))?;
    let height: u32 = height
        .parse()
        .with_context(|| format!("Invalid height '{}'", height))?;
    let brand = if *brand == "-" { "" } else { *brand };

    let device = DeviceProfile::new(brand, model.join(" "), width, height)?;
    Ok(Some(device))
}
