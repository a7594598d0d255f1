//! Instance readers.
//!
//! - [`parse_vrplib`] — VRPLIB `KEY : VALUE` header plus sections
//! - [`parse_solomon`] — Solomon tabular format (`VEHICLE` / `CUSTOMER` blocks)
//! - [`load_instance`] — reads a file and picks the format from its content

mod solomon;
mod vrplib;

use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::error::RoutingError;
use crate::models::Instance;

pub use solomon::parse_solomon;
pub use vrplib::parse_vrplib;

/// A parsed instance together with the metadata the file carried.
#[derive(Debug, Clone)]
pub struct ParsedInstance {
    /// Instance name from the file header (may be empty).
    pub name: String,
    /// Validated depot, clients and capacity.
    pub instance: Instance,
    /// Fleet size declared by the file, if any.
    pub num_vehicles: Option<usize>,
}

/// Supported instance file layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceFormat {
    Vrplib,
    Solomon,
}

/// Guesses the format from the text: Solomon files carry a `CUST NO.`
/// header or bare `VEHICLE` / `CUSTOMER` block titles.
pub fn detect_format(text: &str) -> InstanceFormat {
    let mut vehicle_block = false;
    let mut customer_block = false;
    for line in text.lines().map(str::trim) {
        let upper = line.to_uppercase();
        if upper.starts_with("CUST NO") {
            return InstanceFormat::Solomon;
        }
        vehicle_block |= upper == "VEHICLE";
        customer_block |= upper == "CUSTOMER";
    }
    if vehicle_block && customer_block {
        InstanceFormat::Solomon
    } else {
        InstanceFormat::Vrplib
    }
}

/// Parses instance text in either supported format.
pub fn parse_instance(text: &str) -> Result<ParsedInstance, RoutingError> {
    match detect_format(text) {
        InstanceFormat::Vrplib => parse_vrplib(text),
        InstanceFormat::Solomon => parse_solomon(text),
    }
}

/// Reads and parses an instance file.
///
/// # Examples
///
/// ```no_run
/// use u_vrptw::parser::load_instance;
///
/// let parsed = load_instance("instances/C101.txt").unwrap();
/// println!("{}: {} clients", parsed.name, parsed.instance.len());
/// ```
pub fn load_instance<P: AsRef<Path>>(path: P) -> Result<ParsedInstance, RoutingError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let parsed = parse_instance(&text)?;
    info!(
        path = %path.as_ref().display(),
        name = %parsed.name,
        clients = parsed.instance.len(),
        capacity = parsed.instance.capacity(),
        "instance loaded"
    );
    Ok(parsed)
}

/// Parses one numeric token, reporting `what` and the 1-based line on
/// failure.
fn field<T: FromStr>(token: &str, line: usize, what: &str) -> Result<T, RoutingError> {
    token.parse().map_err(|_| RoutingError::Parse {
        line,
        message: format!("invalid {what}: {token}"),
    })
}

fn parse_error(line: usize, message: impl Into<String>) -> RoutingError {
    RoutingError::Parse {
        line,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_solomon_header() {
        let text = "C101\n\nVEHICLE\nNUMBER CAPACITY\n 25 200\n\nCUSTOMER\nCUST NO.  XCOORD.\n";
        assert_eq!(detect_format(text), InstanceFormat::Solomon);
    }

    #[test]
    fn test_detect_vrplib() {
        let text = "NAME : X\nCAPACITY : 100\nNODE_COORD_SECTION\n1 0 0\nEOF\n";
        assert_eq!(detect_format(text), InstanceFormat::Vrplib);
    }

    #[test]
    fn test_field_error_carries_line() {
        let err = field::<f64>("abc", 7, "x coordinate").unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to parse instance at line 7: invalid x coordinate: abc"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_instance("/definitely/not/here.vrp").unwrap_err();
        assert!(matches!(err, RoutingError::Io(_)));
    }
}
