//! Solomon benchmark reader.
//!
//! ```text
//! C101
//!
//! VEHICLE
//! NUMBER     CAPACITY
//!   25         200
//!
//! CUSTOMER
//! CUST NO.  XCOORD.   YCOORD.    DEMAND   READY TIME  DUE DATE   SERVICE   TIME
//!     0      40         50          0          0       1236          0
//!     1      45         68         10        912        967         90
//! ```
//!
//! Customer 0 is the depot.

use super::{field, parse_error, ParsedInstance};
use crate::error::RoutingError;
use crate::models::{Client, Instance, TimeWindow};

const DEPOT_ID: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Header,
    Vehicle,
    Customer,
}

/// Parses a Solomon-format instance.
///
/// # Examples
///
/// ```
/// use u_vrptw::parser::parse_solomon;
///
/// let text = "\
/// R-TINY
///
/// VEHICLE
/// NUMBER     CAPACITY
///   3          50
///
/// CUSTOMER
/// CUST NO.  XCOORD.   YCOORD.    DEMAND   READY TIME  DUE DATE   SERVICE   TIME
///     0      0          0           0          0        100          0
///     1      3          4          10          0         50          5
/// ";
/// let parsed = parse_solomon(text).unwrap();
/// assert_eq!(parsed.name, "R-TINY");
/// assert_eq!(parsed.num_vehicles, Some(3));
/// assert_eq!(parsed.instance.len(), 1);
/// ```
pub fn parse_solomon(text: &str) -> Result<ParsedInstance, RoutingError> {
    let mut name: Option<String> = None;
    let mut block = Block::Header;
    let mut fleet: Option<(usize, i32)> = None;
    let mut depot: Option<Client> = None;
    let mut clients = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let upper = line.to_uppercase();
        if upper == "VEHICLE" {
            block = Block::Vehicle;
            continue;
        }
        if upper == "CUSTOMER" {
            block = Block::Customer;
            continue;
        }
        if name.is_none() && block == Block::Header {
            name = Some(line.to_string());
            continue;
        }
        if !line.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '.') {
            // column titles
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match block {
            Block::Header => {
                return Err(parse_error(line_no, format!("unexpected row: {line}")));
            }
            Block::Vehicle => {
                if parts.len() < 2 {
                    return Err(parse_error(line_no, "expected NUMBER and CAPACITY"));
                }
                fleet = Some((
                    field(parts[0], line_no, "vehicle count")?,
                    field(parts[1], line_no, "capacity")?,
                ));
            }
            Block::Customer => {
                if parts.len() < 7 {
                    return Err(parse_error(
                        line_no,
                        format!("expected 7 columns, found {}", parts.len()),
                    ));
                }
                let id: usize = field(parts[0], line_no, "customer id")?;
                let x: f64 = field(parts[1], line_no, "x coordinate")?;
                let y: f64 = field(parts[2], line_no, "y coordinate")?;
                let demand: i32 = field(parts[3], line_no, "demand")?;
                let ready: f64 = field(parts[4], line_no, "ready time")?;
                let due: f64 = field(parts[5], line_no, "due date")?;
                let service: f64 = field(parts[6], line_no, "service time")?;
                let tw = TimeWindow::new(ready, due).ok_or_else(|| {
                    parse_error(line_no, format!("invalid time window [{ready}, {due}]"))
                })?;

                if id == DEPOT_ID {
                    if depot.is_some() {
                        return Err(RoutingError::DuplicateClient { id });
                    }
                    depot = Some(
                        Client::depot(id, x, y)
                            .with_time_window(tw)
                            .with_service_time(service),
                    );
                } else {
                    clients.push(
                        Client::new(id, x, y, demand)
                            .with_time_window(tw)
                            .with_service_time(service),
                    );
                }
            }
        }
    }

    let (num_vehicles, capacity) =
        fleet.ok_or_else(|| parse_error(0, "missing VEHICLE block"))?;
    let depot = depot.ok_or(RoutingError::DepotNotFound)?;

    Ok(ParsedInstance {
        name: name.unwrap_or_default(),
        instance: Instance::new(depot, clients, capacity)?,
        num_vehicles: Some(num_vehicles),
    })
}
