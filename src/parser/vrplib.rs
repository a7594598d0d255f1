//! VRPLIB (CVRPLIB) reader.
//!
//! Understands the `NAME`, `CAPACITY` and `VEHICLES` specifications and the
//! `NODE_COORD_SECTION`, `DEMAND_SECTION`, `DEPOT_SECTION`,
//! `TIME_WINDOW_SECTION` and `SERVICE_TIME_SECTION` sections. Other
//! specifications are ignored; `EOF` ends the file.

use std::collections::HashMap;

use super::{field, parse_error, ParsedInstance};
use crate::error::RoutingError;
use crate::models::{Client, Instance, TimeWindow};

/// Depot id assumed when the file has no `DEPOT_SECTION`.
const DEFAULT_DEPOT: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Coords,
    Demands,
    Depot,
    TimeWindows,
    ServiceTimes,
    Ignored,
}

impl Section {
    fn from_header(line: &str) -> Option<Self> {
        let name = line.split(|c: char| c == ':' || c.is_whitespace()).next()?;
        if !name.ends_with("_SECTION") {
            return None;
        }
        Some(match name {
            "NODE_COORD_SECTION" => Section::Coords,
            "DEMAND_SECTION" => Section::Demands,
            "DEPOT_SECTION" => Section::Depot,
            "TIME_WINDOW_SECTION" => Section::TimeWindows,
            "SERVICE_TIME_SECTION" => Section::ServiceTimes,
            _ => Section::Ignored,
        })
    }
}

/// Parses VRPLIB text into an instance.
///
/// Nodes are taken in `NODE_COORD_SECTION` order; a node without a demand
/// row has demand 0. When the file has no coordinates at all, every node
/// from `DEMAND_SECTION` is placed at the origin. A depot listed only in
/// `DEMAND_SECTION` is placed at the origin as well.
///
/// # Examples
///
/// ```
/// use u_vrptw::parser::parse_vrplib;
///
/// let text = "\
/// NAME : tiny
/// CAPACITY : 50
/// NODE_COORD_SECTION
/// 1 0 0
/// 2 3 4
/// 3 6 8
/// DEMAND_SECTION
/// 1 0
/// 2 10
/// 3 15
/// DEPOT_SECTION
/// 1
/// -1
/// EOF
/// ";
/// let parsed = parse_vrplib(text).unwrap();
/// assert_eq!(parsed.name, "tiny");
/// assert_eq!(parsed.instance.len(), 2);
/// assert_eq!(parsed.instance.capacity(), 50);
/// ```
pub fn parse_vrplib(text: &str) -> Result<ParsedInstance, RoutingError> {
    let mut name = String::new();
    let mut capacity: Option<i32> = None;
    let mut num_vehicles: Option<usize> = None;
    let mut coords: Vec<(usize, f64, f64)> = Vec::new();
    let mut demands: Vec<(usize, i32)> = Vec::new();
    let mut windows: HashMap<usize, TimeWindow> = HashMap::new();
    let mut service: HashMap<usize, f64> = HashMap::new();
    let mut depot_id: Option<usize> = None;
    let mut section: Option<Section> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("EOF") {
            break;
        }
        if let Some(next) = Section::from_header(line) {
            section = Some(next);
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match section {
            None => {
                if let Some((key, value)) = line.split_once(':') {
                    let value = value.trim();
                    match key.trim().to_uppercase().as_str() {
                        "NAME" => name = value.to_string(),
                        "CAPACITY" => capacity = Some(field(value, line_no, "capacity")?),
                        "VEHICLES" => num_vehicles = Some(field(value, line_no, "vehicle count")?),
                        _ => {}
                    }
                }
            }
            Some(Section::Coords) if parts.len() >= 3 => {
                coords.push((
                    field(parts[0], line_no, "node id")?,
                    field(parts[1], line_no, "x coordinate")?,
                    field(parts[2], line_no, "y coordinate")?,
                ));
            }
            Some(Section::Demands) if parts.len() >= 2 => {
                demands.push((
                    field(parts[0], line_no, "node id")?,
                    field(parts[1], line_no, "demand")?,
                ));
            }
            Some(Section::Depot) => {
                let id: i64 = field(parts[0], line_no, "depot id")?;
                if id >= 0 && depot_id.is_none() {
                    depot_id = Some(id as usize);
                }
            }
            Some(Section::TimeWindows) if parts.len() >= 3 => {
                let id: usize = field(parts[0], line_no, "node id")?;
                let ready: f64 = field(parts[1], line_no, "ready time")?;
                let due: f64 = field(parts[2], line_no, "due time")?;
                let tw = TimeWindow::new(ready, due).ok_or_else(|| {
                    parse_error(line_no, format!("invalid time window [{ready}, {due}]"))
                })?;
                windows.insert(id, tw);
            }
            Some(Section::ServiceTimes) if parts.len() >= 2 => {
                let id: usize = field(parts[0], line_no, "node id")?;
                service.insert(id, field(parts[1], line_no, "service time")?);
            }
            Some(Section::Ignored) => {}
            Some(_) => {
                return Err(parse_error(line_no, format!("malformed section row: {line}")));
            }
        }
    }

    let capacity = capacity.ok_or_else(|| parse_error(0, "missing CAPACITY"))?;
    let depot_id = depot_id.unwrap_or(DEFAULT_DEPOT);

    let node = |id: usize, x: f64, y: f64, demand: i32| {
        let mut client = Client::new(id, x, y, demand);
        if let Some(&tw) = windows.get(&id) {
            client = client.with_time_window(tw);
        }
        if let Some(&s) = service.get(&id) {
            client = client.with_service_time(s);
        }
        client
    };

    let positions: Vec<(usize, f64, f64)> = if coords.is_empty() {
        demands.iter().map(|&(id, _)| (id, 0.0, 0.0)).collect()
    } else {
        coords
    };
    let demand_of: HashMap<usize, i32> = demands.iter().copied().collect();

    let mut depot: Option<Client> = None;
    let mut clients = Vec::with_capacity(positions.len());
    for (id, x, y) in positions {
        if id == depot_id {
            if depot.is_some() {
                return Err(RoutingError::DuplicateClient { id });
            }
            depot = Some(node(id, x, y, 0));
        } else {
            clients.push(node(id, x, y, demand_of.get(&id).copied().unwrap_or(0)));
        }
    }

    let depot = match depot {
        Some(depot) => depot,
        None if demand_of.contains_key(&depot_id) => node(depot_id, 0.0, 0.0, 0),
        None => return Err(RoutingError::DepotNotFound),
    };

    Ok(ParsedInstance {
        name,
        instance: Instance::new(depot, clients, capacity)?,
        num_vehicles,
    })
}
