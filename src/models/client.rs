//! Client and time window types.

use serde::{Deserialize, Serialize};

use crate::distance::Point;

/// A time window `[ready, due]` for starting service at a client.
///
/// Arriving before `ready` means waiting; arriving after `due` makes the
/// route infeasible. `due` may be `f64::INFINITY` (no deadline).
///
/// # Examples
///
/// ```
/// use u_vrptw::models::TimeWindow;
///
/// let tw = TimeWindow::new(100.0, 200.0).unwrap();
/// assert!(tw.contains(150.0));
/// assert!(!tw.contains(250.0));
/// assert!(TimeWindow::unbounded().due().is_infinite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TimeWindowRepr", into = "TimeWindowRepr")]
pub struct TimeWindow {
    ready: f64,
    due: f64,
}

/// Serialized form of [`TimeWindow`]; a missing `due` means no deadline.
#[derive(Serialize, Deserialize)]
struct TimeWindowRepr {
    #[serde(default)]
    ready: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due: Option<f64>,
}

impl TryFrom<TimeWindowRepr> for TimeWindow {
    type Error = String;

    fn try_from(repr: TimeWindowRepr) -> Result<Self, Self::Error> {
        let due = repr.due.unwrap_or(f64::INFINITY);
        TimeWindow::new(repr.ready, due)
            .ok_or_else(|| format!("invalid time window [{}, {due}]", repr.ready))
    }
}

impl From<TimeWindow> for TimeWindowRepr {
    fn from(tw: TimeWindow) -> Self {
        Self {
            ready: tw.ready,
            due: tw.due.is_finite().then_some(tw.due),
        }
    }
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `ready > due`, if either value is NaN, or if
    /// `ready` is not finite. An infinite `due` is allowed.
    pub fn new(ready: f64, due: f64) -> Option<Self> {
        if !ready.is_finite() || due.is_nan() || ready > due {
            return None;
        }
        Some(Self { ready, due })
    }

    /// `[0, +inf)`: always open.
    pub fn unbounded() -> Self {
        Self {
            ready: 0.0,
            due: f64::INFINITY,
        }
    }

    /// Earliest service start.
    pub fn ready(&self) -> f64 {
        self.ready
    }

    /// Latest allowable arrival.
    pub fn due(&self) -> f64 {
        self.due
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.ready && time <= self.due
    }

    /// Waiting time when arriving at `arrival`; zero when on time or late.
    pub fn waiting_time(&self, arrival: f64) -> f64 {
        (self.ready - arrival).max(0.0)
    }

    /// Returns `true` if arriving at `arrival` misses the window.
    pub fn is_violated(&self, arrival: f64) -> bool {
        arrival > self.due
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// A client (or the depot) of a routing instance.
///
/// Clients are immutable once built and are shared between solutions
/// through `Arc`.
///
/// # Examples
///
/// ```
/// use u_vrptw::models::{Client, TimeWindow};
///
/// let depot = Client::depot(0, 35.0, 35.0);
/// assert_eq!(depot.demand(), 0);
///
/// let c = Client::new(1, 41.0, 49.0, 10)
///     .with_time_window(TimeWindow::new(161.0, 171.0).unwrap())
///     .with_service_time(10.0);
/// assert_eq!(c.ready_time(), 161.0);
/// assert_eq!(c.due_time(), 171.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    id: usize,
    x: f64,
    y: f64,
    demand: i32,
    #[serde(default)]
    time_window: TimeWindow,
    #[serde(default)]
    service_time: f64,
}

impl Client {
    /// Creates a client with an unbounded time window and no service time.
    pub fn new(id: usize, x: f64, y: f64, demand: i32) -> Self {
        Self {
            id,
            x,
            y,
            demand,
            time_window: TimeWindow::unbounded(),
            service_time: 0.0,
        }
    }

    /// Creates a depot node: zero demand, unbounded window.
    pub fn depot(id: usize, x: f64, y: f64) -> Self {
        Self::new(id, x, y, 0)
    }

    /// Sets the time window.
    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = tw;
        self
    }

    /// Sets the service duration.
    pub fn with_service_time(mut self, service_time: f64) -> Self {
        self.service_time = service_time;
        self
    }

    /// Node id, unique within an instance (depot included).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Quantity delivered to this client (0 for the depot).
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Service time window.
    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    /// Earliest service start.
    pub fn ready_time(&self) -> f64 {
        self.time_window.ready()
    }

    /// Latest allowable arrival.
    pub fn due_time(&self) -> f64 {
        self.time_window.due()
    }

    /// Time spent serving the client before leaving.
    pub fn service_time(&self) -> f64 {
        self.service_time
    }
}

impl Point for Client {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::euclidean;

    #[test]
    fn test_time_window_valid() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert_eq!(tw.ready(), 10.0);
        assert_eq!(tw.due(), 20.0);
    }

    #[test]
    fn test_time_window_invalid() {
        assert!(TimeWindow::new(20.0, 10.0).is_none());
        assert!(TimeWindow::new(f64::NAN, 10.0).is_none());
        assert!(TimeWindow::new(10.0, f64::NAN).is_none());
        assert!(TimeWindow::new(f64::INFINITY, f64::INFINITY).is_none());
    }

    #[test]
    fn test_time_window_open_ended() {
        let tw = TimeWindow::new(10.0, f64::INFINITY).expect("valid");
        assert!(!tw.is_violated(1e12));
        assert!(tw.contains(1e12));
    }

    #[test]
    fn test_time_window_waiting() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert!((tw.waiting_time(5.0) - 5.0).abs() < 1e-10);
        assert!(tw.waiting_time(10.0).abs() < 1e-10);
        assert!(tw.waiting_time(15.0).abs() < 1e-10);
    }

    #[test]
    fn test_time_window_violated() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert!(!tw.is_violated(20.0));
        assert!(tw.is_violated(20.1));
    }

    #[test]
    fn test_client_defaults() {
        let c = Client::new(3, 1.0, 2.0, 7);
        assert_eq!(c.id(), 3);
        assert_eq!(c.demand(), 7);
        assert_eq!(c.ready_time(), 0.0);
        assert!(c.due_time().is_infinite());
        assert_eq!(c.service_time(), 0.0);
    }

    #[test]
    fn test_depot() {
        let d = Client::depot(1, 35.0, 35.0);
        assert_eq!(d.id(), 1);
        assert_eq!(d.demand(), 0);
    }

    #[test]
    fn test_client_distance() {
        let a = Client::depot(0, 0.0, 0.0);
        let b = Client::new(1, 3.0, 4.0, 10);
        assert!((euclidean(&a, &b) - 5.0).abs() < 1e-10);
        assert!((euclidean(&b, &a) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_client_deserialize_defaults() {
        let c: Client =
            serde_json::from_str(r#"{"id":4,"x":1.0,"y":1.0,"demand":3}"#).expect("valid json");
        assert_eq!(c.id(), 4);
        assert!(c.due_time().is_infinite());
    }

    #[test]
    fn test_time_window_deserialize_checks_order() {
        let err = serde_json::from_str::<TimeWindow>(r#"{"ready":20.0,"due":10.0}"#).unwrap_err();
        assert!(err.to_string().contains("invalid time window"));

        let json = r#"{"id":1,"x":0.0,"y":0.0,"demand":1,"time_window":{"ready":5.0,"due":1.0}}"#;
        assert!(serde_json::from_str::<Client>(json).is_err());
    }

    #[test]
    fn test_unbounded_window_survives_json() {
        let json = serde_json::to_string(&TimeWindow::new(5.0, f64::INFINITY).expect("valid"))
            .expect("serializable");
        assert_eq!(json, r#"{"ready":5.0}"#);
        let tw: TimeWindow = serde_json::from_str(&json).expect("valid json");
        assert_eq!(tw.ready(), 5.0);
        assert!(tw.due().is_infinite());
    }
}
