use chrono::{DateTime, Utc};
use geo_types::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Running => "🏃",
            Self::Cycling => "🚵",
        }
    }

    /// Lowercase identifier used in CSS classes and the form select.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    /// CSS class for the marker popup, e.g. "running-popup".
    pub fn popup_class(self) -> &'static str {
        match self {
            Self::Running => "running-popup",
            Self::Cycling => "cycling-popup",
        }
    }
}

/// Kind-specific fields. The derived metric is computed once at
/// construction and never recomputed afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetails {
    Running {
        /// steps/min
        cadence: f64,
        /// min per km, `duration / (distance / 60)`
        pace: f64,
    },
    Cycling {
        /// meters, may be zero or negative (net descent)
        elevation_gain: f64,
        /// `distance / duration`
        speed: f64,
    },
}

/// One logged workout. Created only through [`create_workout`] or by
/// restoring a [`StoredWorkout`]; immutable afterwards except for the
/// interaction counter.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// x = longitude, y = latitude
    pub position: Point<f64>,
    pub distance_km: f64,
    pub duration_min: f64,
    pub description: String,
    pub details: WorkoutDetails,
    /// How often the user selected this workout in the sidebar.
    pub clicks: u32,
}

impl Workout {
    fn build(
        kind: WorkoutKind,
        position: Point<f64>,
        timestamp: DateTime<Utc>,
        distance_km: f64,
        duration_min: f64,
        metric: f64,
    ) -> Self {
        let details = match kind {
            WorkoutKind::Running => WorkoutDetails::Running {
                cadence: metric,
                pace: duration_min / (distance_km / 60.0),
            },
            WorkoutKind::Cycling => WorkoutDetails::Cycling {
                elevation_gain: metric,
                speed: distance_km / duration_min,
            },
        };

        Self {
            id: Uuid::new_v4().to_string(),
            timestamp,
            position,
            distance_km,
            duration_min,
            description: format!("{} on {}", kind.label(), timestamp.format("%d/%m/%Y")),
            details,
            clicks: 0,
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// The raw kind-specific input value (cadence or elevation gain).
    pub fn metric(&self) -> f64 {
        match self.details {
            WorkoutDetails::Running { cadence, .. } => cadence,
            WorkoutDetails::Cycling { elevation_gain, .. } => elevation_gain,
        }
    }

    pub fn lat(&self) -> f64 {
        self.position.y()
    }

    pub fn lng(&self) -> f64 {
        self.position.x()
    }

    pub fn register_click(&mut self) {
        self.clicks += 1;
    }

    pub fn to_stored(&self) -> StoredWorkout {
        StoredWorkout {
            id: self.id.clone(),
            timestamp: self.timestamp,
            latitude: self.lat(),
            longitude: self.lng(),
            distance_km: self.distance_km,
            duration_min: self.duration_min,
            kind: self.kind(),
            metric: self.metric(),
        }
    }

    /// Rebuild a full record from its persisted form, re-deriving the
    /// computed fields instead of trusting stored ones.
    pub fn from_stored(stored: StoredWorkout) -> Self {
        let mut workout = Self::build(
            stored.kind,
            Point::new(stored.longitude, stored.latitude),
            stored.timestamp,
            stored.distance_km,
            stored.duration_min,
            stored.metric,
        );
        workout.id = stored.id;
        workout
    }
}

/// The plain-data shape a workout takes in the persisted JSON blob.
/// Derived fields and the click counter are deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredWorkout {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
    pub duration_min: f64,
    pub kind: WorkoutKind,
    pub metric: f64,
}

/// Raw form values, exactly as the user typed them.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutEntry {
    pub kind: WorkoutKind,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation_gain: String,
}

impl WorkoutEntry {
    pub fn new(kind: WorkoutKind) -> Self {
        Self {
            kind,
            distance: String::new(),
            duration: String::new(),
            cadence: String::new(),
            elevation_gain: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} has to be a number!")]
    NotANumber(&'static str),
    #[error("{0} has to be a positive number!")]
    NotPositive(&'static str),
    #[error("Pick a location on the map first!")]
    NoLocation,
}

fn parse_finite(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber(field))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotANumber(field))
    }
}

fn parse_positive(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let value = parse_finite(field, raw)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive(field))
    }
}

/// Validate the form values and turn them into a workout at `position`.
///
/// Distance and duration must be positive for both kinds. Cadence must be
/// positive too, while elevation gain only has to be a finite number so
/// that rides with a net descent can be logged.
pub fn create_workout(entry: &WorkoutEntry, position: Point<f64>) -> Result<Workout, ValidationError> {
    if !position.x().is_finite() || !position.y().is_finite() {
        return Err(ValidationError::NoLocation);
    }

    let distance_km = parse_positive("Distance", &entry.distance)?;
    let duration_min = parse_positive("Duration", &entry.duration)?;
    let metric = match entry.kind {
        WorkoutKind::Running => parse_positive("Cadence", &entry.cadence)?,
        WorkoutKind::Cycling => parse_finite("Elevation gain", &entry.elevation_gain)?,
    };

    Ok(Workout::build(
        entry.kind,
        position,
        Utc::now(),
        distance_km,
        duration_min,
        metric,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: WorkoutKind, distance: &str, duration: &str, metric: &str) -> WorkoutEntry {
        let mut entry = WorkoutEntry::new(kind);
        entry.distance = distance.to_string();
        entry.duration = duration.to_string();
        match kind {
            WorkoutKind::Running => entry.cadence = metric.to_string(),
            WorkoutKind::Cycling => entry.elevation_gain = metric.to_string(),
        }
        entry
    }

    fn at(lat: f64, lng: f64) -> Point<f64> {
        Point::new(lng, lat)
    }

    #[test]
    fn running_pace_is_derived_at_creation() {
        let workout =
            create_workout(&entry(WorkoutKind::Running, "7", "40", "150"), at(50.0, 36.0)).unwrap();

        assert_eq!(workout.kind(), WorkoutKind::Running);
        assert_eq!(workout.distance_km, 7.0);
        assert_eq!(workout.duration_min, 40.0);
        let WorkoutDetails::Running { cadence, pace } = workout.details else {
            panic!("expected running details");
        };
        assert_eq!(cadence, 150.0);
        assert!((pace - 40.0 / (7.0 / 60.0)).abs() < 1e-9);
        assert!((pace - 342.857142857).abs() < 1e-6);
    }

    #[test]
    fn cycling_speed_is_derived_at_creation() {
        let workout =
            create_workout(&entry(WorkoutKind::Cycling, "7", "80", "200"), at(50.0, 39.0)).unwrap();

        let WorkoutDetails::Cycling { elevation_gain, speed } = workout.details else {
            panic!("expected cycling details");
        };
        assert_eq!(elevation_gain, 200.0);
        assert!((speed - 0.0875).abs() < 1e-12);
    }

    #[test]
    fn running_rejects_non_positive_values() {
        let cases = [
            entry(WorkoutKind::Running, "-5", "40", "150"),
            entry(WorkoutKind::Running, "7", "0", "150"),
            entry(WorkoutKind::Running, "7", "40", "-1"),
        ];
        for case in cases {
            assert!(matches!(
                create_workout(&case, at(0.0, 0.0)),
                Err(ValidationError::NotPositive(_))
            ));
        }
    }

    #[test]
    fn non_numeric_input_is_rejected() {
        let err = create_workout(&entry(WorkoutKind::Running, "7km", "40", "150"), at(1.0, 1.0))
            .unwrap_err();
        assert_eq!(err, ValidationError::NotANumber("Distance"));

        let err = create_workout(&entry(WorkoutKind::Running, "7", "", "150"), at(1.0, 1.0))
            .unwrap_err();
        assert_eq!(err, ValidationError::NotANumber("Duration"));

        let err = create_workout(&entry(WorkoutKind::Cycling, "7", "80", "inf"), at(1.0, 1.0))
            .unwrap_err();
        assert_eq!(err, ValidationError::NotANumber("Elevation gain"));
    }

    #[test]
    fn cycling_accepts_zero_and_negative_elevation() {
        for metric in ["0", "-120"] {
            let workout =
                create_workout(&entry(WorkoutKind::Cycling, "7", "80", metric), at(1.0, 1.0));
            assert!(workout.is_ok(), "elevation {metric} should be accepted");
        }
    }

    #[test]
    fn non_finite_position_is_rejected() {
        let err = create_workout(
            &entry(WorkoutKind::Running, "7", "40", "150"),
            at(f64::NAN, 36.0),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::NoLocation);
    }

    #[test]
    fn description_combines_kind_and_date() {
        let workout =
            create_workout(&entry(WorkoutKind::Cycling, "7", "80", "200"), at(50.0, 39.0)).unwrap();
        let expected = format!("Cycling on {}", workout.timestamp.format("%d/%m/%Y"));
        assert_eq!(workout.description, expected);
    }

    #[test]
    fn ids_are_unique() {
        let a = create_workout(&entry(WorkoutKind::Running, "7", "40", "150"), at(1.0, 1.0));
        let b = create_workout(&entry(WorkoutKind::Running, "7", "40", "150"), at(1.0, 1.0));
        assert_ne!(a.unwrap().id, b.unwrap().id);
    }

    #[test]
    fn restore_re_derives_computed_fields() {
        let original =
            create_workout(&entry(WorkoutKind::Running, "7", "40", "150"), at(50.0, 36.0)).unwrap();
        let mut clicked = original.clone();
        clicked.register_click();

        let restored = Workout::from_stored(clicked.to_stored());
        assert_eq!(restored.id, original.id);
        assert_eq!(restored.position, original.position);
        assert_eq!(restored.details, original.details);
        assert_eq!(restored.description, original.description);
        // interaction counts are a session-local side channel
        assert_eq!(restored.clicks, 0);
    }
}
