pub mod loader;
pub mod source;

use std::{fmt, time::Duration};

use serde::{Deserialize, Deserializer, Serialize, de::Error};

pub use loader::{LoadResult, TelemetryLoader};
pub use source::{FileBasedSource, TelemetrySource};

/// One round of the championship calendar as published by the telemetry source.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Event {
    #[serde(rename = "EventName")]
    pub name: String,
    pub round_number: u32,
    #[serde(default)]
    pub country: String,
}

impl Event {
    pub fn new(name: &str, round_number: u32, country: &str) -> Self {
        Self {
            name: name.to_string(),
            round_number,
            country: country.to_string(),
        }
    }
}

/// Ordered event schedule for a single year.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct EventCatalog {
    pub events: Vec<Event>,
}

impl EventCatalog {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn find(&self, event_name: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.name == event_name)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Session type as offered to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionType {
    Practice1,
    Practice2,
    Practice3,
    Qualifying,
    Race,
}

impl SessionType {
    pub const ALL: [SessionType; 5] = [
        SessionType::Practice1,
        SessionType::Practice2,
        SessionType::Practice3,
        SessionType::Qualifying,
        SessionType::Race,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SessionType::Practice1 => "Practice 1",
            SessionType::Practice2 => "Practice 2",
            SessionType::Practice3 => "Practice 3",
            SessionType::Qualifying => "Qualifying",
            SessionType::Race => "Race",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Session code used by the telemetry source to key sessions within a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionCode {
    FP1,
    FP2,
    FP3,
    Q,
    R,
}

impl SessionCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionCode::FP1 => "FP1",
            SessionCode::FP2 => "FP2",
            SessionCode::FP3 => "FP3",
            SessionCode::Q => "Q",
            SessionCode::R => "R",
        }
    }
}

impl fmt::Display for SessionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete session resolved from the user's choices, valid for one load cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSelection {
    pub year: i32,
    pub round_number: u32,
    pub session_code: SessionCode,
}

/// One completed lap for one driver, as stored by the telemetry source.
///
/// Durations are serialized as fractional seconds. Pit times are measured
/// from the start of the session. Lap numbers may be stored as integral
/// floats (`1.0`).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct LapRecord {
    pub driver: String,
    #[serde(deserialize_with = "deserialize_lap_number")]
    pub lap_number: u32,
    #[serde(default, with = "duration_secs")]
    pub lap_time: Option<Duration>,
    #[serde(default)]
    pub compound: Option<String>,
    #[serde(default)]
    pub tyre_life: Option<f64>,
    #[serde(default, with = "duration_secs")]
    pub pit_out_time: Option<Duration>,
    #[serde(default, with = "duration_secs")]
    pub pit_in_time: Option<Duration>,
    /// Why the stored row could not be decoded, if it could not
    #[serde(skip)]
    pub decode_error: Option<String>,
}

impl LapRecord {
    /// Decode one stored row.
    ///
    /// A row that names its driver but is otherwise not a valid lap is still
    /// returned, carrying the reason in `decode_error`, so that only that
    /// driver's table fails. Rows without a driver are `None`.
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        let driver = value.get("Driver")?.as_str()?.to_string();
        match serde_json::from_value(value) {
            Ok(lap) => Some(lap),
            Err(e) => Some(Self {
                driver,
                decode_error: Some(e.to_string()),
                ..Default::default()
            }),
        }
    }
}

fn deserialize_lap_number<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let number = f64::deserialize(d)?;
    if number.fract() != 0. || !(0. ..=u32::MAX as f64).contains(&number) {
        return Err(D::Error::custom(format!("invalid lap number {number}")));
    }
    Ok(number as u32)
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&d.as_secs_f64()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        match Option::<f64>::deserialize(d)? {
            Some(secs) => Duration::try_from_secs_f64(secs)
                .map(Some)
                .map_err(|e| D::Error::custom(format!("invalid duration {secs}: {e}"))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lap_record_from_source_json() {
        let lap: LapRecord = serde_json::from_str(
            r#"{"Driver":"VER","LapNumber":1,"LapTime":83.456,"Compound":"SOFT","TyreLife":1.0,"PitOutTime":null,"PitInTime":null}"#,
        )
        .unwrap();

        assert_eq!(lap.driver, "VER");
        assert_eq!(lap.lap_number, 1);
        assert_eq!(lap.lap_time, Some(Duration::from_millis(83_456)));
        assert_eq!(lap.compound.as_deref(), Some("SOFT"));
        assert_eq!(lap.tyre_life, Some(1.0));
        assert!(lap.pit_out_time.is_none());
        assert!(lap.pit_in_time.is_none());
    }

    #[test]
    fn test_lap_record_missing_fields_default_to_none() {
        let lap: LapRecord = serde_json::from_str(r#"{"Driver":"HAM","LapNumber":4}"#).unwrap();
        assert!(lap.lap_time.is_none());
        assert!(lap.compound.is_none());
        assert!(lap.tyre_life.is_none());
    }

    #[test]
    fn test_lap_number_accepts_integral_floats() {
        let lap: LapRecord = serde_json::from_str(r#"{"Driver":"HAM","LapNumber":12.0}"#).unwrap();
        assert_eq!(lap.lap_number, 12);

        for bad in ["12.5", "-1", "null"] {
            let row = format!(r#"{{"Driver":"HAM","LapNumber":{}}}"#, bad);
            assert!(serde_json::from_str::<LapRecord>(&row).is_err(), "{} accepted", bad);
        }
    }

    #[test]
    fn test_undecodable_row_keeps_its_driver() {
        let lap = LapRecord::from_value(serde_json::json!({"Driver": "HAM", "LapNumber": null}))
            .unwrap();
        assert_eq!(lap.driver, "HAM");
        assert!(lap.decode_error.is_some());

        let lap = LapRecord::from_value(serde_json::json!({"Driver": "VER", "LapNumber": 1.0}))
            .unwrap();
        assert_eq!(lap.lap_number, 1);
        assert!(lap.decode_error.is_none());

        assert!(LapRecord::from_value(serde_json::json!({"Driver": 12})).is_none());
        assert!(LapRecord::from_value(serde_json::json!([1, 2])).is_none());
    }

    #[test]
    fn test_negative_duration_is_rejected() {
        let result: Result<LapRecord, _> =
            serde_json::from_str(r#"{"Driver":"HAM","LapNumber":4,"LapTime":-1.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_event_catalog_uses_source_column_names() {
        let catalog: EventCatalog = serde_json::from_str(
            r#"[{"EventName":"Monaco Grand Prix","RoundNumber":8,"Country":"Monaco"}]"#,
        )
        .unwrap();
        assert_eq!(
            catalog.find("Monaco Grand Prix"),
            Some(&Event::new("Monaco Grand Prix", 8, "Monaco"))
        );
        assert!(catalog.find("monaco grand prix").is_none());
    }

    #[test]
    fn test_session_type_labels() {
        for session_type in SessionType::ALL {
            assert_eq!(SessionType::from_label(session_type.label()), Some(session_type));
        }
        assert_eq!(SessionType::from_label("Sprint"), None);
    }
}
