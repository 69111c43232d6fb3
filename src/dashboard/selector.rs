use log::debug;

use crate::errors::LapboardError;
use crate::telemetry::{Event, EventCatalog, SessionCode, SessionSelection, SessionType};

pub fn session_code(session_type: SessionType) -> SessionCode {
    match session_type {
        SessionType::Practice1 => SessionCode::FP1,
        SessionType::Practice2 => SessionCode::FP2,
        SessionType::Practice3 => SessionCode::FP3,
        SessionType::Qualifying => SessionCode::Q,
        SessionType::Race => SessionCode::R,
    }
}

/// Testing days appear in the schedule but have no selectable sessions.
fn is_testing(event: &Event) -> bool {
    event.name.to_lowercase().contains("testing")
}

/// Resolves the user's event and session choice against one season's schedule.
pub struct SessionSelector<'c> {
    year: i32,
    catalog: &'c EventCatalog,
}

impl<'c> SessionSelector<'c> {
    pub fn new(year: i32, catalog: &'c EventCatalog) -> Self {
        Self { year, catalog }
    }

    /// Events offered to the user, in schedule order.
    pub fn selectable_events(&self) -> Vec<&'c Event> {
        self.catalog
            .events
            .iter()
            .filter(|e| !is_testing(e))
            .collect()
    }

    /// Testing events resolve to [`LapboardError::NotFound`], like any other
    /// event that is not offered.
    pub fn resolve(
        &self,
        event_name: &str,
        session_type: SessionType,
    ) -> Result<SessionSelection, LapboardError> {
        let event = self
            .catalog
            .find(event_name)
            .filter(|e| !is_testing(e))
            .ok_or_else(|| LapboardError::NotFound {
                event: event_name.to_string(),
                year: self.year,
            })?;

        let selection = SessionSelection {
            year: self.year,
            round_number: event.round_number,
            session_code: session_code(session_type),
        };
        debug!("Resolved {} {} to {:?}", event_name, session_type, selection);
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> EventCatalog {
        EventCatalog::new(vec![
            Event::new("Pre-Season Testing", 0, "Bahrain"),
            Event::new("Bahrain Grand Prix", 1, "Bahrain"),
            Event::new("Monaco Grand Prix", 8, "Monaco"),
            Event::new("Post-season TESTING", 25, "Abu Dhabi"),
        ])
    }

    #[test]
    fn test_resolve_monaco_race() {
        let catalog = catalog();
        let selector = SessionSelector::new(2024, &catalog);

        assert_eq!(
            selector.resolve("Monaco Grand Prix", SessionType::Race).unwrap(),
            SessionSelection {
                year: 2024,
                round_number: 8,
                session_code: SessionCode::R,
            }
        );
    }

    #[test]
    fn test_session_code_table() {
        assert_eq!(session_code(SessionType::Practice1), SessionCode::FP1);
        assert_eq!(session_code(SessionType::Practice2), SessionCode::FP2);
        assert_eq!(session_code(SessionType::Practice3), SessionCode::FP3);
        assert_eq!(session_code(SessionType::Qualifying), SessionCode::Q);
        assert_eq!(session_code(SessionType::Race), SessionCode::R);
    }

    #[test]
    fn test_unknown_event_is_not_found() {
        let catalog = catalog();
        let selector = SessionSelector::new(2024, &catalog);

        match selector.resolve("Las Vegas Grand Prix", SessionType::Qualifying) {
            Err(LapboardError::NotFound { event, year }) => {
                assert_eq!(event, "Las Vegas Grand Prix");
                assert_eq!(year, 2024);
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_testing_events_do_not_resolve() {
        let catalog = catalog();
        let selector = SessionSelector::new(2024, &catalog);

        for name in ["Pre-Season Testing", "Post-season TESTING"] {
            assert!(matches!(
                selector.resolve(name, SessionType::Practice1),
                Err(LapboardError::NotFound { .. })
            ));
        }
    }

    #[test]
    fn test_testing_events_are_not_selectable() {
        let catalog = catalog();
        let selector = SessionSelector::new(2024, &catalog);

        let names: Vec<&str> = selector
            .selectable_events()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Bahrain Grand Prix", "Monaco Grand Prix"]);
    }
}
