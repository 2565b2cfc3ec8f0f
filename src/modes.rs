// Copyright (C) 2017 Hove and/or its affiliates.
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, version 3.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.

// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>

//! Guess the transport mode of a stop from its identifier.
//!
//! Some producers (SNCF for instance) publish trains, tram-trains and
//! replacement coaches under the same route, but encode the mode in the stop
//! identifiers (`StopPoint:OCECar TER-87...`). The tokens looked for are
//! configurable since they only make sense for a given producer.

use crate::objects::{Mode, Stop};
use serde::Deserialize;

/// Tokens looked for in the stop identifiers, case insensitive
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ModeHeuristics {
    /// A stop whose identifier contains one of these is a bus stop
    pub bus_tokens: Vec<String>,
    /// A stop whose identifier contains one of these (and no bus token) is a
    /// tram stop
    pub tram_tokens: Vec<String>,
}

impl Default for ModeHeuristics {
    fn default() -> Self {
        ModeHeuristics {
            bus_tokens: vec!["Car".to_string()],
            tram_tokens: vec!["TramTrain".to_string()],
        }
    }
}

impl ModeHeuristics {
    /// Mode of a stop identifier. Bus tokens are checked first, then tram
    /// tokens, anything else is a train.
    pub fn classify(&self, stop_id: &str) -> Mode {
        let stop_id = stop_id.to_lowercase();
        let contains_any = |tokens: &[String]| {
            tokens
                .iter()
                .any(|token| stop_id.contains(&token.to_lowercase()))
        };
        if contains_any(&self.bus_tokens) {
            Mode::Bus
        } else if contains_any(&self.tram_tokens) {
            Mode::Tram
        } else {
            Mode::HeavyRail
        }
    }

    /// Mode of a stop
    pub fn classify_stop(&self, stop: &Stop) -> Mode {
        self.classify(&stop.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bus_tokens_are_case_insensitive() {
        let heuristics = ModeHeuristics::default();
        assert_eq!(Mode::Bus, heuristics.classify("StopPoint:OCECar TER-87271007"));
        assert_eq!(Mode::Bus, heuristics.classify("CARX"));
        assert_eq!(Mode::Bus, heuristics.classify("CarX"));
    }

    #[test]
    fn bus_wins_over_tram() {
        let heuristics = ModeHeuristics::default();
        assert_eq!(Mode::Bus, heuristics.classify("TramTrain-Car"));
    }

    #[test]
    fn tram_tokens() {
        let heuristics = ModeHeuristics::default();
        assert_eq!(
            Mode::Tram,
            heuristics.classify("StopPoint:OCETRAMTRAIN TER-87590349")
        );
    }

    #[test]
    fn heavy_rail_by_default() {
        let heuristics = ModeHeuristics::default();
        assert_eq!(
            Mode::HeavyRail,
            heuristics.classify("StopPoint:OCETrain TER-87271007")
        );
        assert_eq!(Mode::HeavyRail, heuristics.classify(""));
    }

    #[test]
    fn custom_tokens() {
        let heuristics = ModeHeuristics {
            bus_tokens: vec!["Coach".to_string(), "BUS".to_string()],
            tram_tokens: vec!["lightrail".to_string()],
        };
        assert_eq!(Mode::Bus, heuristics.classify("stop_bus_12"));
        assert_eq!(Mode::Bus, heuristics.classify("COACH-STATION"));
        assert_eq!(Mode::Tram, heuristics.classify("LightRail:4"));
        assert_eq!(Mode::HeavyRail, heuristics.classify("CarX"));
    }

    #[test]
    fn no_tokens() {
        let heuristics = ModeHeuristics {
            bus_tokens: vec![],
            tram_tokens: vec![],
        };
        assert_eq!(Mode::HeavyRail, heuristics.classify("CarX"));
    }

    #[test]
    fn partial_configuration_keeps_defaults() {
        let heuristics: ModeHeuristics =
            serde_json::from_str(r#"{"tram_tokens": ["Tram"]}"#).unwrap();
        assert_eq!(vec!["Car".to_string()], heuristics.bus_tokens);
        assert_eq!(vec!["Tram".to_string()], heuristics.tram_tokens);
    }
}
