use crate::error::{config_error, Error, PlannerResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether the user has more energy in the morning or at night
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    Morning,
    Night,
    #[default]
    Neither,
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Preference::Morning => "morning",
            Preference::Night => "night",
            Preference::Neither => "neither",
        };
        f.write_str(value)
    }
}

impl FromStr for Preference {
    type Err = Error;

    fn from_str(s: &str) -> PlannerResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(Preference::Morning),
            "night" => Ok(Preference::Night),
            "neither" => Ok(Preference::Neither),
            other => Err(config_error(&format!(
                "Unknown preference '{}', expected morning, night or neither",
                other
            ))),
        }
    }
}

/// How often the user games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamingFrequency {
    #[serde(rename = "Daily")]
    Daily,
    #[serde(rename = "Few times a week")]
    FewTimesAWeek,
    #[serde(rename = "Once a week")]
    OnceAWeek,
    #[serde(rename = "Few times a month")]
    FewTimesAMonth,
    #[serde(rename = "Rarely")]
    Rarely,
}

impl fmt::Display for GamingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            GamingFrequency::Daily => "Daily",
            GamingFrequency::FewTimesAWeek => "Few times a week",
            GamingFrequency::OnceAWeek => "Once a week",
            GamingFrequency::FewTimesAMonth => "Few times a month",
            GamingFrequency::Rarely => "Rarely",
        };
        f.write_str(value)
    }
}

impl FromStr for GamingFrequency {
    type Err = Error;

    /// Accepts the display form ("Few times a week") or a dashed one ("few-times-a-week")
    fn from_str(s: &str) -> PlannerResult<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "daily" => Ok(GamingFrequency::Daily),
            "few times a week" => Ok(GamingFrequency::FewTimesAWeek),
            "once a week" => Ok(GamingFrequency::OnceAWeek),
            "few times a month" => Ok(GamingFrequency::FewTimesAMonth),
            "rarely" => Ok(GamingFrequency::Rarely),
            _ => Err(config_error(&format!("Unknown gaming frequency '{}'", s))),
        }
    }
}

/// Recurring activities the user wants room for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityProfile {
    pub exercise_per_week: Option<u8>,
    pub social: bool,
    pub gaming: Option<GamingFrequency>,
    pub study: bool,
}

impl ActivityProfile {
    /// Sentences describing the selected activities, in a fixed order
    pub fn descriptions(&self) -> Vec<String> {
        let mut activities = Vec::new();

        if let Some(times) = self.exercise_per_week {
            activities.push(format!("I want to exercise {} times a week.", times));
        }
        if self.social {
            activities
                .push("I want to include time for friends and social activities.".to_string());
        }
        if let Some(frequency) = self.gaming {
            activities.push(format!(
                "I want include time for gaming. I play {}, so please allocate appropriate time slots.",
                frequency
            ));
        }
        if self.study {
            activities.push("I want to include time for study sessions.".to_string());
        }

        activities
    }

    pub fn validate(&self) -> PlannerResult<()> {
        if let Some(times) = self.exercise_per_week {
            if !(1..=7).contains(&times) {
                return Err(config_error(&format!(
                    "Exercise frequency must be between 1 and 7 times a week, got {}",
                    times
                )));
            }
        }
        Ok(())
    }
}

/// Stored planning defaults, read from `config/profile.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerProfile {
    pub preference: Preference,
    pub activities: ActivityProfile,
    pub notes: Vec<String>,
}

/// Split free text into trimmed, non-empty lines
pub fn note_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions_order() {
        let profile = ActivityProfile {
            exercise_per_week: Some(3),
            social: true,
            gaming: Some(GamingFrequency::FewTimesAWeek),
            study: true,
        };

        assert_eq!(
            profile.descriptions(),
            vec![
                "I want to exercise 3 times a week.".to_string(),
                "I want to include time for friends and social activities.".to_string(),
                "I want include time for gaming. I play Few times a week, so please allocate appropriate time slots.".to_string(),
                "I want to include time for study sessions.".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_profile_has_no_descriptions() {
        assert!(ActivityProfile::default().descriptions().is_empty());
    }

    #[test]
    fn test_exercise_range() {
        let mut profile = ActivityProfile::default();
        profile.exercise_per_week = Some(0);
        assert!(profile.validate().is_err());
        profile.exercise_per_week = Some(7);
        assert!(profile.validate().is_ok());
        profile.exercise_per_week = Some(8);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_preference_parsing() {
        assert_eq!("Morning".parse::<Preference>().unwrap(), Preference::Morning);
        assert_eq!("night".parse::<Preference>().unwrap(), Preference::Night);
        assert!("evening".parse::<Preference>().is_err());
        assert_eq!(Preference::default().to_string(), "neither");
    }

    #[test]
    fn test_gaming_frequency_parsing() {
        assert_eq!(
            "few-times-a-month".parse::<GamingFrequency>().unwrap(),
            GamingFrequency::FewTimesAMonth
        );
        assert_eq!(
            "Once a week".parse::<GamingFrequency>().unwrap(),
            GamingFrequency::OnceAWeek
        );
        assert!("hourly".parse::<GamingFrequency>().is_err());
    }

    #[test]
    fn test_profile_from_toml() {
        let profile: PlannerProfile = toml::from_str(
            r#"
            preference = "night"
            notes = ["Finish the thesis draft"]

            [activities]
            exercise_per_week = 4
            gaming = "Rarely"
            "#,
        )
        .unwrap();

        assert_eq!(profile.preference, Preference::Night);
        assert_eq!(profile.activities.exercise_per_week, Some(4));
        assert_eq!(profile.activities.gaming, Some(GamingFrequency::Rarely));
        assert!(!profile.activities.study);
        assert_eq!(profile.notes, vec!["Finish the thesis draft".to_string()]);
    }

    #[test]
    fn test_note_lines() {
        assert_eq!(
            note_lines("  read a book \n\n call grandma\n"),
            vec!["read a book".to_string(), "call grandma".to_string()]
        );
    }
}
