//! Render context passed explicitly into the view-model builders.
//!
//! Holds what pages used to read from ambient UI state: the user's
//! timezone, the instant the page was rendered, thresholds from config,
//! and the copy personality.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::config::BriefingConfig;
use crate::error::Result;

/// Tone for empty-state and summary copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    #[default]
    Professional,
    Friendly,
    Playful,
}

impl Personality {
    pub fn empty_week_message(&self) -> &'static str {
        match self {
            Personality::Professional => "No meetings or actions scheduled this week.",
            Personality::Friendly => "Your week is wide open. Nothing on the books yet.",
            Personality::Playful => "A blank canvas of a week. Go make something.",
        }
    }

    pub fn empty_focus_message(&self) -> &'static str {
        match self {
            Personality::Professional => "No pending actions to prioritize today.",
            Personality::Friendly => "Nothing pressing today. Enjoy the breathing room.",
            Personality::Playful => "Inbox zero energy. Nothing to triage today.",
        }
    }
}

/// Everything a builder needs beyond the snapshot itself.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub config: BriefingConfig,
    timezone: Tz,
    now: DateTime<Tz>,
}

impl ViewContext {
    /// Context for a render happening right now.
    pub fn now(config: BriefingConfig) -> Result<Self> {
        let timezone = config.timezone()?;
        Ok(Self::at(config, timezone, Utc::now()))
    }

    /// Context pinned to a specific instant.
    pub fn at(config: BriefingConfig, timezone: Tz, now: DateTime<Utc>) -> Self {
        Self {
            config,
            timezone,
            now: now.with_timezone(&timezone),
        }
    }

    pub fn timezone(&self) -> &Tz {
        &self.timezone
    }

    pub fn current_time(&self) -> DateTime<Tz> {
        self.now
    }

    /// Today's date in the context timezone.
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn personality(&self) -> Personality {
        self.config.personality
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn today_follows_context_timezone() {
        // 03:00 UTC is still the previous evening in New York.
        let instant = Utc.with_ymd_and_hms(2026, 2, 10, 3, 0, 0).unwrap();
        let ctx = ViewContext::at(
            BriefingConfig::default(),
            chrono_tz::America::New_York,
            instant,
        );
        assert_eq!(ctx.today(), NaiveDate::from_ymd_opt(2026, 2, 9).unwrap());
    }

    #[test]
    fn personality_comes_from_config() {
        let config = BriefingConfig {
            personality: Personality::Friendly,
            ..BriefingConfig::default()
        };
        let ctx = ViewContext::at(config, chrono_tz::UTC, Utc::now());
        assert_eq!(ctx.personality(), Personality::Friendly);
        assert!(ctx.personality().empty_week_message().contains("wide open"));
    }

    #[test]
    fn now_rejects_bad_timezone() {
        let config = BriefingConfig {
            timezone: "Nowhere/Special".to_string(),
            ..BriefingConfig::default()
        };
        assert!(ViewContext::now(config).is_err());
    }
}
