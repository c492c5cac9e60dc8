//! Preference model: weighted interests, preferred time windows and location.
//!
//! This is a minimal-contract value holder. Weights and hours are not
//! validated here; that is the job of [`crate::storage::UserConfig::validate`].

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default travel tolerance for a freshly constructed [`Preferences`].
pub const DEFAULT_MAX_TRAVEL_DISTANCE_KM: f64 = 10.0;

/// An inclusive range of local hours, optionally restricted to weekdays.
///
/// `days` is carried for configuration round-trips but is not consulted by
/// scoring. A window with `start_hour > end_hour` is out of contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    #[serde(default)]
    pub days: Vec<Weekday>,
}

impl TimeWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
            days: Vec::new(),
        }
    }

    pub fn with_days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.days = days.into_iter().collect();
        self
    }

    /// Inclusive on both ends. Wrap-around windows get no special treatment.
    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= self.start_hour && hour <= self.end_hour
    }

    pub fn is_wrap_around(&self) -> bool {
        self.start_hour > self.end_hour
    }
}

impl From<(u32, u32)> for TimeWindow {
    fn from((start_hour, end_hour): (u32, u32)) -> Self {
        Self::new(start_hour, end_hour)
    }
}

/// A user's standing preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    interests: BTreeMap<String, i64>,
    time_windows: Vec<TimeWindow>,
    max_travel_distance_km: f64,
    home_location: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            interests: BTreeMap::new(),
            time_windows: Vec::new(),
            max_travel_distance_km: DEFAULT_MAX_TRAVEL_DISTANCE_KM,
            home_location: String::new(),
        }
    }
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an interest.
    pub fn add_interest(&mut self, tag: impl Into<String>, weight: i64) {
        self.interests.insert(tag.into(), weight);
    }

    pub fn remove_interest(&mut self, tag: &str) {
        self.interests.remove(tag);
    }

    /// Overwrite the weight of an existing interest. Absent tags are left
    /// absent and `false` is returned.
    pub fn set_interest_weight(&mut self, tag: &str, weight: i64) -> bool {
        match self.interests.get_mut(tag) {
            Some(current) => {
                *current = weight;
                true
            }
            None => false,
        }
    }

    /// Weight of `tag`, or 0 when the tag is not an interest.
    pub fn interest_weight(&self, tag: &str) -> i64 {
        self.interests.get(tag).copied().unwrap_or(0)
    }

    /// Add one to the weight of `tag`, adding it at weight 1 if absent.
    /// Saturates at `i64::MAX`. Returns the new weight.
    pub fn reinforce_interest(&mut self, tag: &str) -> i64 {
        let next = self.interest_weight(tag).saturating_add(1);
        self.interests.insert(tag.to_string(), next);
        next
    }

    pub fn interests(&self) -> &BTreeMap<String, i64> {
        &self.interests
    }

    /// Replace every preferred window with the given `(start_hour, end_hour)`
    /// pairs. No merging with the previous set.
    pub fn set_preferred_time_slots<I>(&mut self, slots: I)
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        self.time_windows = slots.into_iter().map(TimeWindow::from).collect();
    }

    /// Replace every preferred window, keeping weekday restrictions.
    pub fn set_time_windows(&mut self, windows: Vec<TimeWindow>) {
        self.time_windows = windows;
    }

    pub fn time_windows(&self) -> &[TimeWindow] {
        &self.time_windows
    }

    pub fn max_travel_distance(&self) -> f64 {
        self.max_travel_distance_km
    }

    pub fn set_max_travel_distance(&mut self, km: f64) {
        self.max_travel_distance_km = km;
    }

    pub fn home_location(&self) -> &str {
        &self.home_location
    }

    pub fn set_home_location(&mut self, location: impl Into<String>) {
        self.home_location = location.into();
    }
}

/// The owner of a [`Preferences`] value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    name: String,
    email: String,
    #[serde(default)]
    preferences: Preferences,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            preferences: Preferences::default(),
        }
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.preferences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_interest_weighs_zero() {
        let prefs = Preferences::new();
        assert_eq!(prefs.interest_weight("jazz"), 0);
    }

    #[test]
    fn add_interest_overwrites_existing_weight() {
        let mut prefs = Preferences::new();
        prefs.add_interest("music", 3);
        prefs.add_interest("music", 7);
        assert_eq!(prefs.interest_weight("music"), 7);
        assert_eq!(prefs.interests().len(), 1);
    }

    #[test]
    fn set_interest_weight_ignores_absent_tag() {
        let mut prefs = Preferences::new();
        assert!(!prefs.set_interest_weight("sports", 4));
        assert!(!prefs.interests().contains_key("sports"));

        prefs.add_interest("sports", 1);
        assert!(prefs.set_interest_weight("sports", -2));
        assert_eq!(prefs.interest_weight("sports"), -2);
    }

    #[test]
    fn remove_interest_drops_tag() {
        let mut prefs = Preferences::new();
        prefs.add_interest("cooking", 2);
        prefs.remove_interest("cooking");
        prefs.remove_interest("never-added");
        assert!(prefs.interests().is_empty());
    }

    #[test]
    fn reinforce_adds_absent_tag_at_one() {
        let mut prefs = Preferences::new();
        assert_eq!(prefs.reinforce_interest("jazz"), 1);
        assert_eq!(prefs.reinforce_interest("jazz"), 2);
        assert_eq!(prefs.interest_weight("jazz"), 2);
    }

    #[test]
    fn reinforce_saturates_at_max_weight() {
        let mut prefs = Preferences::new();
        prefs.add_interest("jazz", i64::MAX);
        assert_eq!(prefs.reinforce_interest("jazz"), i64::MAX);
        assert_eq!(prefs.interest_weight("jazz"), i64::MAX);
    }

    #[test]
    fn preferred_slots_replace_previous_set() {
        let mut prefs = Preferences::new();
        prefs.set_preferred_time_slots([(9, 12), (18, 23)]);
        prefs.set_preferred_time_slots([(6, 8)]);
        assert_eq!(prefs.time_windows(), [TimeWindow::new(6, 8)]);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = TimeWindow::new(18, 23);
        assert!(window.contains_hour(18));
        assert!(window.contains_hour(23));
        assert!(!window.contains_hour(17));
        assert!(!window.is_wrap_around());
        assert!(TimeWindow::new(22, 2).is_wrap_around());
    }

    #[test]
    fn defaults_match_fresh_preferences() {
        let prefs = Preferences::default();
        assert_eq!(prefs.max_travel_distance(), DEFAULT_MAX_TRAVEL_DISTANCE_KM);
        assert_eq!(prefs.home_location(), "");
        assert!(prefs.time_windows().is_empty());
    }

    #[test]
    fn user_owns_mutable_preferences() {
        let mut user = User::new("Ada", "ada@example.com");
        user.preferences_mut().add_interest("technology", 5);
        user.preferences_mut().set_home_location("SF");
        assert_eq!(user.preferences().interest_weight("technology"), 5);
        assert_eq!(user.preferences().home_location(), "SF");
    }
}
