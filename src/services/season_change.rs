use chrono::{Datelike, Days, NaiveDate};

use crate::models::{Season, WeatherSnapshot};

const EARLIEST_NOTICE_DAYS: u64 = 21;
const LATEST_NOTICE_DAYS: u64 = 7;
const REQUIRED_SIGNS: usize = 2;

/// Season worth announcing on this day, if any.
///
/// A season is announced on its first day regardless of the weather, and in
/// the window three to one weeks before it starts once the weather shows
/// enough of its signs.
pub fn detect_season_change(weather: &WeatherSnapshot) -> Option<Season> {
    let today = weather.date;

    if let Some(season) = Season::ALL
        .into_iter()
        .find(|season| season.start() == (today.month(), today.day()))
    {
        return Some(season);
    }

    Season::ALL.into_iter().find(|&season| {
        in_notice_window(today, season) && season_signs(weather, season) >= REQUIRED_SIGNS
    })
}

/// Next start of `season` on or after the start of `today`'s year,
/// rolling spring into next year during December
fn upcoming_start(today: NaiveDate, season: Season) -> Option<NaiveDate> {
    let (month, day) = season.start();
    let year = if season == Season::Spring && today.month() == 12 {
        today.year() + 1
    } else {
        today.year()
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn in_notice_window(today: NaiveDate, season: Season) -> bool {
    let Some(start) = upcoming_start(today, season) else {
        return false;
    };
    let (Some(earliest), Some(latest)) = (
        start.checked_sub_days(Days::new(EARLIEST_NOTICE_DAYS)),
        start.checked_sub_days(Days::new(LATEST_NOTICE_DAYS)),
    ) else {
        return false;
    };
    (earliest..=latest).contains(&today)
}

/// How many of the season's five weather signs hold
fn season_signs(weather: &WeatherSnapshot, season: Season) -> usize {
    let t = weather.temperatures;
    let signs = match season {
        Season::Spring => [
            t.day >= 0.0,
            !weather.is_snow,
            weather.is_rain || weather.is_sleet,
            t.day - t.morning >= 5.0,
            weather.is_sunny && t.day >= 5.0,
        ],
        Season::Summer => [
            t.day >= 18.0,
            weather.is_sunny,
            !weather.is_rain,
            weather.is_uv_high,
            t.evening >= 15.0,
        ],
        Season::Autumn => [
            t.day < 20.0,
            weather.is_rain,
            weather.is_windy,
            weather.is_cloudy,
            weather.is_humid,
        ],
        Season::Winter => [
            t.day < 5.0,
            weather.is_snow || weather.is_sleet,
            t.morning < 0.0,
            weather.is_windy && t.day < 10.0,
            !weather.is_rain && t.day < 8.0,
        ],
    };
    signs.into_iter().filter(|&holds| holds).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemperaturePeriod;

    fn weather(ymd: (i32, u32, u32), morning: f64, day: f64, evening: f64) -> WeatherSnapshot {
        WeatherSnapshot::calm(
            "TestCity",
            NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap(),
            TemperaturePeriod::new(morning, day, evening),
        )
    }

    #[test]
    fn test_start_day_announces_season() {
        let cases = [
            ((2025, 3, 1), Season::Spring),
            ((2025, 6, 1), Season::Summer),
            ((2025, 9, 1), Season::Autumn),
            ((2025, 12, 1), Season::Winter),
        ];
        for (ymd, expected) in cases {
            assert_eq!(detect_season_change(&weather(ymd, 0.0, 0.0, 0.0)), Some(expected));
        }
    }

    #[test]
    fn test_start_day_wins_over_signs() {
        let mut w = weather((2025, 3, 1), -10.0, -3.0, -5.0);
        w.is_snow = true;
        w.is_windy = true;
        w.is_cloudy = true;
        assert_eq!(detect_season_change(&w), Some(Season::Spring));
    }

    #[test]
    fn test_spring_signs_three_weeks_ahead() {
        // day >= 0, rain, and a 7° rise since morning
        let mut w = weather((2025, 2, 8), -5.0, 2.0, 0.0);
        w.is_rain = true;
        assert_eq!(detect_season_change(&w), Some(Season::Spring));
    }

    #[test]
    fn test_winter_signs_in_window() {
        let mut w = weather((2025, 11, 10), -2.0, 3.0, 0.0);
        w.is_snow = true;
        assert_eq!(detect_season_change(&w), Some(Season::Winter));
    }

    #[test]
    fn test_window_closes_a_week_before_start() {
        let mut w = weather((2025, 11, 25), -2.0, 3.0, 0.0);
        w.is_snow = true;
        assert_eq!(detect_season_change(&w), None);

        w.date = NaiveDate::from_ymd_opt(2025, 11, 24).unwrap();
        assert_eq!(detect_season_change(&w), Some(Season::Winter));
    }

    #[test]
    fn test_outside_window_is_silent() {
        let mut w = weather((2025, 1, 1), -5.0, 2.0, 0.0);
        w.is_rain = true;
        w.is_sunny = true;
        assert_eq!(detect_season_change(&w), None);
    }

    #[test]
    fn test_one_sign_is_not_enough() {
        // only "day < 20" holds for autumn
        let w = weather((2025, 8, 15), 19.0, 19.0, 19.0);
        assert_eq!(season_signs(&w, Season::Autumn), 1);
        assert_eq!(detect_season_change(&w), None);
    }

    #[test]
    fn test_december_looks_at_next_spring() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
        assert_eq!(
            upcoming_start(today, Season::Spring),
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
        assert!(!in_notice_window(today, Season::Spring));
    }
}
