use activity_pattern::{
    ActivityPlan, ClockMode, EvenJitter, GlyphTable, Intensity, Message, PatternError,
    PatternOptions, PlacementKind, PlacementMode, SeededJitter, Window, WINDOW_WEEKS,
};
use chrono::{Datelike, Duration, NaiveDate, Timelike, Weekday};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
}

fn utc_options() -> PatternOptions {
    PatternOptions {
        clock: ClockMode::Utc,
        ..PatternOptions::default()
    }
}

#[test]
fn window_is_sunday_aligned_for_a_month_of_todays() {
    let mut day = NaiveDate::from_ymd_opt(2023, 12, 20).unwrap();
    for _ in 0..31 {
        let window = Window::current(day);
        assert_eq!(window.start.weekday(), Weekday::Sun);
        assert_eq!((window.grid_end() - window.start).num_days(), 371);
        assert!(window.contains(day));
        day += Duration::days(1);
    }
}

#[test]
fn composed_width_matches_the_glyph_formula() {
    let table = GlyphTable::standard();
    for text in ["AI", " AI", "LLM", "AWS HERO", "A I", "HI ", "2024!", "A~B"] {
        let plan = ActivityPlan::build(text, utc_options(), today()).unwrap();
        let message = Message::new(text);
        let glyphs: Vec<_> = message.chars().filter_map(|c| table.lookup(c)).collect();
        let expected =
            glyphs.iter().map(|g| g.width()).sum::<usize>() + glyphs.len().saturating_sub(1);
        assert_eq!(plan.width(), expected, "{text}");
    }
}

#[test]
fn composing_twice_gives_the_same_grid() {
    let first = ActivityPlan::build("AWS HERO", utc_options(), today()).unwrap();
    let second = ActivityPlan::build("AWS HERO", utc_options(), today()).unwrap();
    assert_eq!(first.grid(), second.grid());
    assert_eq!(first.placement(), second.placement());
}

#[test]
fn ai_is_centered_twenty_one_weeks_in() {
    let plan = ActivityPlan::build("AI", utc_options(), today()).unwrap();
    assert_eq!(plan.width(), 11);
    assert_eq!(plan.placement().offset_weeks, 21);
    assert_eq!(plan.placement().kind, PlacementKind::Centered);
    assert_eq!(
        plan.placement().start_date,
        plan.window().start + Duration::weeks(21)
    );
}

#[test]
fn aws_hero_nearly_fills_the_window() {
    let plan = ActivityPlan::build("aws hero", utc_options(), today()).unwrap();
    assert_eq!(plan.message().as_str(), "AWS HERO");
    assert_eq!(plan.width(), 45);
    assert_eq!(plan.placement().offset_weeks, 4);
    assert_eq!(plan.preview().clipped_days(), 0);
}

#[test]
fn oversized_message_needs_force() {
    // 9 letters = 53 columns, the tenth glyph pushes it to 54+
    let text = "ABCDEFGHI!";
    let err = ActivityPlan::build(text, utc_options(), today()).unwrap_err();
    assert!(matches!(
        err,
        PatternError::MessageTooWide { width: 55, max: 53, .. }
    ));

    let forced = PatternOptions {
        force_replace: true,
        ..utc_options()
    };
    let plan = ActivityPlan::build(text, forced, today()).unwrap();
    assert_eq!(plan.placement().start_date, plan.window().start);
    assert_eq!(plan.placement().kind, PlacementKind::Overflow);
    assert!(plan.width() > WINDOW_WEEKS);
}

#[test]
fn ultra_draws_twenty_five_commits_per_active_day() {
    let plan = ActivityPlan::build("AI", utc_options(), today()).unwrap();
    assert_eq!(plan.active_days(), 33);
    assert_eq!(plan.commits_per_day(), 25);
    assert_eq!(plan.total_commits(), 33 * 25);

    let commits = plan.schedule(&mut SeededJitter::new(42));
    assert_eq!(commits.len(), plan.total_commits());

    let mut per_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for commit in &commits {
        *per_day.entry(commit.at.date_naive()).or_default() += 1;
    }
    assert_eq!(per_day.len(), 33);
    assert!(per_day.values().all(|n| *n == 25));
}

#[test]
fn commit_dates_land_on_the_right_weekday_rows() {
    let plan = ActivityPlan::build("AI", utc_options(), today()).unwrap();
    let start = plan.placement().start_date;
    for commit in plan.schedule(&mut EvenJitter) {
        let date = commit.at.date_naive();
        let offset = (date - start).num_days();
        let week = (offset / 7) as usize;
        let day = date.weekday().num_days_from_sunday() as usize;
        assert!(plan.grid().is_active(day, week), "{date} is not a lit cell");
    }
}

#[test]
fn schedule_is_chronological_with_contiguous_sequence() {
    let options = PatternOptions {
        intensity: Intensity::Extreme,
        ..utc_options()
    };
    let plan = ActivityPlan::build("HERO", options, today()).unwrap();
    let commits = plan.schedule(&mut SeededJitter::new(1));
    assert!(commits.windows(2).all(|w| w[0].at <= w[1].at));
    let sequence: Vec<_> = commits.iter().map(|c| c.sequence).collect();
    let expected: Vec<_> = (1..=commits.len()).collect();
    assert_eq!(sequence, expected);
}

#[test]
fn commit_count_override_and_hours() {
    let options = PatternOptions {
        commits_per_day: Some(4),
        ..utc_options()
    };
    let plan = ActivityPlan::build("I", options, today()).unwrap();
    let commits = plan.schedule(&mut EvenJitter);
    let first_day = commits[0].at.date_naive();
    let hours: Vec<_> = commits
        .iter()
        .filter(|c| c.at.date_naive() == first_day)
        .map(|c| c.at.hour())
        .collect();
    assert_eq!(hours, vec![0, 6, 12, 18]);
}

#[test]
fn refresh_dates_are_future_and_six_weeks_apart() {
    let options = PatternOptions {
        keep_in_view: true,
        placement: PlacementMode::LeftAligned,
        ..utc_options()
    };
    let plan = ActivityPlan::build("ML", options, today()).unwrap();
    let dates = plan.refresh_dates();
    assert_eq!(dates.len(), 12);
    assert!(dates.iter().all(|d| *d >= today()));
    assert!(dates.windows(2).all(|w| (w[1] - w[0]).num_days() == 42));
}

#[test]
fn invalid_options_fail_before_planning() {
    let options = PatternOptions {
        commits_per_day: Some(0),
        ..utc_options()
    };
    assert_eq!(
        ActivityPlan::build("AI", options, today()).unwrap_err(),
        PatternError::InvalidCommitsPerDay(0)
    );
    assert_eq!(
        ActivityPlan::build("", utc_options(), today()).unwrap_err(),
        PatternError::EmptyMessage
    );
}

#[test]
fn outer_spaces_are_drawn_as_blank_columns() {
    let plan = ActivityPlan::build(" AI", utc_options(), today()).unwrap();
    assert_eq!(plan.message().as_str(), " AI");
    assert_eq!(plan.width(), 15);
    assert_eq!(plan.placement().offset_weeks, 19);
    assert_eq!(plan.active_days(), 33);
}

#[test]
fn all_space_message_plans_no_commits() {
    let plan = ActivityPlan::build("   ", utc_options(), today()).unwrap();
    assert_eq!(plan.width(), 11);
    assert_eq!(plan.active_days(), 0);
    assert_eq!(plan.total_commits(), 0);
    assert!(plan.schedule(&mut SeededJitter::new(9)).is_empty());
    assert_eq!(plan.preview().active_days(), 0);
}

#[test]
fn start_date_past_the_calendar_limit_is_an_invalid_date() {
    let options = PatternOptions {
        start_date: NaiveDate::from_ymd_opt(262142, 12, 1),
        ..utc_options()
    };
    let err = ActivityPlan::build("AI", options, today()).unwrap_err();
    assert!(matches!(err, PatternError::InvalidDate(_)), "{err:?}");
}
